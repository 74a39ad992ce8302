use std::num::NonZeroUsize;
use std::path::PathBuf;
use clap::{Args, Parser};
use tokio_postgres::Config;
use ora_reflector::{
    CatalogReaderOptions, GenerateOptions, RenderOptions, UnknownTypePolicy, DEFAULT_OUTPUT_DIR,
    DEFAULT_OUTPUT_FILE_NAME,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about)]
/// Reads the tables and columns of a live database and writes one Rust struct per table.
///
/// Connection details can be given as flags, environment variables, or a `.env` file
/// in the working directory.
pub struct Cli {
    #[command(flatten)]
    pub db_args: DbArgs,

    /// Schemas whose tables are skipped, separated by commas. Replaces the built-in list of
    /// system schemas when given. Owners containing `ORACLE` are always skipped.
    #[arg(long, env = "REFLECTOR_IGNORED_SCHEMAS", value_delimiter = ',')]
    pub ignored_schemas: Option<Vec<String>>,

    /// Derives to put on every generated struct, separated by commas. Pass an empty
    /// value to emit no derive attribute.
    #[arg(long = "derive", value_delimiter = ',')]
    pub derives: Option<Vec<String>>,

    /// The directory the generated file is written to. Created if missing.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// The name of the generated file inside the output directory.
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE_NAME)]
    pub file_name: String,

    /// Also write the reflected structs as JSON metadata to this path.
    #[arg(long)]
    pub schema_json: Option<PathBuf>,

    /// Fail instead of falling back to `String` when a column has an unknown type.
    #[arg(long)]
    pub strict_types: bool,

    /// How many tables to fetch columns for at the same time. The output order
    /// does not depend on this.
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    pub max_parallelism: NonZeroUsize,
}

impl Cli {
    pub fn catalog_reader_options(&self) -> CatalogReaderOptions {
        match &self.ignored_schemas {
            Some(schemas) => CatalogReaderOptions::with_ignored_schemas(
                schemas.iter().map(|s| s.trim()).filter(|s| !s.is_empty()),
            ),
            None => CatalogReaderOptions::default(),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        match &self.derives {
            Some(derives) => RenderOptions {
                derives: derives
                    .iter()
                    .map(|d| d.trim())
                    .filter(|d| !d.is_empty())
                    .map(|d| d.to_string())
                    .collect(),
            },
            None => RenderOptions::default(),
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            max_parallelism: self.max_parallelism,
            unknown_type_policy: if self.strict_types {
                UnknownTypePolicy::Strict
            } else {
                UnknownTypePolicy::Fallback
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// The host of the database to reflect
    #[arg(long, env = "db_host")]
    pub db_host: String,

    /// The port of the database to reflect
    #[arg(long, env = "db_port", default_value_t = 5432)]
    pub db_port: u16,

    /// The username to use when connecting
    #[arg(long, env = "db_username")]
    pub db_user: String,

    /// The password to use when connecting
    #[arg(long, env = "db_userpwd", hide_env_values = true)]
    pub db_password: String,

    /// The name of the database (service name) to reflect
    #[arg(long, env = "db_service_name")]
    pub db_name: String,
}

impl DbArgs {
    /// Builds the connection config field by field, so values with spaces or quotes
    /// reach the server as typed.
    pub(crate) fn to_config(&self) -> Config {
        let mut config = Config::new();
        config
            .host(&self.db_host)
            .port(self.db_port)
            .user(&self.db_user)
            .password(&self.db_password)
            .dbname(&self.db_name);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_postgres::config::Host;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec![
            "ora-reflector",
            "--db-host",
            "localhost",
            "--db-user",
            "app",
            "--db-password",
            "secret",
            "--db-name",
            "orcl",
        ];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn connection_config() {
        let cli = parse(&["--db-port", "1521"]);

        let config = cli.db_args.to_config();

        assert_eq!(config.get_hosts(), &[Host::Tcp("localhost".to_string())]);
        assert_eq!(config.get_ports(), &[1521u16]);
        assert_eq!(config.get_user(), Some("app"));
        assert_eq!(config.get_password(), Some("secret".as_bytes()));
        assert_eq!(config.get_dbname(), Some("orcl"));
    }

    #[test]
    fn password_with_space_and_quote_is_kept_verbatim() {
        let cli = Cli::parse_from([
            "ora-reflector",
            "--db-host",
            "localhost",
            "--db-user",
            "app user",
            "--db-password",
            "se cret'x",
            "--db-name",
            "orcl",
        ]);

        let config = cli.db_args.to_config();

        assert_eq!(config.get_password(), Some("se cret'x".as_bytes()));
        assert_eq!(config.get_user(), Some("app user"));
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);

        assert_eq!(cli.output_dir, PathBuf::from("generated_structs"));
        assert_eq!(cli.file_name, "db_structs.rs");
        assert_eq!(cli.render_options(), RenderOptions::default());
        assert_eq!(cli.generate_options(), GenerateOptions::default());
        assert_eq!(cli.schema_json, None);
    }

    #[test]
    fn ignored_schemas_replace_defaults() {
        let cli = parse(&["--ignored-schemas", "SYS, AUDIT_ONLY"]);

        let options = cli.catalog_reader_options();

        assert!(options.is_ignored_owner("SYS"));
        assert!(options.is_ignored_owner("AUDIT_ONLY"));
        assert!(!options.is_ignored_owner("XDB"));
    }

    #[test]
    fn derives_and_strict_types() {
        let cli = parse(&["--derive", "Debug,sqlx::FromRow", "--strict-types", "--max-parallelism", "4"]);

        assert_eq!(
            cli.render_options().derives,
            vec!["Debug".to_string(), "sqlx::FromRow".to_string()]
        );
        assert_eq!(cli.generate_options().unknown_type_policy, UnknownTypePolicy::Strict);
        assert_eq!(cli.generate_options().max_parallelism.get(), 4);
    }

    #[test]
    fn empty_derive_list_emits_no_derives() {
        let cli = parse(&["--derive", ""]);

        assert!(cli.render_options().derives.is_empty());
    }
}
