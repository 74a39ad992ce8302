use std::io::Write;
use std::process::ExitCode;
use clap::Parser;
use ora_reflector::{
    generate, write_output, write_schema_json, CatalogConnection, CatalogReader, GenerationOutput,
    PostgresClientWrapper, ReflectorError, Result, StructRenderer,
};
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    check_env_file(env_file);

    let cli = cli::Cli::parse();

    let result = run(cli).await;

    report(result, &mut std::io::stdout(), &mut std::io::stderr())
}

/// A missing `.env` file is fine, one that exists but cannot be read or parsed is
/// reported. Returns whether a warning was logged.
fn check_env_file<T>(loaded: std::result::Result<T, dotenvy::Error>) -> bool {
    match loaded {
        Ok(_) => false,
        Err(e) if e.not_found() => false,
        Err(e) => {
            warn!("Could not load the .env file: {}", e);
            true
        }
    }
}

/// Prints the outcome of a run and picks the process exit code.
fn report(
    result: Result<(GenerationOutput, PathBuf)>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> ExitCode {
    let (code, printed) = match result {
        Ok((output, path)) => (
            ExitCode::SUCCESS,
            writeln!(
                out,
                "Generated structs for {} tables into {}",
                output.table_count,
                path.display()
            ),
        ),
        Err(e @ ReflectorError::ConnectionError(_)) => {
            error!("{}", e);
            (
                ExitCode::FAILURE,
                writeln!(err, "There was a problem connecting to the database: {}", e).and_then(
                    |_| writeln!(err, "Please check the connection details in the .env file"),
                ),
            )
        }
        Err(e) => {
            error!("{}", e);
            (
                ExitCode::FAILURE,
                writeln!(err, "Generation failed, nothing was written: {}", e),
            )
        }
    };

    if let Err(e) = printed {
        error!("Could not print the result: {}", e);
    }

    code
}

#[instrument(skip_all)]
async fn run(cli: cli::Cli) -> Result<(GenerationOutput, PathBuf)> {
    info!("Connecting to {}:{}", cli.db_args.db_host, cli.db_args.db_port);

    let connection = PostgresClientWrapper::new(&cli.db_args.to_config()).await?;

    reflect_into_files(&connection, &cli).await
}

#[instrument(skip_all)]
async fn reflect_into_files<C: CatalogConnection>(
    connection: &C,
    cli: &cli::Cli,
) -> Result<(GenerationOutput, PathBuf)> {
    let reader = CatalogReader::new(connection, cli.catalog_reader_options());
    let renderer = StructRenderer::new(cli.render_options());

    let output = generate(&reader, &renderer, &cli.generate_options()).await?;

    let path = write_output(&cli.output_dir, &cli.file_name, &output.text).await?;

    if let Some(schema_json) = &cli.schema_json {
        write_schema_json(schema_json, &output.structs).await?;
    }

    Ok((output, path))
}
