use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use futures::{stream, StreamExt, TryStreamExt};
use itertools::Itertools;
use tracing::{debug, info, instrument};
use crate::catalog_reader::{CatalogConnection, CatalogReader};
use crate::models::{StructDefinition, TableDescriptor};
use crate::struct_renderer::{struct_name, StructRenderer};
use crate::type_mapper::UnknownTypePolicy;
use crate::{ReflectorError, Result};

pub const DEFAULT_OUTPUT_DIR: &str = "generated_structs";
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "db_structs.rs";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GenerateOptions {
    /// How many tables may have their columns fetched at the same time.
    /// The output is in enumeration order no matter the value.
    pub max_parallelism: NonZeroUsize,
    pub unknown_type_policy: UnknownTypePolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_parallelism: NonZeroUsize::MIN,
            unknown_type_policy: UnknownTypePolicy::Fallback,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GenerationOutput {
    /// All declaration blocks, separated by a blank line and ending in a single newline.
    pub text: String,
    pub structs: Vec<StructDefinition>,
    pub table_count: usize,
}

/// Reflects every table the reader can see into struct declarations.
///
/// Nothing is returned unless every table succeeds; the first failing column fetch
/// aborts the whole run.
#[instrument(skip_all)]
pub async fn generate<C: CatalogConnection>(
    reader: &CatalogReader<'_, C>,
    renderer: &StructRenderer,
    options: &GenerateOptions,
) -> Result<GenerationOutput> {
    let tables = reader.list_tables().await?;
    let struct_names = assign_struct_names(&tables);

    info!("Generating structs for {} tables", tables.len());

    let structs: Vec<StructDefinition> = stream::iter(tables.iter().zip(struct_names))
        .map(|(table, name)| reflect_table(reader, renderer, options, table, name))
        .buffered(options.max_parallelism.get())
        .try_collect()
        .await?;

    let text = join_declarations(structs.iter().map(|s| s.to_declaration(renderer.options())));

    Ok(GenerationOutput {
        text,
        table_count: structs.len(),
        structs,
    })
}

async fn reflect_table<C: CatalogConnection>(
    reader: &CatalogReader<'_, C>,
    renderer: &StructRenderer,
    options: &GenerateOptions,
    table: &TableDescriptor,
    struct_name: String,
) -> Result<StructDefinition> {
    debug!("Processing {}", table);

    let columns = reader.list_columns(&table.owner, &table.name).await?;

    if options.unknown_type_policy == UnknownTypePolicy::Strict {
        if let Some(column) = columns.iter().find(|c| c.known_rust_type().is_none()) {
            return Err(ReflectorError::UnmappableType {
                owner: table.owner.clone(),
                table_name: table.name.clone(),
                column_name: column.name.clone(),
                native_type: column.native_type.clone(),
            });
        }
    }

    Ok(renderer.build_named(struct_name, &table.owner, &table.name, &columns))
}

/// Names every table's struct in enumeration order. A table whose name is already taken
/// gets its owner prepended, so `HR.EMPLOYEES` after `APP.EMPLOYEES` becomes `HrEmployees`.
fn assign_struct_names(tables: &[TableDescriptor]) -> Vec<String> {
    let mut used = HashSet::with_capacity(tables.len());

    tables
        .iter()
        .map(|table| {
            let plain = struct_name(&table.name);
            let mut name = if used.contains(&plain) {
                format!("{}{}", struct_name(&table.owner), plain.trim_start_matches('_'))
            } else {
                plain
            };

            let base = name.clone();
            let mut suffix = 2;
            while used.contains(&name) {
                name = format!("{}{}", base, suffix);
                suffix += 1;
            }

            used.insert(name.clone());
            name
        })
        .collect()
}

fn join_declarations(mut declarations: impl Iterator<Item = String>) -> String {
    let mut text = declarations.join("\n\n");
    text.push('\n');
    text
}

/// Writes the generated text to `file_name` inside `output_dir`, creating the directory if needed.
#[instrument(skip(text))]
pub async fn write_output(output_dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let path = output_dir.join(file_name);
    tokio::fs::write(&path, text.as_bytes()).await?;

    info!("Wrote {} bytes to {}", text.len(), path.display());

    Ok(path)
}

/// Writes the reflected struct metadata as pretty-printed JSON.
#[instrument(skip(structs))]
pub async fn write_schema_json(path: &Path, structs: &[StructDefinition]) -> Result {
    let json = serde_json::to_string_pretty(structs)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;

    Ok(())
}
