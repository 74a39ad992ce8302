use std::collections::BTreeSet;
use std::future::Future;
use itertools::Itertools;
use tracing::{debug, instrument};
use crate::models::{ColumnDescriptor, TableDescriptor};
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::Result;

mod table;
mod table_column;

pub use table::TablesResult;
pub use table_column::{TableColumnsResult, NULLABLE_FLAG};

/// Well-known system schemas that never contain application tables.
///
/// These are the upper-case owners of the Oracle data dictionary and are matched
/// exactly. The Postgres system schemas (`pg_catalog`, `pg_toast`,
/// `information_schema`) are not listed here because the table query already
/// leaves them out, so replacing this list never brings them back.
pub const DEFAULT_IGNORED_SCHEMAS: &[&str] = &[
    "SYS",
    "SYSTEM",
    "OUTLN",
    "DBSNMP",
    "APPQOSSYS",
    "CTXSYS",
    "DVSYS",
    "FLOWS_FILES",
    "MDSYS",
    "ORDDATA",
    "ORDSYS",
    "XDB",
    "WMSYS",
    "PUBLIC",
    "AUDSYS",
    "GSMADMIN_INTERNAL",
    "PERFSTAT",
    "OJVMSYS",
    "EXP_INFO",
];

/// Owners containing this are vendor-internal and always skipped.
const VENDOR_OWNER_MARKER: &str = "ORACLE";

/// The read-only queries the catalog has to answer.
pub trait CatalogConnection: Sync {
    /// Every table visible to the session, as `(owner, table_name)` rows.
    fn fetch_tables(&self) -> impl Future<Output = Result<Vec<TablesResult>>> + Send;

    /// The columns of one table, in ordinal order.
    fn fetch_columns(
        &self,
        owner: &str,
        table_name: &str,
    ) -> impl Future<Output = Result<Vec<TableColumnsResult>>> + Send;
}

impl CatalogConnection for PostgresClientWrapper {
    #[instrument(skip_all)]
    async fn fetch_tables(&self) -> Result<Vec<TablesResult>> {
        self.get_results(table::GET_TABLES, &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_columns(&self, owner: &str, table_name: &str) -> Result<Vec<TableColumnsResult>> {
        self.get_results(table_column::GET_COLUMNS, &[&owner, &table_name])
            .await
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CatalogReaderOptions {
    /// Owners whose tables are skipped. Matched exactly and case-sensitively.
    pub ignored_schemas: BTreeSet<String>,
}

impl Default for CatalogReaderOptions {
    fn default() -> Self {
        Self::with_ignored_schemas(DEFAULT_IGNORED_SCHEMAS)
    }
}

impl CatalogReaderOptions {
    pub fn with_ignored_schemas(schemas: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            ignored_schemas: schemas
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
        }
    }

    pub fn is_ignored_owner(&self, owner: &str) -> bool {
        self.ignored_schemas.contains(owner) || owner.contains(VENDOR_OWNER_MARKER)
    }
}

pub struct CatalogReader<'a, C: CatalogConnection> {
    connection: &'a C,
    options: CatalogReaderOptions,
}

impl<'a, C: CatalogConnection> CatalogReader<'a, C> {
    pub fn new(connection: &'a C, options: CatalogReaderOptions) -> Self {
        CatalogReader {
            connection,
            options,
        }
    }

    pub fn options(&self) -> &CatalogReaderOptions {
        &self.options
    }

    /// Lists the tables to generate structs for, in the order the catalog returned them.
    #[instrument(skip_all)]
    pub async fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        let rows = self.connection.fetch_tables().await?;
        let total = rows.len();

        let tables = rows
            .iter()
            .filter(|row| !self.options.is_ignored_owner(&row.owner))
            .map(|row| row.to_table_descriptor())
            .collect_vec();

        debug!(
            "Catalog returned {} tables, {} left after ignoring system schemas",
            total,
            tables.len()
        );

        Ok(tables)
    }

    /// Lists the columns of a table. A table without columns yields an empty list.
    pub async fn list_columns(&self, owner: &str, table_name: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = self.connection.fetch_columns(owner, table_name).await?;

        Ok(rows.iter().map(|row| row.to_column_descriptor()).collect())
    }
}
