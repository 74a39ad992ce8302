use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use crate::catalog_reader::{CatalogConnection, TableColumnsResult, TablesResult, NULLABLE_FLAG};
use crate::{ReflectorError, Result};

/// A catalog that answers from memory instead of a live database.
///
/// Tables are returned in insertion order, and any table can be told to fail
/// when its columns are fetched. Every column fetch is recorded, so tests can
/// check which tables were visited.
#[derive(Default)]
pub struct InMemoryCatalog {
    tables: Vec<TablesResult>,
    columns: HashMap<(String, String), Vec<TableColumnsResult>>,
    failing_tables: BTreeSet<(String, String)>,
    fail_table_listing: bool,
    column_fetches: Mutex<Vec<(String, String)>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table with the given `(name, data_type, nullable, precision, scale)` columns.
    pub fn with_table(
        mut self,
        owner: &str,
        table_name: &str,
        columns: &[(&str, &str, bool, Option<i32>, Option<i32>)],
    ) -> Self {
        self.tables.push(TablesResult {
            owner: owner.to_string(),
            table_name: table_name.to_string(),
        });

        let rows = columns
            .iter()
            .map(|(name, data_type, nullable, precision, scale)| TableColumnsResult {
                column_name: name.to_string(),
                data_type: data_type.to_string(),
                nullable: if *nullable { NULLABLE_FLAG } else { "N" }.to_string(),
                precision: *precision,
                scale: *scale,
            })
            .collect();

        self.columns
            .insert((owner.to_string(), table_name.to_string()), rows);
        self
    }

    /// Makes the column fetch for this table fail.
    pub fn with_failing_table(mut self, owner: &str, table_name: &str) -> Self {
        self.failing_tables
            .insert((owner.to_string(), table_name.to_string()));
        self
    }

    /// Makes the table listing fail.
    pub fn with_failing_table_listing(mut self) -> Self {
        self.fail_table_listing = true;
        self
    }

    /// The `(owner, table_name)` pairs whose columns were fetched, in fetch order.
    pub fn column_fetches(&self) -> Vec<(String, String)> {
        self.column_fetches
            .lock()
            .expect("column fetch log poisoned")
            .clone()
    }
}

impl CatalogConnection for InMemoryCatalog {
    async fn fetch_tables(&self) -> Result<Vec<TablesResult>> {
        if self.fail_table_listing {
            return Err(ReflectorError::catalog_query(
                "list tables",
                "catalog is unavailable",
            ));
        }

        Ok(self.tables.clone())
    }

    async fn fetch_columns(&self, owner: &str, table_name: &str) -> Result<Vec<TableColumnsResult>> {
        let key = (owner.to_string(), table_name.to_string());

        self.column_fetches
            .lock()
            .expect("column fetch log poisoned")
            .push(key.clone());

        if self.failing_tables.contains(&key) {
            return Err(ReflectorError::catalog_query(
                format!("list columns of {}.{}", owner, table_name),
                "simulated query timeout",
            ));
        }

        Ok(self.columns.get(&key).cloned().unwrap_or_default())
    }
}
