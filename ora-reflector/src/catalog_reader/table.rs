use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::TableDescriptor;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TablesResult {
    pub owner: String,
    pub table_name: String,
}

impl FromRow for TablesResult {
    fn from_row(row: Row) -> Result<Self, tokio_postgres::Error> {
        Ok(TablesResult {
            owner: row.try_get(0)?,
            table_name: row.try_get(1)?,
        })
    }
}

impl TablesResult {
    pub fn to_table_descriptor(&self) -> TableDescriptor {
        TableDescriptor::new(&self.owner, &self.table_name)
    }
}

//language=postgresql
pub(super) const GET_TABLES: &str = r#"
select table_schema::text, table_name::text from information_schema.tables
where table_schema not in ('pg_catalog', 'pg_toast', 'information_schema') and table_type = 'BASE TABLE'
order by table_schema, table_name;
"#;
