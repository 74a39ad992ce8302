use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::ColumnDescriptor;

/// The flag value the catalog uses for nullable columns.
pub const NULLABLE_FLAG: &str = "Y";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TableColumnsResult {
    pub column_name: String,
    pub data_type: String,
    pub nullable: String,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

impl FromRow for TableColumnsResult {
    fn from_row(row: Row) -> Result<Self, tokio_postgres::Error> {
        Ok(TableColumnsResult {
            column_name: row.try_get(0)?,
            data_type: row.try_get(1)?,
            nullable: row.try_get(2)?,
            precision: row.try_get(3)?,
            scale: row.try_get(4)?,
        })
    }
}

impl TableColumnsResult {
    pub fn to_column_descriptor(&self) -> ColumnDescriptor {
        ColumnDescriptor {
            name: self.column_name.clone(),
            native_type: self.data_type.clone(),
            nullable: self.nullable == NULLABLE_FLAG,
            precision: self.precision,
            scale: self.scale,
        }
    }
}

//language=postgresql
pub(super) const GET_COLUMNS: &str = r#"
select column_name::text,
       data_type::text,
       case when is_nullable = 'YES' then 'Y' else 'N' end::text as nullable,
       numeric_precision::int4,
       numeric_scale::int4
from information_schema.columns
where table_schema = $1
  and table_name = $2
order by ordinal_position;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn row(nullable: &str) -> TableColumnsResult {
        TableColumnsResult {
            column_name: "NOTE".to_string(),
            data_type: "VARCHAR2".to_string(),
            nullable: nullable.to_string(),
            precision: None,
            scale: None,
        }
    }

    #[test]
    fn only_y_flag_means_nullable() {
        assert!(row("Y").to_column_descriptor().nullable);
        assert!(!row("N").to_column_descriptor().nullable);
        assert!(!row("y").to_column_descriptor().nullable);
        assert!(!row("").to_column_descriptor().nullable);
    }
}
