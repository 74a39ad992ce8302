use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflectorError {
    #[error("Failed to connect to the catalog database: `{0}`")]
    ConnectionError(#[source] tokio_postgres::Error),

    #[error("Catalog query failed: `{source}` when executing query: `{query}`")]
    CatalogQueryError {
        query: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Column `{owner}.{table_name}.{column_name}` has native type '{native_type}' which has no known Rust mapping")]
    UnmappableType {
        owner: String,
        table_name: String,
        column_name: String,
        native_type: String,
    },

    #[error("io error: `{0}`")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize schema metadata: `{0}`")]
    JsonError(#[from] serde_json::Error),
}

impl ReflectorError {
    pub(crate) fn catalog_query(
        query: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ReflectorError::CatalogQueryError {
            query: query.into(),
            source: source.into(),
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, ReflectorError>;
