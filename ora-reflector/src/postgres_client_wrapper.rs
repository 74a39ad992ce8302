use crate::{ReflectorError, Result};
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Config, NoTls, Row};
use tracing::warn;

/// A catalog session backed by `tokio-postgres`.
pub struct PostgresClientWrapper {
    client: Client,
    join_handle: JoinHandle<()>,
}

impl PostgresClientWrapper {
    /// Connects with an already built config, so credentials never pass through
    /// the `key=value` connection string syntax.
    pub async fn new(config: &Config) -> Result<Self> {
        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(ReflectorError::ConnectionError)?;

        // The connection object performs the actual communication with the database,
        // so spawn it off to run on its own.
        let join_handle = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!("Catalog connection closed with an error: {}", e);
            }
        });

        Ok(PostgresClientWrapper {
            client,
            join_handle,
        })
    }

    pub async fn get_results<T: FromRow>(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<T>> {
        let query_results = self
            .client
            .query(sql, params)
            .await
            .map_err(|e| ReflectorError::catalog_query(sql, e))?;

        let mut output = Vec::with_capacity(query_results.len());

        for row in query_results.into_iter() {
            output.push(T::from_row(row).map_err(|e| ReflectorError::catalog_query(sql, e))?);
        }

        Ok(output)
    }
}

impl Drop for PostgresClientWrapper {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}

pub trait FromRow: Sized {
    fn from_row(row: Row) -> std::result::Result<Self, tokio_postgres::Error>;
}
