use async_trait::async_trait;
use sqlx::PgPool;

use starscan_core::{Result, TableRef};

use crate::provider::MetadataProvider;

mod queries;

/// Metadata provider for PostgreSQL warehouses.
#[derive(Debug, Clone)]
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Create a provider using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataProvider for PostgresProvider {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn database_name(&self) -> Result<Option<String>> {
        queries::fetch_database_name(&self.pool).await.map(Some)
    }

    async fn list_tables(&self, name_prefix: &str) -> Result<Vec<TableRef>> {
        queries::list_tables_with_prefix(&self.pool, name_prefix).await
    }

    async fn columns(&self, table: &TableRef) -> Result<Vec<String>> {
        queries::list_columns(&self.pool, table).await
    }

    async fn primary_key_column(&self, table: &TableRef) -> Result<Option<String>> {
        let mut columns = match queries::primary_key_columns(&self.pool, table).await? {
            Some(columns) => columns,
            None => return Ok(None),
        };
        if columns.len() == 1 {
            Ok(columns.pop())
        } else {
            Ok(None)
        }
    }
}
