use async_trait::async_trait;

use starscan_core::{Result, TableRef};

/// Trait implemented by catalogs that can describe a warehouse.
///
/// Any failure here is fatal for the run: the candidate set cannot be
/// inferred from partial metadata.
#[async_trait]
pub trait MetadataProvider {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Name of the connected database, when the engine exposes one.
    async fn database_name(&self) -> Result<Option<String>>;

    /// List user tables whose name starts with `name_prefix`
    /// (case-insensitive).
    async fn list_tables(&self, name_prefix: &str) -> Result<Vec<TableRef>>;

    /// Column names of a table in ordinal order.
    async fn columns(&self, table: &TableRef) -> Result<Vec<String>>;

    /// The table's primary-key column, or `None` when the table has zero or
    /// more than one primary-key column.
    async fn primary_key_column(&self, table: &TableRef) -> Result<Option<String>>;
}
