use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema-qualified reference to a table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Render the `schema.name` form used in reports and diagnostics.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// Role a table plays in the star schema, derived from its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Dimension,
    Fact,
}

/// A table captured from the warehouse catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub table: TableRef,
    pub kind: TableKind,
    /// Column names in ordinal order.
    pub columns: Vec<String>,
}

/// A dimension table with its single designated primary-key column.
///
/// Dimensions without exactly one primary-key column never become a
/// `DimensionKey`; they are recorded as [`SkippedDimension`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionKey {
    pub table: TableRef,
    pub columns: Vec<String>,
    pub primary_key: String,
}

/// Why a dimension-prefixed table was excluded from inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDimension {
    pub table: TableRef,
    pub reason: String,
}

/// Immutable metadata snapshot for one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseSnapshot {
    /// Contract version for this snapshot format.
    pub snapshot_version: String,
    /// Database engine identifier (e.g. `postgres`).
    pub engine: String,
    /// Database name when available.
    pub database: Option<String>,
    /// When the catalog was read.
    pub captured_at: DateTime<Utc>,
    /// Dimension tables with a usable single-column primary key.
    pub dimensions: Vec<DimensionKey>,
    /// Fact tables with their columns.
    pub facts: Vec<TableDescriptor>,
    /// Dimension-prefixed tables excluded from inference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_dimensions: Vec<SkippedDimension>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_joins_schema_and_name() {
        let table = TableRef::new("dbo", "dimCustomer");
        assert_eq!(table.qualified(), "dbo.dimCustomer");
    }
}
