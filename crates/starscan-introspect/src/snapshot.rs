use starscan_core::{
    DimensionKey, Result, SNAPSHOT_VERSION, SkippedDimension, TableDescriptor, TableKind,
    TableRef, WarehouseSnapshot,
};

use crate::options::SnapshotOptions;
use crate::provider::MetadataProvider;

/// Capture an immutable warehouse snapshot for one scan run.
///
/// Dimension-prefixed tables without exactly one primary-key column are
/// excluded from inference and recorded in `skipped_dimensions`; that is a
/// property of the warehouse, not an error.
pub async fn capture_snapshot(
    provider: &dyn MetadataProvider,
    opts: &SnapshotOptions,
) -> Result<WarehouseSnapshot> {
    let database = provider.database_name().await?;

    let mut dimensions = Vec::new();
    let mut skipped_dimensions = Vec::new();
    for table in retain_schemas(provider.list_tables(&opts.dimension_prefix).await?, opts) {
        let columns = provider.columns(&table).await?;
        match provider.primary_key_column(&table).await? {
            Some(primary_key) => dimensions.push(DimensionKey {
                table,
                columns,
                primary_key,
            }),
            None => skipped_dimensions.push(SkippedDimension {
                table,
                reason: "no single-column primary key".to_string(),
            }),
        }
    }

    let mut facts = Vec::new();
    for table in retain_schemas(provider.list_tables(&opts.fact_prefix).await?, opts) {
        let columns = provider.columns(&table).await?;
        facts.push(TableDescriptor {
            table,
            kind: TableKind::Fact,
            columns,
        });
    }

    dimensions.sort_by(|left, right| left.table.cmp(&right.table));
    facts.sort_by(|left, right| left.table.cmp(&right.table));
    skipped_dimensions.sort_by(|left, right| left.table.cmp(&right.table));

    Ok(WarehouseSnapshot {
        snapshot_version: SNAPSHOT_VERSION.to_string(),
        engine: provider.engine().to_string(),
        database,
        captured_at: chrono::Utc::now(),
        dimensions,
        facts,
        skipped_dimensions,
    })
}

fn retain_schemas(tables: Vec<TableRef>, opts: &SnapshotOptions) -> Vec<TableRef> {
    match &opts.schemas {
        Some(schemas) => tables
            .into_iter()
            .filter(|table| schemas.iter().any(|schema| schema == &table.schema))
            .collect(),
        None => tables,
    }
}
