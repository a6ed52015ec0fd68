//! Warehouse metadata providers.

pub mod options;
pub mod postgres;
pub mod provider;
pub mod snapshot;

pub use options::SnapshotOptions;
pub use postgres::PostgresProvider;
pub use provider::MetadataProvider;
pub use snapshot::capture_snapshot;

pub use starscan_core::WarehouseSnapshot;
