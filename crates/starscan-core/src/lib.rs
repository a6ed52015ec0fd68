//! Core contracts and helpers for Starscan.
//!
//! This crate defines the warehouse snapshot types, relationship inference,
//! the integrity report model, and utilities shared between the metadata
//! provider, the scan engine, and the CLI.

pub mod error;
pub mod infer;
pub mod redaction;
pub mod report;
pub mod schema;

pub use error::{Error, Result};
pub use infer::{RelationshipCandidate, infer_candidates, strip_quoting};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use report::{
    IntegrityReport, IntegrityResult, NO_ORPHANS_SENTINEL, ScanFailure, sort_results,
};
pub use schema::{
    DimensionKey, SkippedDimension, TableDescriptor, TableKind, TableRef, WarehouseSnapshot,
};

/// Current contract version for `snapshot.json` artifacts.
pub const SNAPSHOT_VERSION: &str = "0.1";

/// Current contract version for `report.json` artifacts.
pub const REPORT_VERSION: &str = "0.1";
