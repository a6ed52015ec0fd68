use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infer::RelationshipCandidate;

/// Value of `max_orphaned_value` when a relationship has no orphans.
pub const NO_ORPHANS_SENTINEL: &str = "n/a";

/// Orphan statistics for one scanned relationship candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityResult {
    /// Database clock at the moment this candidate was scanned.
    pub run_time: DateTime<Utc>,
    pub dimension_table: String,
    pub primary_key: String,
    pub fact_table: String,
    pub foreign_key: String,
    /// Total rows in the fact table.
    pub fact_rows: i64,
    /// Rows whose foreign-key value has no match in the dimension.
    pub orphans: i64,
    /// Distinct foreign-key values among the orphaned rows.
    pub orphaned_values: i64,
    /// Largest orphaned value as text, or [`NO_ORPHANS_SENTINEL`].
    pub max_orphaned_value: String,
    /// Rows carrying a negative "unknown member" sentinel key.
    pub special_rows: i64,
}

/// A candidate whose scan statement failed to execute.
///
/// Mismatched join types are the common case; the candidate is reported
/// here instead of aborting the remaining scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub candidate: RelationshipCandidate,
    pub error: String,
}

/// Result of one scan run: every candidate lands either in `results` or in
/// `failures`, never both and never neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Contract version for this report format.
    pub report_version: String,
    pub run_id: String,
    /// Wall clock when the scan run started.
    pub run_time: DateTime<Utc>,
    /// Scanned candidates, sorted by (orphans desc, fact rows desc).
    pub results: Vec<IntegrityResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScanFailure>,
}

/// Sort results by severity: orphan count descending, then fact row count
/// descending.
pub fn sort_results(results: &mut [IntegrityResult]) {
    results.sort_by(|left, right| {
        right
            .orphans
            .cmp(&left.orphans)
            .then(right.fact_rows.cmp(&left.fact_rows))
    });
}
