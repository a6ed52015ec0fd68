use tracing::{info, warn};

use starscan_core::{
    IntegrityReport, IntegrityResult, REPORT_VERSION, RelationshipCandidate, ScanFailure,
    sort_results,
};

use crate::executor::ScanExecutor;
use crate::statement::ScanStatement;

/// Scan every candidate and accumulate one integrity report.
///
/// Candidates are independent read-only aggregations, executed one at a
/// time; a failing candidate (typically a type mismatch on the inferred
/// join) is recorded as a [`ScanFailure`] and the remaining candidates still
/// run. Results are sorted by severity before the report is returned, so
/// execution order never shows through.
pub async fn run_scan(
    candidates: &[RelationshipCandidate],
    executor: &dyn ScanExecutor,
) -> IntegrityReport {
    let run_id = uuid::Uuid::new_v4().to_string();
    let run_time = chrono::Utc::now();
    info!(event = "scan_started", run_id = %run_id, candidates = candidates.len());

    let mut results = Vec::with_capacity(candidates.len());
    let mut failures = Vec::new();

    for candidate in candidates {
        let statement = ScanStatement::build(candidate);
        match executor.execute(&statement).await {
            Ok(row) => {
                info!(
                    event = "candidate_scanned",
                    candidate = %candidate.describe(),
                    fact_rows = row.fact_rows,
                    orphans = row.orphans,
                );
                results.push(IntegrityResult {
                    run_time: row.run_time,
                    dimension_table: candidate.dimension.qualified(),
                    primary_key: candidate.primary_key.clone(),
                    fact_table: candidate.fact.qualified(),
                    foreign_key: candidate.foreign_key.clone(),
                    fact_rows: row.fact_rows,
                    orphans: row.orphans,
                    orphaned_values: row.orphaned_values,
                    max_orphaned_value: row.max_orphaned_value,
                    special_rows: row.special_rows,
                });
            }
            Err(err) => {
                warn!(
                    event = "candidate_scan_failed",
                    candidate = %candidate.describe(),
                    error = %err,
                );
                failures.push(ScanFailure {
                    candidate: candidate.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    sort_results(&mut results);
    info!(
        event = "scan_finished",
        run_id = %run_id,
        scanned = results.len(),
        failed = failures.len(),
    );

    IntegrityReport {
        report_version: REPORT_VERSION.to_string(),
        run_id,
        run_time,
        results,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use chrono::Utc;
    use starscan_core::{Error, NO_ORPHANS_SENTINEL, Result, TableRef};

    use super::*;
    use crate::executor::ScanRow;

    struct MockExecutor {
        rows: BTreeMap<String, Result<ScanRow>>,
    }

    impl MockExecutor {
        fn new() -> Self {
            Self {
                rows: BTreeMap::new(),
            }
        }

        fn with_row(mut self, foreign_key: &str, row: ScanRow) -> Self {
            self.rows.insert(foreign_key.to_string(), Ok(row));
            self
        }

        fn with_failure(mut self, foreign_key: &str, message: &str) -> Self {
            self.rows
                .insert(foreign_key.to_string(), Err(Error::Db(message.to_string())));
            self
        }
    }

    #[async_trait]
    impl ScanExecutor for MockExecutor {
        async fn execute(&self, statement: &ScanStatement) -> Result<ScanRow> {
            match self.rows.get(&statement.candidate().foreign_key) {
                Some(Ok(row)) => Ok(row.clone()),
                Some(Err(err)) => Err(Error::Db(err.to_string())),
                None => Err(Error::Db("unexpected statement".to_string())),
            }
        }
    }

    fn candidate(foreign_key: &str) -> RelationshipCandidate {
        RelationshipCandidate {
            dimension: TableRef::new("dbo", "dimCustomer"),
            primary_key: "CustomerKey".to_string(),
            fact: TableRef::new("dbo", "factSales"),
            foreign_key: foreign_key.to_string(),
        }
    }

    fn row(fact_rows: i64, orphans: i64, orphaned_values: i64) -> ScanRow {
        ScanRow {
            run_time: Utc::now(),
            fact_rows,
            orphans,
            orphaned_values,
            max_orphaned_value: if orphaned_values == 0 {
                NO_ORPHANS_SENTINEL.to_string()
            } else {
                "973".to_string()
            },
            special_rows: 0,
        }
    }

    #[tokio::test]
    async fn maps_rows_onto_candidate_identity() {
        let executor = MockExecutor::new().with_row(
            "CustomerKey",
            ScanRow {
                run_time: Utc::now(),
                fact_rows: 100,
                orphans: 10,
                orphaned_values: 8,
                max_orphaned_value: "973".to_string(),
                special_rows: 2,
            },
        );

        let report = run_scan(&[candidate("CustomerKey")], &executor).await;

        assert_eq!(report.report_version, REPORT_VERSION);
        assert!(report.failures.is_empty());
        assert_eq!(report.results.len(), 1);
        let result = &report.results[0];
        assert_eq!(result.dimension_table, "dbo.dimCustomer");
        assert_eq!(result.fact_table, "dbo.factSales");
        assert_eq!(result.foreign_key, "CustomerKey");
        assert_eq!(result.fact_rows, 100);
        assert_eq!(result.orphans, 10);
        assert_eq!(result.orphaned_values, 8);
        assert_eq!(result.max_orphaned_value, "973");
        assert_eq!(result.special_rows, 2);
        assert!(result.orphans <= result.fact_rows);
        assert!(result.orphaned_values <= result.orphans);
    }

    #[tokio::test]
    async fn one_failing_candidate_does_not_abort_the_scan() {
        let executor = MockExecutor::new()
            .with_row("CustomerKey", row(100, 0, 0))
            .with_failure("CustomerKeyText", "operator does not exist: text = integer")
            .with_row("DeliveryCustomerKey", row(100, 3, 2));

        let candidates = [
            candidate("CustomerKey"),
            candidate("CustomerKeyText"),
            candidate("DeliveryCustomerKey"),
        ];
        let report = run_scan(&candidates, &executor).await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].candidate.foreign_key, "CustomerKeyText");
        assert!(report.failures[0].error.contains("text = integer"));
        // Every candidate lands in exactly one of the two lists.
        assert_eq!(report.results.len() + report.failures.len(), candidates.len());
    }

    #[tokio::test]
    async fn results_are_sorted_by_severity() {
        let executor = MockExecutor::new()
            .with_row("AKey", row(50, 1, 1))
            .with_row("BKey", row(900, 25, 4))
            .with_row("CKey", row(5000, 1, 1));

        let report = run_scan(
            &[candidate("AKey"), candidate("BKey"), candidate("CKey")],
            &executor,
        )
        .await;

        let keys: Vec<&str> = report
            .results
            .iter()
            .map(|r| r.foreign_key.as_str())
            .collect();
        assert_eq!(keys, vec!["BKey", "CKey", "AKey"]);
    }

    #[tokio::test]
    async fn clean_relationship_reports_the_sentinel() {
        let executor = MockExecutor::new().with_row("CustomerKey", row(100, 0, 0));
        let report = run_scan(&[candidate("CustomerKey")], &executor).await;

        let result = &report.results[0];
        assert_eq!(result.orphans, 0);
        assert_eq!(result.orphaned_values, 0);
        assert_eq!(result.max_orphaned_value, NO_ORPHANS_SENTINEL);
    }
}
