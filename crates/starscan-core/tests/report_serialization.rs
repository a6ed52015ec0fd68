use chrono::Utc;
use starscan_core::{
    IntegrityReport, IntegrityResult, NO_ORPHANS_SENTINEL, REPORT_VERSION, RelationshipCandidate,
    ScanFailure, TableRef,
};

fn sample_report() -> IntegrityReport {
    IntegrityReport {
        report_version: REPORT_VERSION.to_string(),
        run_id: "b2f7e1a0-0000-0000-0000-000000000000".to_string(),
        run_time: Utc::now(),
        results: vec![IntegrityResult {
            run_time: Utc::now(),
            dimension_table: "dbo.dimCustomer".to_string(),
            primary_key: "CustomerKey".to_string(),
            fact_table: "dbo.factSales".to_string(),
            foreign_key: "DeliveryCustomerKey".to_string(),
            fact_rows: 100,
            orphans: 10,
            orphaned_values: 8,
            max_orphaned_value: "973".to_string(),
            special_rows: 2,
        }],
        failures: vec![ScanFailure {
            candidate: RelationshipCandidate {
                dimension: TableRef::new("dbo", "dimCustomer"),
                primary_key: "CustomerKey".to_string(),
                fact: TableRef::new("dbo", "factLegacy"),
                foreign_key: "CustomerKeyText".to_string(),
            },
            error: "operator does not exist: text = integer".to_string(),
        }],
    }
}

#[test]
fn report_round_trips_through_json() {
    let report = sample_report();
    let json = serde_json::to_string(&report).expect("serialize report");
    let parsed: IntegrityReport = serde_json::from_str(&json).expect("parse report");

    assert_eq!(parsed.report_version, REPORT_VERSION);
    assert_eq!(parsed.results, report.results);
    assert_eq!(parsed.failures, report.failures);
}

#[test]
fn report_json_uses_contract_field_names() {
    let report = sample_report();
    let value = serde_json::to_value(&report).expect("serialize report");

    let result = &value["results"][0];
    for field in [
        "run_time",
        "dimension_table",
        "primary_key",
        "fact_table",
        "foreign_key",
        "fact_rows",
        "orphans",
        "orphaned_values",
        "max_orphaned_value",
        "special_rows",
    ] {
        assert!(!result[field].is_null(), "missing field {field}");
    }

    let failure = &value["failures"][0];
    assert_eq!(failure["candidate"]["fact"]["name"], "factLegacy");
    assert_eq!(
        failure["error"],
        "operator does not exist: text = integer"
    );
}

#[test]
fn empty_failures_are_omitted_from_json() {
    let mut report = sample_report();
    report.failures.clear();
    let value = serde_json::to_value(&report).expect("serialize report");
    assert!(value.get("failures").is_none());
}

#[test]
fn sentinel_is_stable() {
    assert_eq!(NO_ORPHANS_SENTINEL, "n/a");
}
