use starscan_core::IntegrityReport;

/// Render a deterministic markdown report.
pub fn render_report(report: &IntegrityReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Starscan Integrity Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", report.run_id));
    lines.push(format!("- run_time: {}", report.run_time.to_rfc3339()));
    lines.push(format!("- relationships_scanned: {}", report.results.len()));
    lines.push(format!("- relationships_failed: {}", report.failures.len()));
    lines.push(String::new());

    lines.push("## Inferred relationships".to_string());
    lines.push(
        "| fact table | foreign key | dimension table | primary key | fact rows | orphans | orphaned values | max orphaned value | special rows |"
            .to_string(),
    );
    lines.push(
        "| --- | --- | --- | --- | --- | --- | --- | --- | --- |".to_string(),
    );
    for result in &report.results {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            result.fact_table,
            result.foreign_key,
            result.dimension_table,
            result.primary_key,
            result.fact_rows,
            result.orphans,
            result.orphaned_values,
            result.max_orphaned_value,
            result.special_rows,
        ));
    }
    lines.push(String::new());

    if !report.failures.is_empty() {
        lines.push("## Failed candidates".to_string());
        for failure in &report.failures {
            lines.push(format!(
                "- {}: {}",
                failure.candidate.describe(),
                failure.error
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
