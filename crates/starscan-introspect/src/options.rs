/// Options that control how a warehouse snapshot is captured.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Name prefix identifying dimension tables (case-insensitive).
    pub dimension_prefix: String,
    /// Name prefix identifying fact tables (case-insensitive).
    pub fact_prefix: String,
    /// Restrict the snapshot to these schemas when set.
    pub schemas: Option<Vec<String>>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            dimension_prefix: "dim".to_string(),
            fact_prefix: "fact".to_string(),
            schemas: None,
        }
    }
}
