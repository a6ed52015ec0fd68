use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use starscan_core::{Error, Result};

use crate::statement::ScanStatement;

/// The single row produced by one scan statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    /// Database clock at execution time.
    pub run_time: DateTime<Utc>,
    pub fact_rows: i64,
    pub orphans: i64,
    pub orphaned_values: i64,
    pub max_orphaned_value: String,
    pub special_rows: i64,
}

/// Trait implemented by backends that can run a scan statement.
#[async_trait]
pub trait ScanExecutor {
    async fn execute(&self, statement: &ScanStatement) -> Result<ScanRow>;
}

/// Scan executor for PostgreSQL warehouses.
#[derive(Debug, Clone)]
pub struct PgScanExecutor {
    pool: PgPool,
}

impl PgScanExecutor {
    /// Create an executor using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanExecutor for PgScanExecutor {
    async fn execute(&self, statement: &ScanStatement) -> Result<ScanRow> {
        let row = sqlx::query(statement.sql())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| Error::Db(err.to_string()))?;

        let decode = |err: sqlx::Error| Error::Db(err.to_string());
        Ok(ScanRow {
            run_time: row.try_get("run_time").map_err(decode)?,
            fact_rows: row.try_get("fact_rows").map_err(decode)?,
            orphans: row.try_get("orphans").map_err(decode)?,
            orphaned_values: row.try_get("orphaned_values").map_err(decode)?,
            max_orphaned_value: row.try_get("max_orphaned_value").map_err(decode)?,
            special_rows: row.try_get("special_rows").map_err(decode)?,
        })
    }
}
