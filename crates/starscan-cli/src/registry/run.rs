use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use starscan_core::{IntegrityReport, RedactedConnection, WarehouseSnapshot};

use super::RegistryResult;

/// Serializable options for runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub dimension_prefix: String,
    pub fact_prefix: String,
    pub schemas: Option<Vec<String>>,
}

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub engine: String,
    pub report_version: String,
    pub strict: bool,
    pub run_dir: PathBuf,
    pub out: Option<PathBuf>,
    pub options: RunOptions,
    pub connection: RedactedConnection,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
struct RunConfig<'a> {
    run_id: &'a str,
    started_at: String,
    engine: &'a str,
    report_version: &'a str,
    strict: bool,
    options: &'a RunOptions,
    connection: &'a RedactedConnection,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub snapshot_path: PathBuf,
    pub logs_path: PathBuf,
    pub report_json_path: PathBuf,
    pub report_md_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let run_root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&run_root)?;

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        engine: &ctx.engine,
        report_version: &ctx.report_version,
        strict: ctx.strict,
        options: &ctx.options,
        connection: &ctx.connection,
    };
    write(
        run_root.join("config.json"),
        serde_json::to_vec_pretty(&config)?,
    )?;

    Ok(RunPaths {
        snapshot_path: run_root.join("snapshot.json"),
        logs_path: run_root.join("logs.ndjson"),
        report_json_path: run_root.join("report.json"),
        report_md_path: run_root.join("report.md"),
    })
}

pub fn write_snapshot(paths: &RunPaths, snapshot: &WarehouseSnapshot) -> RegistryResult<()> {
    write(&paths.snapshot_path, serde_json::to_vec_pretty(snapshot)?)?;
    Ok(())
}

pub fn write_report(
    paths: &RunPaths,
    report: &IntegrityReport,
    markdown: &str,
    out: Option<&Path>,
) -> RegistryResult<()> {
    let json = serde_json::to_vec_pretty(report)?;
    write(&paths.report_json_path, &json)?;
    write(&paths.report_md_path, markdown)?;
    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        write(out, &json)?;
    }
    Ok(())
}
