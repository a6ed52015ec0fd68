mod registry;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use registry::{RunContext, RunOptions, init_run_logging, start_run, write_report, write_snapshot};
use sqlx::postgres::PgPoolOptions;
use starscan_core::{Error as CoreError, REPORT_VERSION, infer_candidates, redact_connection_string};
use starscan_introspect::{PostgresProvider, SnapshotOptions, capture_snapshot};
use starscan_scan::{PgScanExecutor, render_report, run_scan};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
    #[error("{0} candidate scan(s) failed")]
    FailedCandidates(usize),
}

#[derive(Parser, Debug)]
#[command(name = "starscan", version, about = "Star-schema referential integrity scanner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer dimension→fact relationships and scan them for orphans.
    Scan(ScanArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Database connection string (flag form).
    #[arg(long, value_name = "CONNECTION_STRING", conflicts_with = "conn_pos")]
    conn: Option<String>,
    /// Database connection string (positional form).
    #[arg(value_name = "CONNECTION_STRING", required_unless_present = "conn")]
    conn_pos: Option<String>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Optional extra output path for report.json.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Schema name(s) to include.
    #[arg(long, value_name = "SCHEMA")]
    schema: Vec<String>,
    /// Name prefix identifying dimension tables.
    #[arg(long, default_value = "dim")]
    dimension_prefix: String,
    /// Name prefix identifying fact tables.
    #[arg(long, default_value = "fact")]
    fact_prefix: String,
    /// Exit with an error when any candidate scan fails.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => run_scan_command(args).await,
    }
}

async fn run_scan_command(args: ScanArgs) -> Result<(), CliError> {
    let ScanArgs {
        conn,
        conn_pos,
        run_dir,
        out,
        schema,
        dimension_prefix,
        fact_prefix,
        strict,
    } = args;

    let conn = match (conn, conn_pos) {
        (Some(value), None) => value,
        (None, Some(value)) => value,
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidConfig(
                "use either --conn or positional connection string".to_string(),
            ));
        }
        (None, None) => {
            return Err(CliError::InvalidConfig(
                "connection string is required".to_string(),
            ));
        }
    };

    let engine = detect_engine(&conn)?;

    let options = SnapshotOptions {
        dimension_prefix,
        fact_prefix,
        schemas: if schema.is_empty() {
            None
        } else {
            Some(schema)
        },
    };

    let run_id = Uuid::new_v4().to_string();
    let started_at = chrono::Utc::now();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at,
        engine: engine.to_string(),
        report_version: REPORT_VERSION.to_string(),
        strict,
        run_dir,
        out,
        options: RunOptions {
            dimension_prefix: options.dimension_prefix.clone(),
            fact_prefix: options.fact_prefix.clone(),
            schemas: options.schemas.clone(),
        },
        connection: redact_connection_string(&conn),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, engine = %engine);

    let timer = Instant::now();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&conn)
        .await?;

    tracing::info!(event = "snapshot_started");

    let provider = PostgresProvider::new(pool.clone());
    let snapshot = capture_snapshot(&provider, &options).await?;

    write_snapshot(&run_paths, &snapshot)?;
    tracing::info!(
        event = "snapshot_written",
        path = %run_paths.snapshot_path.display(),
        dimensions = snapshot.dimensions.len(),
        facts = snapshot.facts.len(),
        skipped_dimensions = snapshot.skipped_dimensions.len(),
    );

    let candidates = infer_candidates(&snapshot);
    tracing::info!(event = "candidates_inferred", count = candidates.len());

    let executor = PgScanExecutor::new(pool);
    let report = run_scan(&candidates, &executor).await;

    let markdown = render_report(&report);
    write_report(&run_paths, &report, &markdown, run_ctx.out.as_deref())?;
    tracing::info!(event = "report_written", path = %run_paths.report_json_path.display());

    println!("{markdown}");

    if strict && !report.failures.is_empty() {
        return Err(CliError::FailedCandidates(report.failures.len()));
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

fn detect_engine(conn: &str) -> Result<&'static str, CliError> {
    if conn.starts_with("postgres://") || conn.starts_with("postgresql://") {
        Ok("postgres")
    } else {
        Err(CliError::UnsupportedEngine(conn.to_string()))
    }
}
