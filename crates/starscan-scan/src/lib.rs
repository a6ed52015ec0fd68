//! Relationship scan engine: statement builder, executor, and report
//! accumulator.

pub mod engine;
pub mod executor;
pub mod render;
pub mod statement;

pub use engine::run_scan;
pub use executor::{PgScanExecutor, ScanExecutor, ScanRow};
pub use render::render_report;
pub use statement::{ScanStatement, quote_ident};
