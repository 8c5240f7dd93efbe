pub mod csv_report;

pub use csv_report::CsvReport;

use anyhow::Result;

use crate::snapshot::PositionRow;

/// Durable, append-only record of position rows.
pub trait ReportSink: Send + Sync {
    fn append(&self, rows: &[PositionRow]) -> Result<()>;
}
