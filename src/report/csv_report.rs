use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::snapshot::PositionRow;

use super::ReportSink;

/// Appends rows to a CSV file.
///
/// The header is written only when the file is missing or empty, so the record
/// keeps growing under the header from its first write.
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true)
    }
}

impl ReportSink for CsvReport {
    fn append(&self, rows: &[PositionRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let write_header = self.needs_header();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        for row in rows {
            wtr.serialize(row)
                .with_context(|| format!("Failed to write row to {}", self.path.display()))?;
        }
        wtr.flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;

        if write_header {
            info!("Data successfully saved to {}", self.path.display());
        } else {
            info!("Data successfully appended to {}", self.path.display());
        }
        Ok(())
    }
}
