// ============================================================
// Layer 6 — Report Writer
// ============================================================
// Writes the ranked report to <output_dir>/persona_results.json,
// pretty-printed, UTF-8, non-ASCII characters left as is.
// The output directory is created if it doesn't exist.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::report::Report;

/// Fixed report file name inside the output directory
pub const REPORT_FILE: &str = "persona_results.json";

pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the report file
    pub fn report_path(&self) -> PathBuf {
        self.dir.join(REPORT_FILE)
    }

    /// Write the report and return the path it was written to.
    pub fn write(&self, report: &Report) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))?;

        let path = self.report_path();
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;

        tracing::debug!(
            "Wrote {} results to '{}'",
            report.results.len(),
            path.display()
        );
        Ok(path)
    }
}
