// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Typed errors for the failures the pipeline distinguishes.
// Everything else travels as anyhow::Error with context.
//
//   ConfigError      — fatal, stops the run before any document is read
//   ExtractionError  — one document failed, the run carries on
//
// An empty input folder is not an error at all; see
// application::rank_use_case::RunOutcome::NoDocuments.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} not found. Please update persona config first.", .path.display())]
    Missing { path: PathBuf },

    #[error("Cannot read persona config '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse persona config '{}': {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
