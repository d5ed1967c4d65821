// ============================================================
// Layer 3 — Report Domain Types
// ============================================================
// The report written at the end of a run. Field names follow
// the output JSON exactly:
//
//   {
//     "metadata": { "persona": {...}, "job": "...",
//                   "timestamp": "...", "pdfs": [...] },
//     "results":  [ { "document", "page", "section_title",
//                     "section_level", "relevance_rank",
//                     "relevance_score", "snippet" }, ... ]
//   }

use serde::{Deserialize, Serialize};

use crate::domain::persona::Persona;
use crate::domain::section::HeadingLevel;

/// One ranked section in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub section_level: HeadingLevel,

    /// 1-based position in score-descending order
    pub relevance_rank: usize,

    pub relevance_score: u32,

    /// Best-matching content line, empty when no line matches
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub persona: Persona,
    pub job: String,
    pub timestamp: String,

    /// Sorted, de-duplicated names of the documents that appear in `results`
    pub pdfs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub results: Vec<RankedResult>,
}
