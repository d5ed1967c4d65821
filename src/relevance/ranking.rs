// ============================================================
// Layer 5 — Ranking & Report Assembler
// ============================================================
// Steps:
//   1. Drop sections that scored zero
//   2. Stable sort by score, highest first (ties keep the order
//      the sections were produced in: document enumeration
//      order, then appearance within the document)
//   3. Rank 1, 2, 3, ... in that order
//   4. Attach each section's snippet
//   5. Wrap in metadata: persona, job, timestamp, and the
//      sorted distinct names of the documents that made it in

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone};

use crate::domain::persona::PersonaProfile;
use crate::domain::report::{RankedResult, Report, ReportMetadata};
use crate::domain::section::Section;
use crate::relevance::snippet::extract_top_snippet;

/// Timestamp layout used in report metadata
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Steps 1–4: scored sections in, ranked results out.
pub fn rank_sections(sections: &[Section], keywords: &[String]) -> Vec<RankedResult> {
    let mut ranked: Vec<&Section> = sections.iter().filter(|s| s.score > 0).collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedResult {
            document: s.document.clone(),
            page: s.page,
            section_title: s.title.clone(),
            section_level: s.level,
            relevance_rank: i + 1,
            relevance_score: s.score,
            snippet: extract_top_snippet(&s.content, keywords).to_string(),
        })
        .collect()
}

/// Build the full report from scored sections.
pub fn assemble_report<Tz>(
    profile: &PersonaProfile,
    sections: &[Section],
    generated_at: &DateTime<Tz>,
) -> Report
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let results = rank_sections(sections, &profile.keywords);

    let pdfs: BTreeSet<&str> = results.iter().map(|r| r.document.as_str()).collect();

    Report {
        metadata: ReportMetadata {
            persona: profile.persona.clone(),
            job: profile.job.clone(),
            timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            pdfs: pdfs.into_iter().map(str::to_string).collect(),
        },
        results,
    }
}
