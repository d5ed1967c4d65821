// ============================================================
// Layer 5 — Relevance Layer
// ============================================================
// Everything that decides how relevant a section is to the
// persona profile:
//
//   scorer.rs   — keyword / advanced-term match count per section
//   snippet.rs  — the best-matching content line of a section
//   ranking.rs  — drop zero scores, sort, rank, build the report
//
// All functions here are pure: same inputs, same outputs.

pub mod scorer;

pub mod snippet;

pub mod ranking;
