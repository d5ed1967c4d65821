// ============================================================
// Layer 4 — Document Structure Pipeline
// ============================================================
// Everything from a PDF file to a list of titled sections:
//
//   .pdf files
//       │
//       ▼
//   PdfFolder / PdfTokenizer → positioned word tokens
//       │
//       ▼
//   HeaderClassifier         → which tokens are headings, and at what level
//       │
//       ▼
//   build_sections           → one section per heading, with its body text
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Lists PDFs and extracts positioned tokens with lopdf
pub mod loader;

/// Tags heading tokens with Title / H1 / H2 / H3
pub mod header_classifier;

/// Splits a token sequence into sections at the heading tokens
pub mod section_builder;
