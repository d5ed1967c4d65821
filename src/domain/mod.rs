// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing what the
// system works with: positioned tokens pulled out of a PDF,
// the headings and sections rebuilt from them, the persona
// profile they are ranked against, and the final report.
//
// Rules for this layer:
//   - NO PDF library types allowed here (except in error sources)
//   - NO file I/O
//   - NO scoring or classification logic
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A single positioned word produced by the token adapter
pub mod token;

// Heading levels, header tags and sections
pub mod section;

// The persona / job profile loaded once per run
pub mod persona;

// Ranked results and the report written at the end of a run
pub mod report;

// Error taxonomy shared by the other layers
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
