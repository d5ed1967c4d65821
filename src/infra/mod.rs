// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File persistence used by the application layer:
//
//   persona_store.rs  — Persona configuration JSON
//                       Loads the profile once at startup
//                       (missing file is fatal) and saves it
//                       after the interactive editor runs.
//
//   report_writer.rs  — Report JSON
//                       Creates the output directory and writes
//                       the pretty-printed ranked report to its
//                       fixed file name.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// Persona configuration loading and saving
pub mod persona_store;

/// Ranked report output
pub mod report_writer;
