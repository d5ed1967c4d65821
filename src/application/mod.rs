// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
//
//   rank_use_case      — PDFs in, ranked section report out
//   configure_use_case — interactive persona profile editor
//   outline_use_case   — detected sections of a single PDF
//
// Rules for this layer:
//   - No classification or scoring logic here (Layers 4 and 5)
//   - No direct printing to stdout (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The main ranking workflow
pub mod rank_use_case;

// The persona configuration editor
pub mod configure_use_case;

// Per-document heading inspection
pub mod outline_use_case;
