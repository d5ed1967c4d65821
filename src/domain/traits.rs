// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline never talks to a PDF library directly. It asks a
// TokenSource for a document's positioned words and works from
// there, so:
//   - PdfTokenizer (Layer 4) implements TokenSource with lopdf
//   - tests implement it with in-memory token lists
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::errors::ExtractionError;
use crate::domain::token::Token;

// ─── TokenSource ──────────────────────────────────────────────────────────────
/// The token stream adapter boundary.
pub trait TokenSource {
    /// Return every word of the document at `path`, page by page,
    /// in content-stream order.
    fn extract_tokens(&self, path: &Path) -> Result<Vec<Token>, ExtractionError>;
}
