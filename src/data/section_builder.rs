// ============================================================
// Layer 4 — Section Builder
// ============================================================
// Turns a document's tokens and its header tags into sections.
//
// For tag i at token index idx_i, the section's content is the
// newline-joined text of tokens [idx_i + 1, idx_{i+1}), or up to
// the end of the document for the last tag. Tokens before the
// first heading belong to no section and are dropped.
//
// One section per tag, same order. No tags → no sections.

use crate::domain::section::{HeaderTag, Section};
use crate::domain::token::Token;

/// Build one section per header tag. `tags` must be in ascending
/// token order, as produced by the header classifier.
pub fn build_sections(document: &str, tokens: &[Token], tags: &[HeaderTag]) -> Vec<Section> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| {
            let start = (tag.token_index + 1).min(tokens.len());
            let end = tags
                .get(i + 1)
                .map_or(tokens.len(), |next| next.token_index)
                .max(start);

            let content = tokens[start..end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");

            Section::from_tag(tag, document, content)
        })
        .collect()
}
