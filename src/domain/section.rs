// ============================================================
// Layer 3 — Heading and Section Domain Types
// ============================================================
// A HeaderTag marks a token that starts a new section.
// A Section is the text between two consecutive header tokens
// (or between the last header token and the end of the document).
//
// Example, for the token sequence
//   0 "1."  1 "Overview"  2 "text"  3 "2."  4 "more"
// with header tags at 0 and 3, the sections are
//   "1." → content "Overview\ntext"
//   "2." → content "more"

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading level assigned by the header classifier.
///
/// Serialises as the bare variant name ("Title", "H1", ...),
/// which is also the form used in the output report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    Title,
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::Title => "Title",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified heading token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderTag {
    /// Index of the heading token in its document's token sequence
    pub token_index: usize,

    pub level: HeadingLevel,

    /// The heading token's text with surrounding whitespace trimmed
    pub title: String,

    pub page: u32,
}

/// A titled span of document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub level: HeadingLevel,
    pub page: u32,

    /// File name of the document the section came from
    pub document: String,

    /// Newline-joined text of every token after the heading token
    /// and before the next heading token
    pub content: String,

    /// Relevance score, zero until the scorer has run
    pub score: u32,
}

impl Section {
    /// Create an unscored section from its header tag.
    pub fn from_tag(tag: &HeaderTag, document: impl Into<String>, content: String) -> Self {
        Self {
            title: tag.title.clone(),
            level: tag.level,
            page: tag.page,
            document: document.into(),
            content,
            score: 0,
        }
    }

    /// Number of content lines (one per body token)
    pub fn line_count(&self) -> usize {
        if self.content.is_empty() {
            0
        } else {
            self.content.split('\n').count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serialises_as_variant_name() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
        assert_eq!(HeadingLevel::Title.to_string(), "Title");
    }

    #[test]
    fn test_line_count() {
        let tag = HeaderTag {
            token_index: 0,
            level: HeadingLevel::H1,
            title: "1.".to_string(),
            page: 1,
        };
        assert_eq!(Section::from_tag(&tag, "a.pdf", String::new()).line_count(), 0);
        assert_eq!(Section::from_tag(&tag, "a.pdf", "a\nb".to_string()).line_count(), 2);
    }
}
