// ============================================================
// Layer 3 — Token Domain Type
// ============================================================
// One word pulled out of a PDF page together with the font and
// position signals the header classifier works from.
//
// Tokens are immutable once produced. Their order inside a
// document is the order the token adapter emitted them, which
// is content-stream order and not necessarily visual order.

use serde::{Deserialize, Serialize};

/// A positioned word on a PDF page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The word itself, exactly as extracted (not trimmed)
    pub text: String,

    /// Rendered font size in points
    pub size: f64,

    /// Base font name, e.g. "ABCDEF+Helvetica-Bold"
    pub fontname: String,

    /// Distance of the word's left edge from the page's left edge
    pub x0: f64,

    /// Distance of the word's top edge from the page's top edge
    pub top: f64,

    /// 1-based page number
    pub page: u32,
}

#[cfg(test)]
impl Token {
    /// Create a token with the given text, size and page and
    /// zeroed position / empty font name.
    ///
    /// Example:
    ///   let t = Token::new("INTRODUCTION", 18.0, 1);
    pub fn new(text: impl Into<String>, size: f64, page: u32) -> Self {
        Self {
            text: text.into(),
            size,
            fontname: String::new(),
            x0: 0.0,
            top: 0.0,
            page,
        }
    }

    /// Builder-style setter for the font name
    pub fn with_font(mut self, fontname: impl Into<String>) -> Self {
        self.fontname = fontname.into();
        self
    }

    /// Builder-style setter for the position on the page
    pub fn at(mut self, x0: f64, top: f64) -> Self {
        self.x0 = x0;
        self.top = top;
        self
    }
}
