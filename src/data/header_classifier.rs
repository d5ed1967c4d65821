// ============================================================
// Layer 4 — Header Classifier
// ============================================================
// Decides which tokens start a new section, and at what level,
// from cheap signals only: font size, page number, numbering
// prefixes and capitalisation.
//
// The decision is an ordered list of rules. Each token is
// checked against the rules top to bottom and the first rule
// that matches wins:
//
//   1. largest font on page 1          → Title
//   2. "1.2.3" numbering prefix        → H3
//   3. "1.2" numbering prefix          → H2
//   4. "1." numbering prefix           → H1
//   5. ALL CAPS, > 3 chars, and within
//      1.5pt of the largest font       → H1
//
// Tokens whose trimmed text is empty are never classified.
// Adjacent title tokens are tagged independently; no merging.
//
// Reference: Rust Book §13 (Iterators and Closures)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::section::{HeaderTag, HeadingLevel};
use crate::domain::token::Token;

static H3_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+").unwrap());
static H2_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+").unwrap());
static H1_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// How far below the largest font an all-caps token may be and
/// still count as a heading.
const CAPS_SIZE_TOLERANCE: f64 = 1.5;

/// Minimum number of characters for the all-caps rule.
const CAPS_MIN_CHARS: usize = 4;

/// What a rule gets to look at for one token.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Token text with surrounding whitespace trimmed, never empty
    pub text: &'a str,
    pub size: f64,
    pub page: u32,
    /// Largest font size anywhere in the document
    pub largest_size: f64,
}

/// One predicate → level rule.
pub struct HeadingRule {
    pub name: &'static str,
    pub level: HeadingLevel,
    pub matches: fn(&Candidate<'_>) -> bool,
}

/// The rules in priority order.
pub static DEFAULT_RULES: &[HeadingRule] = &[
    HeadingRule {
        name: "largest-font-first-page",
        level: HeadingLevel::Title,
        matches: |c| c.size == c.largest_size && c.page == 1,
    },
    HeadingRule {
        name: "numbered-3",
        level: HeadingLevel::H3,
        matches: |c| H3_PREFIX.is_match(c.text),
    },
    HeadingRule {
        name: "numbered-2",
        level: HeadingLevel::H2,
        matches: |c| H2_PREFIX.is_match(c.text),
    },
    HeadingRule {
        name: "numbered-1",
        level: HeadingLevel::H1,
        matches: |c| H1_PREFIX.is_match(c.text),
    },
    HeadingRule {
        name: "large-all-caps",
        level: HeadingLevel::H1,
        matches: |c| {
            is_all_caps(c.text)
                && c.text.chars().count() >= CAPS_MIN_CHARS
                && c.size >= c.largest_size - CAPS_SIZE_TOLERANCE
        },
    },
];

/// At least one cased character and no lower-case ones.
fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Tags heading tokens using an ordered rule list.
pub struct HeaderClassifier {
    rules: &'static [HeadingRule],
}

impl HeaderClassifier {
    /// A classifier using `DEFAULT_RULES`
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES)
    }

    /// A classifier using a custom rule list
    pub fn with_rules(rules: &'static [HeadingRule]) -> Self {
        Self { rules }
    }

    /// The first rule matching `candidate`, or None for body text.
    pub fn matching_rule(&self, candidate: &Candidate<'_>) -> Option<&'static HeadingRule> {
        self.rules.iter().find(|rule| (rule.matches)(candidate))
    }

    /// Lazily yield one HeaderTag per heading token, in ascending
    /// token order. An empty document yields nothing.
    pub fn classify<'a>(&'a self, tokens: &'a [Token]) -> impl Iterator<Item = HeaderTag> + 'a {
        let largest_size = tokens.iter().map(|t| t.size).reduce(f64::max);

        tokens
            .iter()
            .enumerate()
            .filter_map(move |(token_index, token)| {
                let largest_size = largest_size?;
                let text = token.text.trim();
                if text.is_empty() {
                    return None;
                }

                let candidate = Candidate {
                    text,
                    size: token.size,
                    page: token.page,
                    largest_size,
                };

                let rule = self.matching_rule(&candidate)?;
                tracing::trace!("token {} {:?} → {} ({})", token_index, text, rule.level, rule.name);

                Some(HeaderTag {
                    token_index,
                    level: rule.level,
                    title: text.to_string(),
                    page: token.page,
                })
            })
    }
}

impl Default for HeaderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn levels(tokens: &[Token]) -> Vec<(usize, HeadingLevel)> {
        HeaderClassifier::new()
            .classify(tokens)
            .map(|t| (t.token_index, t.level))
            .collect()
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        assert!(levels(&[]).is_empty());
    }

    #[test]
    fn test_largest_font_on_first_page_is_title() {
        // Title rule fires before the all-caps rule
        let tokens = vec![
            Token::new("INTRODUCTION", 18.0, 1),
            Token::new("body", 11.0, 1),
        ];
        assert_eq!(levels(&tokens), vec![(0, HeadingLevel::Title)]);
    }

    #[test]
    fn test_numbered_prefixes() {
        let tokens = vec![
            Token::new("Big", 20.0, 1),
            Token::new("2.1 Methods", 12.0, 1),
            Token::new("3.", 12.0, 2),
            Token::new("4.5.6", 12.0, 2),
            Token::new("7", 12.0, 2),
        ];
        assert_eq!(
            levels(&tokens),
            vec![
                (0, HeadingLevel::Title),
                (1, HeadingLevel::H2),
                (2, HeadingLevel::H1),
                (3, HeadingLevel::H3),
            ]
        );
    }

    #[test]
    fn test_all_caps_within_tolerance_is_h1() {
        let tokens = vec![
            Token::new("Title", 18.0, 1),
            Token::new("RESULTS", 16.5, 2),
            Token::new("TABLES", 16.4, 2),
            Token::new("ABC", 18.0, 2),
            Token::new("Results", 18.0, 2),
        ];
        assert_eq!(
            levels(&tokens),
            vec![(0, HeadingLevel::Title), (1, HeadingLevel::H1)]
        );
    }

    #[test]
    fn test_largest_font_after_first_page_uses_other_rules() {
        let tokens = vec![
            Token::new("cover", 10.0, 1),
            Token::new("1.2 Scope", 18.0, 2),
            Token::new("plain", 18.0, 2),
        ];
        assert_eq!(levels(&tokens), vec![(1, HeadingLevel::H2)]);
    }

    #[test]
    fn test_whitespace_tokens_are_skipped_and_titles_trimmed() {
        let tokens = vec![
            Token::new("   ", 18.0, 1),
            Token::new("  Report ", 18.0, 1),
        ];
        let tags: Vec<_> = HeaderClassifier::new().classify(&tokens).collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].token_index, 1);
        assert_eq!(tags[0].title, "Report");
    }

    #[test]
    fn test_multi_token_title_is_tagged_per_token() {
        let tokens = vec![
            Token::new("Annual", 24.0, 1),
            Token::new("Report", 24.0, 1),
        ];
        assert_eq!(
            levels(&tokens),
            vec![(0, HeadingLevel::Title), (1, HeadingLevel::Title)]
        );
    }

    #[test]
    fn test_matching_rule_reports_first_match() {
        let classifier = HeaderClassifier::new();
        let candidate = Candidate { text: "1.2.3", size: 20.0, page: 1, largest_size: 20.0 };
        assert_eq!(classifier.matching_rule(&candidate).unwrap().name, "largest-font-first-page");

        let candidate = Candidate { page: 2, ..candidate };
        assert_eq!(classifier.matching_rule(&candidate).unwrap().name, "numbered-3");
    }

    #[test]
    fn test_custom_rule_list() {
        static ONLY_CAPS: &[HeadingRule] = &[HeadingRule {
            name: "caps",
            level: HeadingLevel::H2,
            matches: |c| is_all_caps(c.text),
        }];
        let tokens = vec![Token::new("NOTE", 9.0, 3), Token::new("1. Intro", 9.0, 3)];
        let tags: Vec<_> = HeaderClassifier::with_rules(ONLY_CAPS).classify(&tokens).collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].level, HeadingLevel::H2);
    }
}
