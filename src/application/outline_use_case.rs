// ============================================================
// Layer 2 — Outline Use Case
// ============================================================
// Runs only the structural half of the pipeline on one file:
// tokens → header tags → sections. No scoring, no report.
// Handy for checking what the header classifier makes of a PDF.

use anyhow::{Context, Result};
use std::path::Path;

use crate::application::rank_use_case::document_name;
use crate::data::{header_classifier::HeaderClassifier, section_builder::build_sections};
use crate::domain::section::Section;
use crate::domain::traits::TokenSource;

pub struct OutlineUseCase<S: TokenSource> {
    source: S,
}

impl<S: TokenSource> OutlineUseCase<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The sections detected in `path`, in document order.
    pub fn outline(&self, path: &Path) -> Result<Vec<Section>> {
        let tokens = self
            .source
            .extract_tokens(path)
            .with_context(|| format!("Cannot extract text from '{}'", path.display()))?;

        let tags: Vec<_> = HeaderClassifier::new().classify(&tokens).collect();
        tracing::debug!("{} tokens, {} headings", tokens.len(), tags.len());

        Ok(build_sections(&document_name(path), &tokens, &tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ExtractionError;
    use crate::domain::section::HeadingLevel;
    use crate::domain::token::Token;

    struct Fixed(Vec<Token>);

    impl TokenSource for Fixed {
        fn extract_tokens(&self, _path: &Path) -> Result<Vec<Token>, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_outline_lists_sections() {
        let tokens = vec![
            Token::new("Guide", 18.0, 1),
            Token::new("2.1", 11.0, 1),
            Token::new("steps", 11.0, 1),
        ];
        let sections = OutlineUseCase::new(Fixed(tokens))
            .outline(Path::new("docs/guide.pdf"))
            .unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].document, "guide.pdf");
        assert_eq!(sections[1].level, HeadingLevel::H2);
        assert_eq!(sections[1].content, "steps");
    }
}
