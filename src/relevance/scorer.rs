// ============================================================
// Layer 5 — Relevance Scorer
// ============================================================
// score = keyword score + advanced score
//
//   keyword score  — number of keywords found (case-insensitive)
//                    anywhere in "title content"; each keyword
//                    counts at most once
//   advanced score — only for personas whose expertise mentions
//                    "advanced": number of advanced terms found
//                    in the same lower-cased text, matched as
//                    written (no case folding on the term)
//
// Advanced terms containing upper-case letters can therefore
// never match. Existing persona configs are scored this way, so
// the behaviour is kept as is.

use crate::domain::persona::PersonaProfile;
use crate::domain::section::Section;

/// The parts of a persona profile that affect scoring,
/// with keywords lower-cased once up front.
#[derive(Debug, Clone, Default)]
pub struct ScoringProfile {
    keywords: Vec<String>,
    advanced_terms: Vec<String>,
}

impl ScoringProfile {
    /// Every term in `advanced_terms` counts; pass an empty list
    /// for personas without advanced expertise.
    pub fn new(keywords: &[String], advanced_terms: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            advanced_terms: advanced_terms.to_vec(),
        }
    }

    /// Score one section. Pure: no state is kept between calls.
    pub fn score(&self, section: &Section) -> u32 {
        let text = format!("{} {}", section.title, section.content).to_lowercase();

        let keyword_score = self.keywords.iter().filter(|k| text.contains(k.as_str())).count();
        let advanced_score = self
            .advanced_terms
            .iter()
            .filter(|t| text.contains(t.as_str()))
            .count();

        (keyword_score + advanced_score) as u32
    }
}

impl From<&PersonaProfile> for ScoringProfile {
    fn from(p: &PersonaProfile) -> Self {
        let advanced_terms: &[String] = if p.is_advanced() { &p.advanced_terms } else { &[] };
        Self::new(&p.keywords, advanced_terms)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::section::{HeaderTag, HeadingLevel};

    fn section(title: &str, content: &str) -> Section {
        let tag = HeaderTag {
            token_index: 0,
            level: HeadingLevel::H1,
            title: title.to_string(),
            page: 1,
        };
        Section::from_tag(&tag, "doc.pdf", content.to_string())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn score_for(section: &Section, keywords: &[&str], expertise: &str, advanced_terms: &[&str]) -> u32 {
        let mut p = PersonaProfile::default();
        p.keywords = strings(keywords);
        p.persona.expertise = expertise.to_string();
        p.advanced_terms = strings(advanced_terms);
        ScoringProfile::from(&p).score(section)
    }

    #[test]
    fn test_keywords_are_case_insensitive_and_counted_once() {
        let s = section("ENERGY", "energy energy diagram");
        assert_eq!(score_for(&s, &["Energy", "Diagram", "missing"], "Beginner", &[]), 2);
    }

    #[test]
    fn test_keyword_can_span_title_and_content() {
        let s = section("heat", "pump details");
        assert_eq!(score_for(&s, &["heat pump"], "", &[]), 1);
    }

    #[test]
    fn test_advanced_terms_need_advanced_expertise() {
        let s = section("1.", "uses eigenvalue decomposition");
        let adv = ["eigenvalue", "decomposition"];
        assert_eq!(score_for(&s, &[], "Beginner", &adv), 0);
        assert_eq!(score_for(&s, &[], "Advanced", &adv), 2);
    }

    #[test]
    fn test_advanced_terms_are_matched_as_written() {
        let s = section("1.", "Uses FFT");
        // Text is lower-cased, the term is not
        assert_eq!(score_for(&s, &[], "advanced", &["FFT"]), 0);
        assert_eq!(score_for(&s, &[], "advanced", &["fft"]), 1);
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let s = section("Energy", "diagram");
        let profile = ScoringProfile::new(&strings(&["energy"]), &strings(&["diagram"]));
        assert_eq!(profile.score(&s), profile.score(&s));
        assert_eq!(profile.score(&s), 2);
    }

    #[test]
    fn test_from_persona_profile() {
        let mut p = PersonaProfile::default();
        p.keywords = strings(&["solar"]);
        p.persona.expertise = "ADVANCED".to_string();
        p.advanced_terms = strings(&["inverter"]);
        let profile = ScoringProfile::from(&p);
        assert_eq!(profile.score(&section("Solar", "inverter sizing")), 2);
    }
}
