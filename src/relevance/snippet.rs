// ============================================================
// Layer 5 — Snippet Extractor
// ============================================================
// Picks the content line with the most keyword hits
// (case-insensitive substring matches, each keyword counted
// once per line). The first line wins a tie. Returns an empty
// string when no line matches any keyword.

/// Best-matching line of `content`, or "" when nothing matches.
pub fn extract_top_snippet<'a>(content: &'a str, keywords: &[String]) -> &'a str {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut best: Option<(&str, usize)> = None;
    for line in content.split('\n') {
        let lower = line.to_lowercase();
        let hits = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((line, hits));
        }
    }

    best.map_or("", |(line, _)| line)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn kw(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_picks_line_with_most_matches() {
        let content = "The energy diagram below shows flow.\nNo match here.";
        assert_eq!(
            extract_top_snippet(content, &kw(&["diagram", "energy"])),
            "The energy diagram below shows flow."
        );
    }

    #[test]
    fn test_first_line_wins_ties() {
        let content = "solar one\nwind two\nSOLAR three";
        assert_eq!(extract_top_snippet(content, &kw(&["solar", "wind"])), "solar one");
    }

    #[test]
    fn test_later_line_with_more_hits_wins() {
        let content = "solar\nsolar and wind";
        assert_eq!(extract_top_snippet(content, &kw(&["solar", "wind"])), "solar and wind");
    }

    #[test]
    fn test_no_match_is_empty() {
        assert_eq!(extract_top_snippet("alpha\nbeta", &kw(&["gamma"])), "");
        assert_eq!(extract_top_snippet("", &kw(&["gamma"])), "");
        assert_eq!(extract_top_snippet("alpha", &[]), "");
    }
}
