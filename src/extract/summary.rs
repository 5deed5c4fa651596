//! Case summary extraction
//!
//! Summaries are announced by facts/background cues; when none match, an
//! early paragraph stands in (truncated), since judgments open with the
//! facts far more often than they label them.

/// Cues that introduce a summary or the facts
const SUMMARY_CUES: &[&str] = &[
    "brief facts",
    "summary:",
    "synopsis",
    "overview:",
    "background:",
    "the facts of the case",
    "facts of the matter",
    "this is an appeal",
    "this matter concerns",
    "this is an application",
];

/// Longest summary taken from the fallback paragraph
const FALLBACK_TRUNCATE: usize = 500;

/// Extracts the case summary, falling back to an early paragraph
pub fn extract_summary(paragraphs: &[String]) -> String {
    for (i, paragraph) in paragraphs.iter().enumerate() {
        // ASCII-only lowering keeps byte offsets aligned with the original
        let lower: String = paragraph.chars().map(|c| c.to_ascii_lowercase()).collect();

        for cue in SUMMARY_CUES {
            if let Some(at) = lower.find(cue) {
                let after = paragraph[at..]
                    .trim_start_matches(|c: char| c == ':' || c.is_whitespace());

                // A heading-only paragraph defers to the next one
                if after.len() > cue.len() + 2 {
                    return after.trim().to_string();
                }
                if let Some(next) = paragraphs.get(i + 1) {
                    return next.trim().to_string();
                }
            }
        }
    }

    // Fallback: the second paragraph, where the facts usually start
    paragraphs
        .get(1)
        .map(|p| truncate(p.trim(), FALLBACK_TRUNCATE))
        .unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_brief_facts_cue() {
        let summary = extract_summary(&paras(&[
            "Doe v Republic",
            "Brief facts: the appellant was charged with theft contrary to section 268.",
        ]));
        assert!(summary.starts_with("Brief facts"));
        assert!(summary.contains("charged with theft"));
    }

    #[test]
    fn test_this_is_an_appeal_cue() {
        let summary = extract_summary(&paras(&[
            "Doe v Republic",
            "This is an appeal against conviction and sentence.",
        ]));
        assert_eq!(summary, "This is an appeal against conviction and sentence.");
    }

    #[test]
    fn test_heading_only_defers_to_next_paragraph() {
        let summary = extract_summary(&paras(&[
            "Background:",
            "The parties entered into a lease in 2015.",
        ]));
        assert_eq!(summary, "The parties entered into a lease in 2015.");
    }

    #[test]
    fn test_fallback_to_second_paragraph() {
        let summary = extract_summary(&paras(&[
            "Doe v Republic",
            "The dispute arose from a boundary disagreement.",
            "Held: judgment for the plaintiff.",
        ]));
        assert_eq!(summary, "The dispute arose from a boundary disagreement.");
    }

    #[test]
    fn test_fallback_truncates() {
        let long = "x".repeat(900);
        let summary = extract_summary(&paras(&["Title", &long]));
        assert_eq!(summary.chars().count(), FALLBACK_TRUNCATE);
    }

    #[test]
    fn test_single_paragraph_yields_empty() {
        assert_eq!(extract_summary(&paras(&["Doe v Republic"])), "");
    }
}
