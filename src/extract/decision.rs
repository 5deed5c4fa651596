//! Decision extraction
//!
//! The operative part of a judgment is announced by a fixed set of cues
//! ("Held", "It is ordered", ...). When no cue matches anywhere, the last
//! non-empty paragraph is taken instead: judgments conventionally end with
//! the order, and the fallback is deliberate policy rather than a guess.

/// Cues that open the operative part, matched at paragraph start
const DECISION_CUES: &[&str] = &[
    "held:",
    "held,",
    "held that",
    "held",
    "it is hereby ordered",
    "it is ordered",
    "it is so ordered",
    "judgment is entered",
    "the court orders",
    "we therefore hold",
    "in conclusion",
    "accordingly,",
    "disposition",
    "orders:",
];

/// Extracts the decision, falling back to the final paragraph
pub fn extract_decision(paragraphs: &[String]) -> String {
    let mut matched = Vec::new();
    let mut capture_next = false;

    for paragraph in paragraphs {
        let trimmed = paragraph.trim();

        if capture_next {
            capture_next = false;
            if !trimmed.is_empty() {
                matched.push(trimmed.to_string());
                continue;
            }
        }

        if let Some(rest) = match_cue(trimmed) {
            if rest.is_empty() {
                // Bare heading; the decision text is the next paragraph
                capture_next = true;
            } else {
                matched.push(rest.to_string());
            }
        }
    }

    if !matched.is_empty() {
        return matched.join("\n");
    }

    // Explicit fallback: the document's closing paragraph
    paragraphs
        .iter()
        .rev()
        .map(|p| p.trim())
        .find(|p| !p.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Checks whether a paragraph opens with a decision cue; returns the text
/// after the cue (possibly empty for bare headings)
fn match_cue(paragraph: &str) -> Option<&str> {
    let lower: String = paragraph.chars().map(|c| c.to_ascii_lowercase()).collect();

    for cue in DECISION_CUES {
        if lower.starts_with(cue) {
            let after = &paragraph[cue.len()..];
            // Word boundary: "Helder v X" must not match the bare "held" cue
            if after.chars().next().is_some_and(|c| c.is_alphanumeric()) {
                continue;
            }
            return Some(after.trim_start_matches([':', ',', '-']).trim());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_held_cue_captures_remainder() {
        let decision = extract_decision(&paras(&[
            "The parties agreed on the facts.",
            "Held: the appeal succeeds and the conviction is quashed.",
        ]));
        assert_eq!(decision, "the appeal succeeds and the conviction is quashed.");
    }

    #[test]
    fn test_bare_heading_takes_next_paragraph() {
        let decision = extract_decision(&paras(&[
            "Held",
            "The application is allowed with costs.",
        ]));
        assert_eq!(decision, "The application is allowed with costs.");
    }

    #[test]
    fn test_multiple_cue_paragraphs_concatenated() {
        let decision = extract_decision(&paras(&[
            "It is ordered that the suit be dismissed.",
            "Some reasoning follows.",
            "It is ordered that each party bears its own costs.",
        ]));
        assert_eq!(
            decision,
            "that the suit be dismissed.\nthat each party bears its own costs."
        );
    }

    #[test]
    fn test_fallback_to_last_paragraph() {
        let decision = extract_decision(&paras(&[
            "The appellant raised three grounds.",
            "None has merit.",
            "The appeal is dismissed.",
        ]));
        assert_eq!(decision, "The appeal is dismissed.");
    }

    #[test]
    fn test_empty_input_yields_empty_decision() {
        assert_eq!(extract_decision(&[]), "");
    }

    #[test]
    fn test_cue_match_is_case_insensitive() {
        let decision = extract_decision(&paras(&["HELD: the orders issue as prayed."]));
        assert_eq!(decision, "the orders issue as prayed.");
    }
}
