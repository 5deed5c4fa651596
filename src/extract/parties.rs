//! Party extraction from the case caption
//!
//! Captions take the form "A v B", "A vs B" or "A versus B" near the top
//! of the judgment. The left side is the plaintiff, the right side the
//! defendant; comma-joined or "and ..."-joined names become other parties.
//! Nothing is guessed: no separator within the scan window leaves the
//! parties empty.

use crate::records::Parties;

/// Paragraphs scanned for a caption before giving up
const CAPTION_SCAN_LIMIT: usize = 8;

/// Longest left-hand side accepted as a caption; separators later in long
/// prose are almost always citations inside the body, not the caption
const MAX_CAPTION_SIDE: usize = 120;

/// Separators tried in order, longest variants first
const SEPARATORS: &[&str] = &[" versus ", " vs. ", " vs ", " v. ", " v "];

/// Extracts the parties from the first paragraphs of the judgment
pub fn extract_parties(paragraphs: &[String]) -> Parties {
    for paragraph in paragraphs.iter().take(CAPTION_SCAN_LIMIT) {
        if let Some(parties) = parse_caption(paragraph) {
            return parties;
        }
    }
    Parties::default()
}

/// Attempts to read one paragraph as a case caption
fn parse_caption(paragraph: &str) -> Option<Parties> {
    // ASCII-only lowering keeps byte offsets aligned with the original
    let lower: String = paragraph.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (separator_at, separator_len) = SEPARATORS
        .iter()
        .filter_map(|sep| lower.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|(at, _)| *at)?;

    let lhs = caption_tail(&paragraph[..separator_at]);
    let rhs = caption_head(&paragraph[separator_at + separator_len..]);

    if lhs.is_empty() || rhs.is_empty() || lhs.len() > MAX_CAPTION_SIDE {
        return None;
    }

    let (plaintiff, mut other_parties) = split_party_list(&lhs);
    let (defendant, co_defendants) = split_party_list(&rhs);
    other_parties.extend(co_defendants);

    if plaintiff.is_empty() || defendant.is_empty() {
        return None;
    }

    Some(Parties {
        plaintiff,
        defendant,
        other_parties,
    })
}

/// Takes the caption-like tail of the text left of the separator:
/// everything after the last sentence punctuation
fn caption_tail(text: &str) -> String {
    let tail = match text.rfind(['.', ';', ':', '\u{2026}']) {
        // The ellipsis is multi-byte; step over the whole character
        Some(at) => {
            let width = text[at..].chars().next().map_or(1, char::len_utf8);
            &text[at + width..]
        }
        None => text,
    };
    tail.trim().to_string()
}

/// Takes the caption-like head of the text right of the separator:
/// everything before the first sentence punctuation
fn caption_head(text: &str) -> String {
    let head = match text.find(['.', ';', ':', '\u{2026}']) {
        Some(at) => &text[..at],
        None => text,
    };
    head.trim().to_string()
}

/// Splits "A, B and C" into the principal party and the rest
fn split_party_list(text: &str) -> (String, Vec<String>) {
    let mut names: Vec<String> = text
        .split(',')
        .flat_map(|chunk| chunk.split(" and "))
        .flat_map(|chunk| chunk.split(" & "))
        .map(|name| name.trim().trim_end_matches(['.', ',']).to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return (String::new(), Vec::new());
    }

    let principal = names.remove(0);
    (principal, names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_caption() {
        let parties = extract_parties(&paras(&["John Doe v Republic"]));
        assert_eq!(parties.plaintiff, "John Doe");
        assert_eq!(parties.defendant, "Republic");
        assert!(parties.other_parties.is_empty());
    }

    #[test]
    fn test_caption_followed_by_judgment_body() {
        let parties = extract_parties(&paras(&[
            "John Doe v Republic ... Held: the appeal is allowed.",
        ]));
        assert_eq!(parties.plaintiff, "John Doe");
        assert_eq!(parties.defendant, "Republic");
    }

    #[test]
    fn test_caption_with_trailing_prose() {
        let parties = extract_parties(&paras(&[
            "John Doe v Republic. The appellant was convicted of robbery.",
        ]));
        assert_eq!(parties.plaintiff, "John Doe");
        assert_eq!(parties.defendant, "Republic");
    }

    #[test]
    fn test_versus_and_vs_variants() {
        let parties = extract_parties(&paras(&["Jane Doe versus Acme Ltd"]));
        assert_eq!(parties.plaintiff, "Jane Doe");
        assert_eq!(parties.defendant, "Acme Ltd");

        let parties = extract_parties(&paras(&["Jane Doe vs Acme Ltd"]));
        assert_eq!(parties.defendant, "Acme Ltd");
    }

    #[test]
    fn test_caption_after_court_heading() {
        let parties = extract_parties(&paras(&[
            "IN THE HIGH COURT AT NAIROBI. JOHN DOE v REPUBLIC",
        ]));
        assert_eq!(parties.plaintiff, "JOHN DOE");
        assert_eq!(parties.defendant, "REPUBLIC");
    }

    #[test]
    fn test_other_parties_from_lists() {
        let parties = extract_parties(&paras(&[
            "Mary Wanjiku, Peter Otieno and 2 Others v County Government",
        ]));
        assert_eq!(parties.plaintiff, "Mary Wanjiku");
        assert_eq!(parties.defendant, "County Government");
        assert_eq!(
            parties.other_parties,
            vec!["Peter Otieno".to_string(), "2 Others".to_string()]
        );
    }

    #[test]
    fn test_no_separator_leaves_parties_empty() {
        let parties = extract_parties(&paras(&[
            "This ruling concerns an application for bail pending appeal.",
        ]));
        assert_eq!(parties, Parties::default());
    }

    #[test]
    fn test_separator_beyond_scan_window_is_ignored() {
        let mut body: Vec<String> = (0..CAPTION_SCAN_LIMIT)
            .map(|i| format!("Preamble paragraph number {}.", i))
            .collect();
        body.push("John Doe v Republic".to_string());

        let parties = extract_parties(&body);
        assert_eq!(parties, Parties::default());
    }

    #[test]
    fn test_deep_body_separator_rejected_by_length() {
        // " v " appearing inside long prose is not a caption
        let long = format!("{} v {}", "x".repeat(200), "y".repeat(10));
        let parties = extract_parties(&paras(&[&long]));
        assert_eq!(parties, Parties::default());
    }
}
