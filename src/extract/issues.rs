//! Legal-issue extraction
//!
//! Issues are announced by heading cues ("Issues for determination"),
//! by paragraphs opening with "Whether", or by numbered entries under an
//! issues heading. Numbered entries may sit in their own paragraphs or be
//! folded into the heading paragraph, depending on how the source HTML
//! collapsed. Matches keep their order of appearance.

use regex::Regex;
use std::sync::LazyLock;

/// Numbered list marker at paragraph start: "1.", "(2)", "iii)" and similar
static LEADING_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\(?([0-9]{1,2}|[ivxl]{1,5})[.)]\s+").expect("leading item regex")
});

/// Numbered list marker anywhere, for items folded into one paragraph
static INLINE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)\(?([0-9]{1,2}|[ivxl]{1,4})[.)]\s+").expect("inline item regex")
});

/// Heading that opens an issues block
fn is_issues_heading(paragraph: &str) -> bool {
    let lower = paragraph.trim().to_lowercase();
    lower.starts_with("issue") || lower.starts_with("the issue")
}

/// Extracts the legal issues, order preserved
pub fn extract_issues(paragraphs: &[String]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut in_issues_block = false;

    for paragraph in paragraphs {
        let trimmed = paragraph.trim();
        let lower = trimmed.to_lowercase();

        if is_issues_heading(trimmed) {
            in_issues_block = true;

            // Items folded into the heading paragraph
            let inline = split_inline_items(trimmed);
            if !inline.is_empty() {
                for item in inline {
                    push_unique(&mut issues, item);
                }
                continue;
            }

            // "Issues: whether ..." carries content after the colon
            if let Some((_, rest)) = trimmed.split_once(':') {
                let rest = rest.trim();
                if !rest.is_empty() {
                    push_unique(&mut issues, rest.to_string());
                }
            }
            continue;
        }

        if lower.starts_with("whether") {
            push_unique(&mut issues, trimmed.to_string());
            continue;
        }

        if in_issues_block {
            if let Some(found) = LEADING_ITEM.find(trimmed) {
                let item = trimmed[found.end()..].trim();
                if !item.is_empty() {
                    push_unique(&mut issues, item.to_string());
                }
                continue;
            }
            // First non-numbered paragraph closes the block
            in_issues_block = false;
        }
    }

    issues
}

/// Splits "... 1. first issue. 2. second issue." into its items
fn split_inline_items(text: &str) -> Vec<String> {
    let markers: Vec<(usize, usize)> = INLINE_ITEM
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, item_start))| {
            let item_end = markers
                .get(i + 1)
                .map(|&(next_start, _)| next_start)
                .unwrap_or(text.len());
            let item = text[item_start..item_end].trim();
            (!item.is_empty()).then(|| item.to_string())
        })
        .collect()
}

fn push_unique(issues: &mut Vec<String>, issue: String) {
    if !issues.contains(&issue) {
        issues.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_whether_paragraphs_are_issues() {
        let issues = extract_issues(&paras(&[
            "The background is as follows.",
            "Whether the contract was validly terminated.",
            "Whether damages are payable.",
        ]));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], "Whether the contract was validly terminated.");
    }

    #[test]
    fn test_numbered_items_under_heading() {
        let issues = extract_issues(&paras(&[
            "Issues for determination",
            "1. The jurisdiction of this court.",
            "2. The award of costs.",
            "The first issue turns on the statute.",
        ]));
        assert_eq!(
            issues,
            vec![
                "The jurisdiction of this court.".to_string(),
                "The award of costs.".to_string()
            ]
        );
    }

    #[test]
    fn test_items_folded_into_heading_paragraph() {
        let issues = extract_issues(&paras(&[
            "Issues for determination 1. Whether the identification evidence was reliable. \
             2. Whether the sentence was excessive.",
        ]));
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0],
            "Whether the identification evidence was reliable."
        );
        assert_eq!(issues[1], "Whether the sentence was excessive.");
    }

    #[test]
    fn test_numbered_items_outside_block_ignored() {
        let issues = extract_issues(&paras(&[
            "The chronology is as follows.",
            "1. The plaint was filed in March.",
        ]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_heading_with_inline_content() {
        let issues = extract_issues(&paras(&["Issue: whether the appeal is time-barred"]));
        assert_eq!(issues, vec!["whether the appeal is time-barred".to_string()]);
    }

    #[test]
    fn test_order_preserved_and_deduplicated() {
        let issues = extract_issues(&paras(&[
            "Whether notice was served.",
            "Whether the lease was valid.",
            "Whether notice was served.",
        ]));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], "Whether notice was served.");
        assert_eq!(issues[1], "Whether the lease was valid.");
    }

    #[test]
    fn test_no_cues_yield_empty() {
        let issues = extract_issues(&paras(&["The court convened at ten."]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_extraction_is_pure() {
        let input = paras(&["Issues for determination", "1. Costs."]);
        assert_eq!(extract_issues(&input), extract_issues(&input));
    }
}
