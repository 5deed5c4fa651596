//! Judges and advocates from the document preamble
//!
//! Role labels ("Before:", "Coram:", "For the appellant:") only carry their
//! conventional meaning in the header block above the substantive judgment,
//! so scanning stops at the first paragraph that reads as body prose.

/// Hard cap on the preamble region
const PREAMBLE_MAX_PARAGRAPHS: usize = 15;

/// A paragraph this long without a role label is body prose
const PROSE_WORD_THRESHOLD: usize = 40;

/// Labels announcing the bench
const JUDGE_LABELS: &[&str] = &["before:", "coram:", "presided by", "delivered by"];

/// Labels announcing counsel
const ADVOCATE_LABELS: &[&str] = &[
    "for the plaintiff",
    "for the appellant",
    "for the petitioner",
    "for the applicant",
    "for the defendant",
    "for the respondent",
    "for the accused",
    "for the state",
    "counsel:",
    "advocates:",
    "appearing:",
];

/// Extracts judge names from the preamble, source order preserved
pub fn extract_judges(paragraphs: &[String]) -> Vec<String> {
    scan_preamble(paragraphs, JUDGE_LABELS)
}

/// Extracts advocate names from the preamble, source order preserved
pub fn extract_advocates(paragraphs: &[String]) -> Vec<String> {
    scan_preamble(paragraphs, ADVOCATE_LABELS)
}

fn scan_preamble(paragraphs: &[String], labels: &[&str]) -> Vec<String> {
    let mut names = Vec::new();

    for paragraph in preamble(paragraphs) {
        // ASCII-only lowering keeps byte offsets aligned with the original
        let lower: String = paragraph.chars().map(|c| c.to_ascii_lowercase()).collect();

        // Several labels can share one paragraph ("For the appellant: X
        // For the respondent: Y"); each value runs to the next label.
        let mut hits: Vec<(usize, usize)> = labels
            .iter()
            .flat_map(|label| {
                lower
                    .match_indices(label)
                    .map(|(at, _)| (at, at + label.len()))
                    .collect::<Vec<_>>()
            })
            .collect();
        hits.sort_unstable();

        for (i, &(_, value_start)) in hits.iter().enumerate() {
            let value_end = hits
                .get(i + 1)
                .map(|&(next_start, _)| next_start)
                .unwrap_or(paragraph.len());

            let value = paragraph[value_start..value_end]
                .trim_start_matches(':')
                .split(';')
                .next()
                .unwrap_or("")
                .trim();

            for name in split_name_list(value) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
    }

    names
}

/// The header block: paragraphs up to the first body-prose paragraph
fn preamble(paragraphs: &[String]) -> &[String] {
    let mut end = paragraphs.len().min(PREAMBLE_MAX_PARAGRAPHS);

    for (i, paragraph) in paragraphs.iter().enumerate().take(end) {
        let word_count = paragraph.split_whitespace().count();
        let has_label = paragraph.contains(':');
        if word_count > PROSE_WORD_THRESHOLD && !has_label {
            end = i;
            break;
        }
    }

    &paragraphs[..end]
}

/// Splits "A J, B J and C J" into individual names
fn split_name_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .flat_map(|chunk| chunk.split(" and "))
        .flat_map(|chunk| chunk.split(" & "))
        .map(|name| name.trim().trim_end_matches(['.', ',']).to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
