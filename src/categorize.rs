//! Legal-area classification for legislation titles
//!
//! Classification is an ordered rule table: the first rule with a keyword
//! appearing (case-insensitively) in the title wins, so rule order is part
//! of the contract. Reordering rules changes results for titles matching
//! several categories (e.g. "Tax Offences Act" is Criminal before Tax only
//! because Criminal is listed first).

/// Category assigned when no rule matches
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Ordered (category, keywords) rules; earlier rules take precedence
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("Criminal", &["criminal", "penal", "offence", "prosecution", "police"]),
    ("Civil", &["civil", "contract", "tort", "property", "family"]),
    (
        "Constitutional",
        &["constitution", "bill of rights", "fundamental", "democracy"],
    ),
    (
        "Commercial",
        &["commercial", "business", "trade", "company", "banking"],
    ),
    (
        "Labour",
        &["labour", "labor", "employment", "work", "occupation", "trade union"],
    ),
    (
        "Environmental",
        &["environment", "conservation", "pollution", "natural resources"],
    ),
    ("Health", &["health", "medical", "pharmacy", "disease", "hospital"]),
    (
        "Education",
        &["education", "school", "university", "college", "training"],
    ),
    ("Tax", &["tax", "revenue", "customs", "excise", "income tax"]),
];

/// Assigns a legal category to an Act title
///
/// Always returns a category; titles matching no rule get
/// [`UNCATEGORIZED`].
pub fn categorize(act_title: &str) -> &'static str {
    let title = act_title.to_lowercase();

    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|keyword| title.contains(keyword)) {
            return category;
        }
    }

    UNCATEGORIZED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penal_code_is_criminal() {
        assert_eq!(categorize("Penal Code"), "Criminal");
    }

    #[test]
    fn test_no_keyword_is_uncategorized() {
        assert_eq!(categorize("Widget Registration Act"), UNCATEGORIZED);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(categorize("INCOME TAX ACT"), "Tax");
        assert_eq!(categorize("environmental management act"), "Environmental");
    }

    #[test]
    fn test_rule_order_breaks_ties() {
        // "offence" (Criminal) appears before "tax" (Tax) in the table
        assert_eq!(categorize("Tax Offences Act"), "Criminal");
    }

    #[test]
    fn test_empty_title_is_uncategorized() {
        assert_eq!(categorize(""), UNCATEGORIZED);
    }

    #[test]
    fn test_multi_word_keyword() {
        assert_eq!(categorize("Bill of Rights (Amendment) Act"), "Constitutional");
    }
}
