use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::models::ExtractedTerms;

/// Maximum number of ranked keywords kept per description
pub const MAX_KEYWORDS: usize = 20;

/// Keywords joined into the search query when no title was found
const QUERY_KEYWORDS: usize = 3;

const MIN_TITLE_LEN: usize = 3;
const MAX_TITLE_LEN: usize = 100;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "should", "could", "may", "might", "must", "can", "this", "that", "these",
    "those", "from", "into", "through", "during", "before", "after", "above", "below", "between",
    "under", "about", "against", "among", "around", "their", "there", "where", "which", "who",
    "whom", "whose", "your", "our", "them", "they", "more", "most", "some", "such", "only", "both",
    "each", "other",
    // Job description filler
    "experience", "years", "required", "skill", "ability", "strong", "knowledge", "team", "work",
    "proven", "responsibilities", "using", "within", "we", "seek",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Title rules, tried in order. Each captures a capitalized phrase of up to
/// four words ending in a role noun.
fn title_rules() -> &'static [Regex] {
    static RULES: OnceLock<Vec<Regex>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // "Seeking a Senior Data Engineer", "Role: Product Manager"
            r"\b(?i:looking for|seeking|hiring|position for|role for|job title|opening for|title|position|role)[\s:]+(?:(?i:an?)\s+)?((?:[A-Z][a-zA-Z]+\s+){0,4}(?i:specialist|engineer|manager|architect|developer|designer))\b",
            // Description opens with the title
            r"^\s*((?:[A-Z][a-zA-Z]+\s+){1,4}(?i:developer|engineer|manager|analyst|specialist|designer|architect|administrator|consultant|coordinator))\b",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("title rule must compile"))
        .collect()
    })
}

/// Rank the qualifying tokens of a description by frequency.
///
/// Tokens are lower-cased, split on anything that is not a letter, digit or
/// underscore, and dropped when they have three characters or fewer or are
/// stop words. Ties keep first-appearance order. Returns an empty vector when
/// nothing qualifies.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    let stop = stop_words();
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for token in normalized
        .split_whitespace()
        .filter(|t| t.chars().count() > 3 && !stop.contains(t))
    {
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-appearance order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Infer a job title from a description, if one of the title rules matches
pub fn extract_title(text: &str) -> Option<String> {
    title_rules().iter().find_map(|rule| {
        let candidate = rule.captures(text)?.get(1)?.as_str().trim();
        let len = candidate.chars().count();
        (MIN_TITLE_LEN..=MAX_TITLE_LEN)
            .contains(&len)
            .then(|| candidate.to_string())
    })
}

/// Extract both keywords and title in one pass over the description
pub fn extract_terms(text: &str) -> ExtractedTerms {
    ExtractedTerms {
        keywords: extract_keywords(text),
        inferred_title: extract_title(text),
    }
}

/// Query sent to providers: the inferred title, or the top keywords
pub fn build_search_query(terms: &ExtractedTerms) -> String {
    match &terms.inferred_title {
        Some(title) => title.clone(),
        None => terms
            .keywords
            .iter()
            .take(QUERY_KEYWORDS)
            .cloned()
            .collect::<Vec<_>>()
            .join(" "),
    }
}
