use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::text::truncate_chars;

static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

/// Academic boilerplate that survives the generic English list but carries
/// no topical signal in paper text.
static ACADEMIC_WORDS: &[&str] = &[
    "study",
    "studies",
    "research",
    "analysis",
    "method",
    "methods",
    "results",
    "conclusion",
    "paper",
    "approach",
    "using",
    "based",
];

fn get_stop_words() -> &'static HashSet<String> {
    STOP_WORDS.get_or_init(|| {
        let mut words: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|x| x.to_string())
            .collect();
        words.extend(ACADEMIC_WORDS.iter().map(|w| w.to_string()));
        words
    })
}

/// Hard cap on the text considered for extraction.
pub const MAX_CONTENT_LEN: usize = 2000;
/// At most this many keywords come out of one extraction.
pub const MAX_KEYWORDS: usize = 10;
/// Tokens this short are noise in academic text.
const MIN_TOKEN_LEN: usize = 5;

/// Extracts query keywords from page text by frequency.
///
/// Lowercases, strips non-word characters, drops short tokens and
/// stopwords, then returns the top [`MAX_KEYWORDS`] terms by descending
/// count. Ties keep first-seen order, so repeated runs over the same text
/// produce the same list.
pub fn extract_keywords(content: &str) -> Vec<String> {
    let content = truncate_chars(content, MAX_CONTENT_LEN).to_lowercase();
    let stop_words = get_stop_words();

    // term -> (count, first-seen position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut order = 0usize;
    for token in content.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if token.chars().count() < MIN_TOKEN_LEN {
            continue;
        }
        if stop_words.contains(token) {
            continue;
        }
        counts
            .entry(token.to_string())
            .and_modify(|(count, _)| *count += 1)
            .or_insert_with(|| {
                order += 1;
                (1, order)
            });
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
        count_b.cmp(count_a).then(seen_a.cmp(seen_b))
    });
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(term, _)| term)
        .collect()
}
