//! Frequency-ranked keyword extraction.
//!
//! Tokens are lower-cased, stripped to `[a-z0-9-]`, and kept when longer
//! than three characters. Counts are ranked by a stable descending sort so
//! equal counts keep first-seen order.

use std::collections::HashMap;

/// Maximum number of keywords returned.
pub const MAX_KEYWORDS: usize = 20;
/// Tokens must be longer than this after stripping.
pub const MIN_TOKEN_LEN: usize = 3;

/// Top keywords across `texts`.
pub fn extract_keywords<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    let combined = texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for raw in combined.split_whitespace() {
        let token: String = raw
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect();
        if token.len() <= MIN_TOKEN_LEN {
            continue;
        }
        match index.get(&token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // `sort_by` is stable, which keeps first-seen order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}
