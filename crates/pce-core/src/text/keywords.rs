//! Frequency-based keyword extraction.

use std::collections::HashMap;

use super::tokenize;

/// Common English function words ignored by [`extract_keywords`].
pub const STOPWORDS: &[&str] = &[
    "the", "and", "a", "an", "of", "to", "in", "for", "on", "at", "is", "are", "was", "were",
    "be", "been", "with", "as", "by", "or", "if", "then", "so", "we", "i", "you", "it", "that",
    "this", "but", "from", "our", "their", "they", "them", "my", "your",
];

/// Whether `token` is in the stopword list.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Return the `max_keywords` most frequent non-stopword tokens across `texts`.
///
/// Counts are combined over all inputs. Ordering is by descending frequency,
/// then ascending token, so the result does not depend on input order.
pub fn extract_keywords<I, S>(texts: I, max_keywords: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokenize(text.as_ref()) {
            if is_stopword(&token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(left_token, left_count), (right_token, right_count)| {
        right_count
            .cmp(left_count)
            .then_with(|| left_token.cmp(right_token))
    });
    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(token, _)| token)
        .collect()
}
