//! Deterministic text primitives.
//!
//! Everything here is a pure, total function: no input string makes these
//! fail, and the same input always yields the same output.
//!
//! - [`tokenize`]: lowercase word tokens over `[a-z0-9_]`
//! - [`extract_keywords`]: frequency-ranked keywords with a stopword filter
//! - [`compress`]: sentence dedup and word-boundary truncation
//! - [`dedup_preserving_order`]: first-seen list deduplication

mod compress;
mod keywords;
mod tokenize;

pub use compress::{compress, split_sentences};
pub use keywords::{STOPWORDS, extract_keywords, is_stopword};
pub use tokenize::tokenize;

use std::collections::HashSet;

/// Deduplicate a list, keeping first occurrences in order.
///
/// Entries are trimmed before comparison and empty entries are dropped.
pub fn dedup_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
            continue;
        }
        result.push(trimmed.to_string());
    }
    result
}
