//! Sentence-level text compression.
//!
//! Compression never paraphrases. It normalizes whitespace, drops repeated
//! sentences, and truncates at a word boundary when the text is still over
//! budget. Lengths are counted in characters, not bytes.

use super::dedup_preserving_order;

const SENTENCE_DELIMITERS: [char; 3] = ['.', '!', '?'];

/// Compress `text` to at most `max_chars` characters.
///
/// 1. Collapse whitespace runs to single spaces and trim.
/// 2. Split into sentences on `.`, `!`, `?` (delimiter stays with its sentence).
/// 3. Drop sentences identical to an earlier one.
/// 4. Join with single spaces and truncate at the last space at or before
///    `max_chars`, or hard-cut at `max_chars` when there is no such space.
///
/// The function is idempotent: compressing its own output with the same
/// budget returns the output unchanged.
pub fn compress(text: &str, max_chars: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return String::new();
    }

    let sentences = dedup_preserving_order(split_sentences(&cleaned));
    truncate_at_word_boundary(&sentences.join(" "), max_chars)
}

/// Split text into trimmed, non-empty sentences.
///
/// A trailing remainder without a terminal delimiter is kept as the final
/// sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if SENTENCE_DELIMITERS.contains(&ch) {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    // Byte offset of the first character past the budget.
    let Some((end, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let cut = if text[end..].starts_with(' ') {
        Some(end)
    } else {
        text[..end].rfind(' ')
    };

    match cut {
        Some(cut) => text[..cut].trim_end().to_string(),
        None => text[..end].to_string(),
    }
}
