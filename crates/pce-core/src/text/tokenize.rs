//! Word tokenizer.

/// Lowercase `text` and split it on every run of characters outside `[a-z0-9_]`.
///
/// Empty tokens are dropped. Non-ASCII letters act as separators.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
