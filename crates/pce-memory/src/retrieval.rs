//! Frame scoring and selection.
//!
//! Scores combine whole-word query matches with a linear recency weight:
//! the oldest frame weighs 1.0 and the newest 2.0. With an empty query every
//! frame is eligible and ranks purely by recency.

use pce_core::{Frame, tokenize};
use regex::Regex;
use tracing::debug;

/// A stored frame together with its position in the log and its score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredFrame<'a> {
    /// Position in the log (0 = oldest).
    pub index: usize,
    /// Relevance score; 0.0 means no query token matched.
    pub score: f64,
    /// The frame itself.
    pub frame: &'a Frame,
}

/// Recency weight in `[1.0, 2.0]`, growing linearly toward the newest frame.
#[allow(clippy::cast_precision_loss)]
pub fn recency_weight(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 1.0;
    }
    1.0 + index as f64 / (total - 1) as f64
}

/// Whole-word matcher for the tokens of a query.
#[derive(Debug)]
pub struct QueryMatcher {
    patterns: Vec<Regex>,
}

impl QueryMatcher {
    /// Tokenize `query` and compile one word-boundary pattern per token.
    pub fn new(query: &str) -> Self {
        let patterns = tokenize(query)
            .iter()
            .filter_map(|token| Regex::new(&format!(r"\b{}\b", regex::escape(token))).ok())
            .collect();
        Self { patterns }
    }

    /// Whether the query had no tokens.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Count query tokens occurring as whole words in `haystack`.
    ///
    /// A token repeated in the query counts once per repetition.
    pub fn count_matches(&self, haystack: &str) -> usize {
        self.patterns
            .iter()
            .filter(|pattern| pattern.is_match(haystack))
            .count()
    }
}

/// Lowercased text a query is matched against.
pub fn frame_haystack(frame: &Frame) -> String {
    [
        frame.key_topics.join(" ").as_str(),
        frame.distilled_user_intent.as_str(),
        frame.distilled_system_output.as_str(),
        frame.project_state.summary.as_str(),
        frame.raw_user_message.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Score one frame at `index` of `total`.
#[allow(clippy::cast_precision_loss)]
pub fn score_frame(matcher: &QueryMatcher, frame: &Frame, index: usize, total: usize) -> f64 {
    let weight = recency_weight(index, total);
    if matcher.is_empty() {
        return weight;
    }
    let matches = matcher.count_matches(&frame_haystack(frame));
    if matches == 0 {
        return 0.0;
    }
    matches as f64 * weight
}

/// Rank `frames` against `query` and keep the best `max_results`.
///
/// Order is score descending, then timestamp ascending. Frames scoring zero
/// are dropped unless the query is empty.
pub fn rank_frames<'a>(frames: &'a [Frame], query: &str, max_results: usize) -> Vec<ScoredFrame<'a>> {
    let matcher = QueryMatcher::new(query);
    let total = frames.len();
    let mut scored: Vec<ScoredFrame<'a>> = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| ScoredFrame {
            index,
            score: score_frame(&matcher, frame, index, total),
            frame,
        })
        .filter(|scored| matcher.is_empty() || scored.score > 0.0)
        .collect();

    scored.sort_by(|left, right| {
        right
            .score
            .total_cmp(&left.score)
            .then_with(|| left.frame.timestamp.cmp(&right.frame.timestamp))
    });
    scored.truncate(max_results);
    scored
}

/// Frames that feed reconstruction, in log order (oldest first).
///
/// Falls back to the most recent `max_results` frames when ranking selects
/// nothing.
pub fn select_frames<'a>(frames: &'a [Frame], query: &str, max_results: usize) -> Vec<ScoredFrame<'a>> {
    let mut selected = rank_frames(frames, query, max_results);
    if selected.is_empty() && !frames.is_empty() {
        debug!(query, max_results, "no frame matched query, falling back to most recent");
        let start = frames.len().saturating_sub(max_results);
        selected = frames[start..]
            .iter()
            .enumerate()
            .map(|(offset, frame)| ScoredFrame {
                index: start + offset,
                score: 0.0,
                frame,
            })
            .collect();
    }
    selected.sort_by_key(|scored| scored.index);
    selected
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
