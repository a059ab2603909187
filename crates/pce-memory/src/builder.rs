//! Frame builder.
//!
//! Turns one raw user/assistant exchange into a [`Frame`] in two passes:
//!
//! 1. **Draft**: distill each field at the extraction budget and compute
//!    draft key topics from the raw texts.
//! 2. **Finalize**: re-compress the main text fields at the finalize budget,
//!    recompute key topics from the drafted fields, and normalize every list.
//!
//! The draft key topics are always discarded by finalize. Both passes are
//! kept because the smaller draft budget decides which sentences survive
//! into the fields that finalize reads.

use pce_core::{Frame, compress, dedup_preserving_order, extract_keywords};
use pce_settings::DistillSettings;
use tracing::debug;

use crate::extract::{extract_procedural, extract_project_state, extract_semantic};
use crate::rules::{classify_tags, extract_preferences};

/// Builds finalized frames from raw interaction text.
#[derive(Clone, Debug, Default)]
pub struct FrameBuilder {
    settings: DistillSettings,
}

impl FrameBuilder {
    /// Create a builder with the given budgets.
    pub fn new(settings: DistillSettings) -> Self {
        Self { settings }
    }

    /// Budgets in use.
    pub fn settings(&self) -> &DistillSettings {
        &self.settings
    }

    /// Draft and finalize a frame stamped with `timestamp`.
    ///
    /// Input is not validated here; empty messages produce a degenerate but
    /// well-formed frame.
    pub fn build(&self, user: &str, assistant: &str, timestamp: impl Into<String>) -> Frame {
        self.finalize(self.draft(user, assistant, timestamp.into()))
    }

    /// First pass: extract every field at the extraction budget.
    pub fn draft(&self, user: &str, assistant: &str, timestamp: String) -> Frame {
        let budget = self.settings.extract_max_chars;
        let semantic = extract_semantic(user, assistant, budget, self.settings.concept_keywords);
        let project_state = extract_project_state(user, assistant, budget);
        let key_topics = extract_keywords(
            [
                user,
                assistant,
                semantic.notes.as_str(),
                project_state.summary.as_str(),
            ],
            self.settings.topic_keywords,
        );

        Frame {
            timestamp,
            key_topics,
            distilled_user_intent: compress(user, budget),
            distilled_system_output: compress(assistant, budget),
            tags: classify_tags(user, assistant),
            procedural: extract_procedural(user, assistant),
            preferences: extract_preferences(user, assistant),
            semantic,
            project_state,
            raw_user_message: user.to_string(),
            raw_assistant_message: assistant.to_string(),
        }
    }

    /// Second pass: compress text fields, rebuild key topics, normalize lists.
    pub fn finalize(&self, mut frame: Frame) -> Frame {
        let budget = self.settings.finalize_max_chars;
        frame.distilled_user_intent = compress(&frame.distilled_user_intent, budget);
        frame.distilled_system_output = compress(&frame.distilled_system_output, budget);
        frame.raw_user_message = compress(&frame.raw_user_message, budget);
        frame.raw_assistant_message = compress(&frame.raw_assistant_message, budget);

        let draft_topics = std::mem::take(&mut frame.key_topics);
        frame.key_topics = extract_keywords(
            [
                frame.distilled_user_intent.as_str(),
                frame.distilled_system_output.as_str(),
                frame.semantic.notes.as_str(),
                frame.project_state.summary.as_str(),
                frame.raw_user_message.as_str(),
                frame.raw_assistant_message.as_str(),
            ],
            self.settings.topic_keywords,
        );
        debug!(
            draft = ?draft_topics,
            finalized = ?frame.key_topics,
            "recomputed key topics"
        );

        let mut tags = dedup_preserving_order(frame.tags.iter().map(|tag| tag.to_lowercase()));
        tags.sort();
        frame.tags = tags;

        frame.semantic.concepts = dedup_preserving_order(&frame.semantic.concepts);
        frame.procedural.workflows = dedup_preserving_order(&frame.procedural.workflows);
        frame.procedural.checklists = dedup_preserving_order(&frame.procedural.checklists);
        frame.project_state.pending_tasks =
            dedup_preserving_order(&frame.project_state.pending_tasks);
        frame.project_state.constraints = dedup_preserving_order(&frame.project_state.constraints);
        frame.preferences.constraints = dedup_preserving_order(&frame.preferences.constraints);
        frame
    }
}
