//! Aggregate selected frames into a [`ContextBundle`].
//!
//! Frames are folded oldest to newest, so single-valued fields resolve to the
//! latest non-empty value and list fields keep first-seen order.

use pce_core::constants::MAX_NEXT_STEPS;
use pce_core::{ContextBundle, Frame, Preferences, dedup_preserving_order};

/// Prefix for the synthesized next step when no pending task exists.
pub const CONTINUE_PREFIX: &str = "Continue: ";

/// Fold `frames` (oldest first) into one bundle.
///
/// The last frame is the primary frame used for fallbacks. No frames yield
/// an all-empty bundle.
pub fn reconstruct(frames: &[Frame]) -> ContextBundle {
    let Some(primary) = frames.last() else {
        return ContextBundle::default();
    };

    let mut summary = String::new();
    let mut workstream = String::new();
    let mut pending_tasks = Vec::new();
    let mut constraints = Vec::new();
    let mut prefs = PreferencesFold::default();

    for frame in frames {
        let state = &frame.project_state;
        overwrite_if_present(&mut summary, &state.summary);
        overwrite_if_present(&mut workstream, &state.active_workstream);
        pending_tasks.extend(state.pending_tasks.iter().cloned());
        constraints.extend(state.constraints.iter().cloned());
        prefs.absorb(&frame.preferences);
    }

    let project_summary = if !summary.is_empty() {
        summary
    } else if !primary.distilled_user_intent.is_empty() {
        primary.distilled_user_intent.clone()
    } else {
        primary.key_topics.join(" | ")
    };
    let active_workstream = if workstream.is_empty() {
        primary.project_state.active_workstream.clone()
    } else {
        workstream
    };

    let pending_tasks = dedup_preserving_order(pending_tasks);
    let recommended_next_steps =
        next_steps(&pending_tasks, &active_workstream, &project_summary);

    ContextBundle {
        project_summary,
        active_workstream,
        user_prefs: prefs.finish(),
        known_constraints: dedup_preserving_order(constraints),
        recommended_next_steps,
        supporting_frames: frames.to_vec(),
    }
}

fn overwrite_if_present(slot: &mut String, value: &str) {
    if !value.is_empty() {
        value.clone_into(slot);
    }
}

fn next_steps(pending_tasks: &[String], workstream: &str, summary: &str) -> Vec<String> {
    if !pending_tasks.is_empty() {
        return pending_tasks.iter().take(MAX_NEXT_STEPS).cloned().collect();
    }
    let focus = if workstream.is_empty() { summary } else { workstream };
    if focus.is_empty() {
        Vec::new()
    } else {
        vec![format!("{CONTINUE_PREFIX}{focus}")]
    }
}

#[derive(Default)]
struct PreferencesFold {
    merged: Preferences,
    constraints: Vec<String>,
}

impl PreferencesFold {
    fn absorb(&mut self, prefs: &Preferences) {
        overwrite_if_present(&mut self.merged.style, &prefs.style);
        overwrite_if_present(&mut self.merged.tone, &prefs.tone);
        self.constraints.extend(prefs.constraints.iter().cloned());
        for (key, value) in &prefs.other {
            let _ = self.merged.other.insert(key.clone(), value.clone());
        }
    }

    fn finish(mut self) -> Preferences {
        self.merged.constraints = dedup_preserving_order(self.constraints);
        self.merged
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
