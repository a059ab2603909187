//! Frame and context bundle types.
//!
//! A [`Frame`] is one distilled user/assistant interaction. Frames are plain
//! value types: every field defaults to empty on deserialization, so records
//! written by older or newer versions still load. All types write `camelCase`
//! keys; multi-word fields also accept their `snake_case` spelling, which is
//! how logs from the earlier tooling were written.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Long-lived conceptual information extracted from an interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SemanticMemory {
    /// High-signal keywords of the exchange.
    pub concepts: Vec<String>,
    /// Compressed assistant response.
    pub notes: String,
}

/// Repeatable "how-to" knowledge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProceduralMemory {
    /// Step-like lines found in the exchange.
    pub workflows: Vec<String>,
    /// Reserved. No extraction rule populates it.
    pub checklists: Vec<String>,
}

/// Snapshot of the project being worked on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectState {
    /// Name taken from an explicit `project:` marker.
    #[serde(alias = "project_name")]
    pub project_name: String,
    /// Compressed user intent.
    pub summary: String,
    /// Set when the user describes what they are doing right now.
    #[serde(alias = "active_workstream")]
    pub active_workstream: String,
    /// Outstanding work items.
    #[serde(alias = "pending_tasks")]
    pub pending_tasks: Vec<String>,
    /// Project-level constraints.
    pub constraints: Vec<String>,
}

/// User preferences that persist across sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Answer style (`concise`, `detailed`).
    pub style: String,
    /// Answer tone (`casual`, `formal`).
    pub tone: String,
    /// Standing instructions such as "avoid code unless requested".
    pub constraints: Vec<String>,
    /// Free-form preferences; later frames overwrite earlier keys.
    pub other: BTreeMap<String, String>,
}

/// One persisted, distilled interaction.
///
/// Created once by the frame builder, compressed, and appended to the store.
/// Never edited afterwards; pruning removes whole frames.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frame {
    /// ISO-8601 UTC timestamp with second precision (`2025-01-31T09:15:00Z`).
    pub timestamp: String,
    /// Up to twelve keywords, most frequent first.
    #[serde(alias = "key_topics")]
    pub key_topics: Vec<String>,
    /// Compressed user message.
    #[serde(alias = "distilled_user_intent")]
    pub distilled_user_intent: String,
    /// Compressed assistant message.
    #[serde(alias = "distilled_system_output")]
    pub distilled_system_output: String,
    /// Category labels, sorted and deduplicated.
    pub tags: Vec<String>,
    /// Semantic memory.
    pub semantic: SemanticMemory,
    /// Procedural memory.
    pub procedural: ProceduralMemory,
    /// Project state.
    #[serde(alias = "project_state")]
    pub project_state: ProjectState,
    /// User preferences.
    pub preferences: Preferences,
    /// Compressed original user text, kept for audit.
    #[serde(alias = "raw_user_message")]
    pub raw_user_message: String,
    /// Compressed original assistant text, kept for audit.
    #[serde(alias = "raw_assistant_message")]
    pub raw_assistant_message: String,
}

/// Context reconstructed from stored frames.
///
/// Ephemeral: recomputed on every load and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextBundle {
    /// Latest known project summary.
    #[serde(alias = "project_summary")]
    pub project_summary: String,
    /// Latest known active workstream.
    #[serde(alias = "active_workstream")]
    pub active_workstream: String,
    /// Preferences aggregated across contributing frames.
    #[serde(alias = "user_prefs")]
    pub user_prefs: Preferences,
    /// Union of project constraints.
    #[serde(alias = "known_constraints")]
    pub known_constraints: Vec<String>,
    /// At most five suggested next steps.
    #[serde(alias = "recommended_next_steps")]
    pub recommended_next_steps: Vec<String>,
    /// Contributing frames, oldest first.
    #[serde(alias = "supporting_frames")]
    pub supporting_frames: Vec<Frame>,
}

impl ContextBundle {
    /// Whether no frame contributed to this bundle.
    pub fn is_empty(&self) -> bool {
        self.supporting_frames.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
