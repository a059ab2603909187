//! Field extractors used while drafting a frame.
//!
//! All extractors are total: unmatched input produces empty fields.

use pce_core::{ProceduralMemory, ProjectState, SemanticMemory, compress, extract_keywords};

const STEP_PREFIXES: &[&str] = &["step ", "1.", "2.", "3.", "first", "second", "third"];

const PROJECT_MARKERS: &[&str] = &["project:", "project name:"];

const WORKSTREAM_MARKERS: &[&str] = &["currently", "right now"];

fn combined_lines(user: &str, assistant: &str) -> String {
    format!("{user}\n{assistant}")
}

/// Concepts from both messages, notes from the compressed assistant reply.
pub fn extract_semantic(
    user: &str,
    assistant: &str,
    max_chars: usize,
    max_concepts: usize,
) -> SemanticMemory {
    SemanticMemory {
        concepts: extract_keywords([user, assistant], max_concepts),
        notes: compress(assistant, max_chars),
    }
}

/// Collect step-like lines (`Step 2: ...`, `1. ...`, `First, ...`).
///
/// Bullet markers and surrounding whitespace are stripped from each line.
/// Checklists are never populated.
pub fn extract_procedural(user: &str, assistant: &str) -> ProceduralMemory {
    let combined = combined_lines(user, assistant);
    let workflows = combined
        .lines()
        .map(|line| line.trim_matches(|c| matches!(c, '-' | '*' | '•' | ' ' | '\t')))
        .filter(|line| {
            let lower = line.to_lowercase();
            STEP_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
        })
        .map(str::to_string)
        .collect();
    ProceduralMemory {
        workflows,
        checklists: Vec::new(),
    }
}

/// Find an explicit project name (`project: Orion`, `Project name: Orion`).
///
/// Lines are scanned in order; on each line `project:` is tried before
/// `project name:`. The first non-empty remainder wins.
pub fn extract_project_name(user: &str, assistant: &str) -> String {
    let combined = combined_lines(user, assistant);
    for line in combined.lines() {
        // ASCII lowercasing keeps byte offsets aligned with `line`.
        let lower = line.to_ascii_lowercase();
        for marker in PROJECT_MARKERS {
            if let Some(pos) = lower.find(marker) {
                let name = line[pos + marker.len()..].trim();
                if !name.is_empty() {
                    return name.to_string();
                }
            }
        }
    }
    String::new()
}

/// Draft project state for one interaction.
///
/// The summary is the compressed user intent. It doubles as the active
/// workstream when the user says what they are doing `currently` or
/// `right now`.
pub fn extract_project_state(user: &str, assistant: &str, max_chars: usize) -> ProjectState {
    let summary = compress(user, max_chars);
    let user_lower = user.to_lowercase();
    let active_workstream = if WORKSTREAM_MARKERS
        .iter()
        .any(|marker| user_lower.contains(marker))
    {
        summary.clone()
    } else {
        String::new()
    };

    ProjectState {
        project_name: extract_project_name(user, assistant),
        summary,
        active_workstream,
        pending_tasks: Vec::new(),
        constraints: Vec::new(),
    }
}
