//! Plain-text reports for saved frames and reconstructed bundles.

use std::fmt::Write;

use pce_core::{ContextBundle, Frame};

const NONE: &str = "(none)";
const UNSPECIFIED: &str = "(unspecified)";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Summary printed after a successful save.
pub fn render_saved(frame: &Frame, stored: usize) -> String {
    let mut out = String::from("Saved frame:\n");
    let _ = writeln!(out, "  timestamp: {}", frame.timestamp);
    let _ = writeln!(out, "  tags: {}", frame.tags.join(", "));
    let _ = writeln!(out, "  key_topics: {}", frame.key_topics.join(", "));
    let _ = writeln!(out, "  distilled_user_intent: {}", frame.distilled_user_intent);
    let _ = writeln!(out, "  distilled_system_output: {}", frame.distilled_system_output);
    let _ = writeln!(out, "Frames stored: {stored}");
    out
}

/// Human-readable view of a reconstructed bundle.
pub fn render_bundle(bundle: &ContextBundle) -> String {
    let prefs = &bundle.user_prefs;
    let constraints = if bundle.known_constraints.is_empty() {
        NONE.to_string()
    } else {
        bundle.known_constraints.join(", ")
    };

    let mut out = String::from("=== Reconstructed Context ===\n");
    let _ = writeln!(out, "Project summary   : {}", bundle.project_summary);
    let _ = writeln!(out, "Active workstream : {}", bundle.active_workstream);
    let _ = writeln!(out, "Known constraints : {constraints}");
    let _ = writeln!(out, "User style        : {}", or_placeholder(&prefs.style, UNSPECIFIED));
    let _ = writeln!(out, "User tone         : {}", or_placeholder(&prefs.tone, UNSPECIFIED));
    push_list(&mut out, "User constraints  :", &prefs.constraints);
    push_list(&mut out, "Recommended next steps:", &bundle.recommended_next_steps);

    let _ = writeln!(out, "\nSupporting frames: {}", bundle.supporting_frames.len());
    for (position, frame) in bundle.supporting_frames.iter().enumerate() {
        let _ = writeln!(out, "--- Frame {} ---", position + 1);
        let _ = writeln!(out, "timestamp: {}", frame.timestamp);
        let _ = writeln!(out, "tags     : {}", frame.tags.join(", "));
        let _ = writeln!(out, "topics   : {}", frame.key_topics.join(", "));
        let _ = writeln!(out, "user     : {}", frame.distilled_user_intent);
        let _ = writeln!(out, "assistant: {}", frame.distilled_system_output);
        out.push('\n');
    }
    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            timestamp: "2025-01-31T09:15:00Z".to_string(),
            key_topics: vec!["database".to_string(), "orion".to_string()],
            distilled_user_intent: "Migrate the database.".to_string(),
            distilled_system_output: "Back it up first.".to_string(),
            tags: vec!["plan".to_string(), "tech".to_string()],
            ..Frame::default()
        }
    }

    #[test]
    fn saved_report_lists_frame_fields() {
        let report = render_saved(&frame(), 3);
        assert!(report.starts_with("Saved frame:\n"));
        assert!(report.contains("  tags: plan, tech\n"));
        assert!(report.contains("  key_topics: database, orion\n"));
        assert!(report.ends_with("Frames stored: 3\n"));
    }

    #[test]
    fn empty_bundle_uses_placeholders() {
        let report = render_bundle(&ContextBundle::default());
        assert!(report.contains("Known constraints : (none)\n"));
        assert!(report.contains("User style        : (unspecified)\n"));
        assert!(report.contains("User tone         : (unspecified)\n"));
        assert!(!report.contains("Recommended next steps:"));
        assert!(report.contains("Supporting frames: 0\n"));
    }

    #[test]
    fn bundle_report_lists_steps_and_frames() {
        let mut bundle = ContextBundle {
            project_summary: "Migrate the database.".to_string(),
            known_constraints: vec!["no downtime".to_string(), "eu only".to_string()],
            recommended_next_steps: vec!["Continue: Migrate the database.".to_string()],
            supporting_frames: vec![frame(), frame()],
            ..ContextBundle::default()
        };
        bundle.user_prefs.style = "concise".to_string();
        bundle.user_prefs.constraints = vec!["avoid code unless requested".to_string()];

        let report = render_bundle(&bundle);
        assert!(report.contains("Known constraints : no downtime, eu only\n"));
        assert!(report.contains("User style        : concise\n"));
        assert!(report.contains("User constraints  :\n  - avoid code unless requested\n"));
        assert!(report.contains("Recommended next steps:\n  - Continue: Migrate the database.\n"));
        assert!(report.contains("--- Frame 1 ---"));
        assert!(report.contains("--- Frame 2 ---"));
        assert!(report.contains("user     : Migrate the database.\n"));
    }
}
