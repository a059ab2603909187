//! Rule tables for tag and preference classification.
//!
//! Each table is an ordered list of (trigger keywords, effect) pairs applied
//! top to bottom over the lowercased interaction text. Every rule is checked;
//! for single-valued fields a later matching rule overwrites an earlier one.

use pce_core::Preferences;

/// Tag applied when no other tag rule matches.
pub const FALLBACK_TAG: &str = "general";

struct TagRule {
    tag: &'static str,
    triggers: &'static [&'static str],
}

const TAG_RULES: &[TagRule] = &[
    TagRule {
        tag: "tech",
        triggers: &["code", "api", "schema", "algorithm", "implementation", "stack", "bug"],
    },
    TagRule {
        tag: "plan",
        triggers: &["plan", "roadmap", "milestone", "schedule", "timeline", "next steps"],
    },
    TagRule {
        tag: "meta",
        triggers: &["think", "reflect", "meta", "why", "philosophy", "epistemology"],
    },
];

#[derive(Clone, Copy)]
enum PreferenceEffect {
    Style(&'static str),
    Tone(&'static str),
    Constraint(&'static str),
}

struct PreferenceRule {
    triggers: &'static [&'static str],
    effect: PreferenceEffect,
}

const PREFERENCE_RULES: &[PreferenceRule] = &[
    PreferenceRule {
        triggers: &["concise", "short answer"],
        effect: PreferenceEffect::Style("concise"),
    },
    PreferenceRule {
        triggers: &["detailed", "step-by-step"],
        effect: PreferenceEffect::Style("detailed"),
    },
    PreferenceRule {
        triggers: &["casual"],
        effect: PreferenceEffect::Tone("casual"),
    },
    PreferenceRule {
        triggers: &["formal"],
        effect: PreferenceEffect::Tone("formal"),
    },
    PreferenceRule {
        triggers: &["no code"],
        effect: PreferenceEffect::Constraint("avoid code unless requested"),
    },
    PreferenceRule {
        triggers: &["no examples"],
        effect: PreferenceEffect::Constraint("avoid examples unless requested"),
    },
];

fn interaction_text(user: &str, assistant: &str) -> String {
    format!("{user} {assistant}").to_lowercase()
}

fn triggered(text: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|trigger| text.contains(trigger))
}

/// Classify an interaction into `tech`, `plan`, `meta`, or `general`.
///
/// Tags come back in rule order; several may apply at once.
pub fn classify_tags(user: &str, assistant: &str) -> Vec<String> {
    let text = interaction_text(user, assistant);
    let mut tags: Vec<String> = TAG_RULES
        .iter()
        .filter(|rule| triggered(&text, rule.triggers))
        .map(|rule| rule.tag.to_string())
        .collect();
    if tags.is_empty() {
        tags.push(FALLBACK_TAG.to_string());
    }
    tags
}

/// Extract stable user preferences from an interaction.
pub fn extract_preferences(user: &str, assistant: &str) -> Preferences {
    let text = interaction_text(user, assistant);
    let mut preferences = Preferences::default();
    for rule in PREFERENCE_RULES {
        if !triggered(&text, rule.triggers) {
            continue;
        }
        match rule.effect {
            PreferenceEffect::Style(style) => preferences.style = style.to_string(),
            PreferenceEffect::Tone(tone) => preferences.tone = tone.to_string(),
            PreferenceEffect::Constraint(constraint) => {
                preferences.constraints.push(constraint.to_string());
            }
        }
    }
    preferences
}
