//! Package-level constants and pipeline defaults.

/// Current version of the engine (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = "pce";

/// Character budget for distilled fields at extraction time.
pub const EXTRACT_MAX_CHARS: usize = 400;

/// Character budget applied when a frame is finalized.
pub const FINALIZE_MAX_CHARS: usize = 600;

/// Number of semantic concepts kept per frame.
pub const CONCEPT_KEYWORDS: usize = 8;

/// Number of key topics kept per frame.
pub const TOPIC_KEYWORDS: usize = 12;

/// Frames kept in the store before the oldest are pruned.
pub const MAX_STORED_FRAMES: usize = 300;

/// Frames aggregated by a query load.
pub const LOAD_MAX_FRAMES: usize = 12;

/// Frames aggregated by a full summary.
pub const SUMMARY_MAX_FRAMES: usize = 20;

/// Maximum recommended next steps in a bundle.
pub const MAX_NEXT_STEPS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "VERSION must be semver (MAJOR.MINOR.PATCH)");
        for part in parts {
            let _: u32 = part.parse().expect("each semver segment must be a number");
        }
    }

    #[test]
    fn name_is_lowercase() {
        assert_eq!(NAME, NAME.to_lowercase());
    }
}
