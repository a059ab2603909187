//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a settings
//! file may name any subset of fields and the rest keep their defaults.

use std::path::PathBuf;

use pce_core::constants::{
    CONCEPT_KEYWORDS, EXTRACT_MAX_CHARS, FINALIZE_MAX_CHARS, LOAD_MAX_FRAMES, MAX_STORED_FRAMES,
    SUMMARY_MAX_FRAMES, TOPIC_KEYWORDS,
};
use pce_core::logging::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// ```json
/// {
///   "store": { "path": "memory/context.jsonl", "maxFrames": 300 },
///   "retrieval": { "loadMaxFrames": 12 }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PceSettings {
    /// Frame log location and retention.
    pub store: StoreSettings,
    /// Retrieval caps.
    pub retrieval: RetrievalSettings,
    /// Distillation budgets.
    pub distill: DistillSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl PceSettings {
    /// Reject values that would make the pipeline degenerate.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("store.maxFrames", self.store.max_frames),
            ("retrieval.loadMaxFrames", self.retrieval.load_max_frames),
            ("retrieval.summaryMaxFrames", self.retrieval.summary_max_frames),
            ("distill.extractMaxChars", self.distill.extract_max_chars),
            ("distill.finalizeMaxChars", self.distill.finalize_max_chars),
            ("distill.topicKeywords", self.distill.topic_keywords),
        ];
        for (key, value) in checks {
            if value == 0 {
                return Err(SettingsError::InvalidValue {
                    key,
                    reason: "must be at least 1",
                });
            }
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue {
                key: "store.path",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

/// Frame log settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// JSONL file holding one frame per line.
    pub path: PathBuf,
    /// Frames kept before the oldest are pruned.
    pub max_frames: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("memory").join("context.jsonl"),
            max_frames: MAX_STORED_FRAMES,
        }
    }
}

/// Retrieval settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievalSettings {
    /// Frames aggregated by `load`.
    pub load_max_frames: usize,
    /// Frames aggregated by `summarize`.
    pub summary_max_frames: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            load_max_frames: LOAD_MAX_FRAMES,
            summary_max_frames: SUMMARY_MAX_FRAMES,
        }
    }
}

/// Frame distillation budgets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistillSettings {
    /// Character budget at extraction time.
    pub extract_max_chars: usize,
    /// Character budget when the frame is finalized.
    pub finalize_max_chars: usize,
    /// Semantic concepts kept per frame.
    pub concept_keywords: usize,
    /// Key topics kept per frame.
    pub topic_keywords: usize,
}

impl Default for DistillSettings {
    fn default() -> Self {
        Self {
            extract_max_chars: EXTRACT_MAX_CHARS,
            finalize_max_chars: FINALIZE_MAX_CHARS,
            concept_keywords: CONCEPT_KEYWORDS,
            topic_keywords: TOPIC_KEYWORDS,
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive (`RUST_LOG` still wins).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_constants() {
        let settings = PceSettings::default();
        assert_eq!(settings.store.path, PathBuf::from("memory/context.jsonl"));
        assert_eq!(settings.store.max_frames, 300);
        assert_eq!(settings.retrieval.load_max_frames, 12);
        assert_eq!(settings.retrieval.summary_max_frames, 20);
        assert_eq!(settings.distill.extract_max_chars, 400);
        assert_eq!(settings.distill.finalize_max_chars, 600);
        assert_eq!(settings.distill.concept_keywords, 8);
        assert_eq!(settings.distill.topic_keywords, 12);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn defaults_validate() {
        assert!(PceSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut settings = PceSettings::default();
        settings.store.max_frames = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("store.maxFrames"));
    }

    #[test]
    fn empty_store_path_is_rejected() {
        let mut settings = PceSettings::default();
        settings.store.path = PathBuf::new();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue {
                key: "store.path",
                ..
            })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: PceSettings =
            serde_json::from_str(r#"{"store": {"maxFrames": 50}}"#).unwrap();
        assert_eq!(settings.store.max_frames, 50);
        assert_eq!(settings.store.path, PathBuf::from("memory/context.jsonl"));
        assert_eq!(settings.retrieval, RetrievalSettings::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(PceSettings::default()).unwrap();
        assert_eq!(json["retrieval"]["loadMaxFrames"], 12);
        assert_eq!(json["distill"]["finalizeMaxChars"], 600);
    }
}
