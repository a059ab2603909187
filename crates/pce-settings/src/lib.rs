//! # pce-settings
//!
//! Configuration with layered sources for the persistent context engine.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`PceSettings::default()`]
//! 2. **User file**: `~/.pce/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `PCE_*` overrides (highest priority)
//!
//! There is no global instance. Callers load a [`PceSettings`] value and pass
//! the relevant sections to the store and engine constructors, which keeps
//! tests free to point at temporary stores.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, deep_merge, load_settings, load_settings_from_path, read_settings_file,
    settings_path,
};
pub use types::{DistillSettings, LoggingSettings, PceSettings, RetrievalSettings, StoreSettings};
