//! # tenet-settings
//!
//! Layered configuration for the tenet rule engine.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`TenetSettings::default()`]
//! 2. **User file** — `~/.tenet/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `TENET_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<TenetSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.tenet/settings.json` with env var
/// overrides. If loading fails, falls back to compiled defaults.
pub fn get_settings() -> &'static TenetSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            TenetSettings::default()
        })
    })
}

/// Initialize the global settings with a specific value.
///
/// Returns the provided settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: TenetSettings) -> std::result::Result<(), TenetSettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
