//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TenetSettings::default()`]
//! 2. If `~/.tenet/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TenetSettings;

/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TENET_LOG_LEVEL";

/// Environment variable overriding `rules.rootConfigDirs` (comma-separated).
pub const ENV_ROOT_CONFIG_DIRS: &str = "TENET_ROOT_CONFIG_DIRS";

/// Resolve the path to the settings file (`~/.tenet/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".tenet").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TenetSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON or invalid values, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<TenetSettings> {
    let defaults = serde_json::to_value(TenetSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: TenetSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning (file/default value is kept).
pub fn apply_env_overrides(settings: &mut TenetSettings) {
    if let Some(v) = read_env_string(ENV_LOG_LEVEL) {
        settings.logging.level = v;
    }
    if let Some(v) = read_env_string(ENV_ROOT_CONFIG_DIRS) {
        match parse_dir_list(&v) {
            Some(dirs) => settings.rules.root_config_dirs = dirs,
            None => {
                tracing::warn!(key = ENV_ROOT_CONFIG_DIRS, value = %v, "invalid directory list env var, ignoring");
            }
        }
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a comma-separated list of directory names.
///
/// Empty entries are dropped. Returns `None` when nothing remains or an
/// entry contains a path separator.
pub fn parse_dir_list(val: &str) -> Option<Vec<String>> {
    let dirs: Vec<String> = val
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_owned)
        .collect();
    if dirs.is_empty() || dirs.iter().any(|d| d.contains('/') || d.contains('\\')) {
        return None;
    }
    Some(dirs)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
