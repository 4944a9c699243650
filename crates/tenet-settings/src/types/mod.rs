//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON wire
//! format and `#[serde(default)]` so partial files are accepted: missing
//! fields get their compiled default during deserialization.

mod logging;
mod rules;

pub use logging::*;
pub use rules::*;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Root settings type.
///
/// Loaded from `~/.tenet/settings.json` with defaults applied for missing
/// fields. Example:
///
/// ```json
/// {
///   "rules": {
///     "rootConfigDirs": [".continue", ".tenet"],
///     "rulePolicies": { "Legacy Rule": "off" }
///   },
///   "logging": { "level": "debug" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenetSettings {
    /// Settings schema version.
    pub version: String,
    /// Rule engine settings.
    pub rules: RulesSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for TenetSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            rules: RulesSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl TenetSettings {
    /// Check every section for values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()
    }
}
