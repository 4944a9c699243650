//! Rule engine settings.

use serde::{Deserialize, Serialize};
use tenet_core::RulePolicies;

use crate::errors::{Result, SettingsError};

/// Directory names treated as root configuration locations by default.
pub const DEFAULT_ROOT_CONFIG_DIRS: &[&str] = &[".continue"];

/// Settings consumed by the rule applicability engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesSettings {
    /// Directory names whose rule files are global rather than colocated.
    pub root_config_dirs: Vec<String>,
    /// Per-rule on/off overrides keyed by rule name.
    pub rule_policies: RulePolicies,
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            root_config_dirs: DEFAULT_ROOT_CONFIG_DIRS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
            rule_policies: RulePolicies::new(),
        }
    }
}

impl RulesSettings {
    /// Root directory entries must be single, non-empty path components.
    pub fn validate(&self) -> Result<()> {
        for (i, dir) in self.root_config_dirs.iter().enumerate() {
            if dir.trim().is_empty() {
                return Err(SettingsError::InvalidValue(format!(
                    "rules.rootConfigDirs[{i}] is empty"
                )));
            }
            if dir.contains('/') || dir.contains('\\') {
                return Err(SettingsError::InvalidValue(format!(
                    "rules.rootConfigDirs[{i}] must be a directory name, got {dir:?}"
                )));
            }
        }
        Ok(())
    }
}
