//! Global vs. colocated classification of a rule's defining file.
//!
//! A rule authored inside a root configuration directory (`.continue/` by
//! default) is global. A rule authored anywhere else is scoped to the
//! directory that holds its file.

use tenet_core::Rule;
use tenet_settings::RulesSettings;
use tenet_settings::types::DEFAULT_ROOT_CONFIG_DIRS;

use crate::path::{parent_dir, segments};

/// Decides whether a rule file lives in a root configuration location.
pub trait RootLocator: Send + Sync {
    /// `true` if `origin_path` is a root configuration location.
    fn is_root_configuration(&self, origin_path: &str) -> bool;
}

impl<F> RootLocator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_root_configuration(&self, origin_path: &str) -> bool {
        self(origin_path)
    }
}

/// Root locator keyed on directory names.
///
/// An origin is root configuration when any directory component of its
/// parent path equals one of the configured names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigDirLocator {
    dirs: Vec<String>,
}

impl ConfigDirLocator {
    /// Locator for the given directory names.
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Locator for `settings.root_config_dirs`.
    pub fn from_settings(settings: &RulesSettings) -> Self {
        Self::new(settings.root_config_dirs.iter().cloned())
    }

    /// Configured directory names.
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }
}

impl Default for ConfigDirLocator {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_CONFIG_DIRS.iter().copied())
    }
}

impl RootLocator for ConfigDirLocator {
    fn is_root_configuration(&self, origin_path: &str) -> bool {
        let parent = parent_dir(origin_path);
        segments(&parent).any(|component| self.dirs.iter().any(|d| d == component))
    }
}

/// Implicit scope of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleScope {
    /// No directory boundary.
    Global,
    /// Scoped to the normalized directory holding the rule file. Empty for
    /// the repository root.
    Directory(String),
}

/// Implicit scope of `rule` under `locator`.
///
/// Inline rules (no `source_file`) are global.
pub fn rule_scope(rule: &Rule, locator: &dyn RootLocator) -> RuleScope {
    match rule.source_file.as_deref().map(str::trim) {
        None | Some("") => RuleScope::Global,
        Some(origin) if locator.is_root_configuration(origin) => RuleScope::Global,
        Some(origin) => RuleScope::Directory(parent_dir(origin)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
