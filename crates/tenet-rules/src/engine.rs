//! Rule engine: a root locator plus rule policies.
//!
//! The engine holds no per-turn state. Cloning is cheap and one engine can
//! serve any number of turns concurrently.

use std::fmt;
use std::sync::Arc;

use tenet_core::{Rule, RulePolicies};
use tenet_settings::RulesSettings;

use crate::candidates::CandidatePaths;
use crate::decider::{Decision, decide};
use crate::root_locator::{ConfigDirLocator, RootLocator};

/// Evaluates rules against candidate paths.
#[derive(Clone)]
pub struct RuleEngine {
    locator: Arc<dyn RootLocator>,
    policies: RulePolicies,
}

impl RuleEngine {
    /// Engine with the default `.continue` locator and no policies.
    pub fn new() -> Self {
        Self {
            locator: Arc::new(ConfigDirLocator::default()),
            policies: RulePolicies::new(),
        }
    }

    /// Engine configured from rule settings.
    pub fn from_settings(settings: &RulesSettings) -> Self {
        Self {
            locator: Arc::new(ConfigDirLocator::from_settings(settings)),
            policies: settings.rule_policies.clone(),
        }
    }

    /// Replace the root locator.
    #[must_use]
    pub fn with_locator(mut self, locator: impl RootLocator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    /// Replace the rule policies.
    #[must_use]
    pub fn with_policies(mut self, policies: RulePolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Active rule policies.
    pub fn policies(&self) -> &RulePolicies {
        &self.policies
    }

    /// Evaluate one rule.
    pub fn evaluate(&self, rule: &Rule, candidates: &CandidatePaths) -> Decision {
        decide(rule, candidates, &self.policies, self.locator.as_ref())
    }

    /// `true` if `rule` applies to `candidates`.
    pub fn should_apply_rule(&self, rule: &Rule, candidates: &CandidatePaths) -> bool {
        self.evaluate(rule, candidates).applies
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
