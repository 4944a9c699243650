//! Applicable rule resolution for one conversation turn.

use tenet_core::{ContextItem, Rule};

use crate::candidates::CandidatePaths;
use crate::decider::Decision;
use crate::engine::RuleEngine;

impl RuleEngine {
    /// Rules that apply to this turn, in input order.
    ///
    /// Candidate paths come from the message's code block headers and the
    /// file references of `context_items`. Either may be empty.
    pub fn applicable_rules<'a>(
        &self,
        message: Option<&str>,
        rules: &'a [Rule],
        context_items: &[ContextItem],
    ) -> Vec<&'a Rule> {
        let candidates = CandidatePaths::from_turn(message, context_items);
        rules
            .iter()
            .filter(|rule| self.should_apply_rule(rule, &candidates))
            .collect()
    }

    /// Every rule paired with its decision, in input order.
    pub fn explain<'a>(
        &self,
        message: Option<&str>,
        rules: &'a [Rule],
        context_items: &[ContextItem],
    ) -> Vec<(&'a Rule, Decision)> {
        let candidates = CandidatePaths::from_turn(message, context_items);
        rules
            .iter()
            .map(|rule| (rule, self.evaluate(rule, &candidates)))
            .collect()
    }
}

/// [`RuleEngine::applicable_rules`] with the default engine.
pub fn get_applicable_rules<'a>(
    message: Option<&str>,
    rules: &'a [Rule],
    context_items: &[ContextItem],
) -> Vec<&'a Rule> {
    RuleEngine::default().applicable_rules(message, rules, context_items)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
