//! System message composition.
//!
//! The composed message is the base system message followed by the text of
//! every applicable rule, each preceded by a blank line. When no rule applies
//! the base message is returned unchanged.

use serde::Serialize;
use tenet_core::{ContextItem, Rule};

use crate::constants::RULE_SEPARATOR;
use crate::engine::RuleEngine;

/// Inputs for one composition.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemMessageRequest<'a> {
    /// Base system message. Treated as empty when absent.
    pub base_system_message: Option<&'a str>,
    /// Triggering user message, already rendered to plain text.
    pub user_message: Option<&'a str>,
    /// Items attached to the turn.
    pub context_items: &'a [ContextItem],
    /// Rule catalog.
    pub rules: &'a [Rule],
}

/// A composed system message and the rules that went into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedSystemMessage<'a> {
    /// Final prompt text.
    pub system_message: String,
    /// Applied rules, in catalog order.
    pub applied_rules: Vec<&'a Rule>,
}

impl RuleEngine {
    /// Compose the system message for `request`.
    pub fn compose<'a>(&self, request: &SystemMessageRequest<'a>) -> ComposedSystemMessage<'a> {
        let applied_rules =
            self.applicable_rules(request.user_message, request.rules, request.context_items);
        let system_message =
            append_rules(request.base_system_message.unwrap_or_default(), &applied_rules);
        ComposedSystemMessage {
            system_message,
            applied_rules,
        }
    }

    /// Base message plus applicable rule texts, with paths taken from
    /// `user_message` only.
    pub fn system_message_with_rules(
        &self,
        base_system_message: Option<&str>,
        user_message: Option<&str>,
        rules: &[Rule],
    ) -> String {
        self.compose(&SystemMessageRequest {
            base_system_message,
            user_message,
            context_items: &[],
            rules,
        })
        .system_message
    }
}

/// [`RuleEngine::system_message_with_rules`] with the default engine.
pub fn system_message_with_rules(
    base_system_message: Option<&str>,
    user_message: Option<&str>,
    rules: &[Rule],
) -> String {
    RuleEngine::default().system_message_with_rules(base_system_message, user_message, rules)
}

fn append_rules(base: &str, rules: &[&Rule]) -> String {
    let mut message = base.to_owned();
    for rule in rules {
        message.push_str(RULE_SEPARATOR);
        message.push_str(rule.text());
    }
    message
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
