//! Rule records and their scoping data.
//!
//! A [`Rule`] is a named fragment of instruction text plus the data that
//! decides when it is injected into a system prompt: the `alwaysApply`
//! tri-state, optional glob and content patterns, and the path of the file
//! that defined it. Rules are produced by an external loader and are treated
//! as read-only here.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// PatternList
// ─────────────────────────────────────────────────────────────────────────────

/// One pattern or an ordered list of patterns.
///
/// On the wire this is either a JSON string or an array of strings. A list is
/// OR-combined by every consumer. Entries are passed to the underlying
/// matcher verbatim: a comma inside a single string is part of that pattern
/// and never splits it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    /// A single pattern string.
    One(String),
    /// Several patterns, matched with logical OR.
    Many(Vec<String>),
}

impl PatternList {
    /// Iterate over the pattern strings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns,
        };
        slice.iter().map(String::as_str)
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(patterns) => patterns.len(),
        }
    }

    /// `true` for an empty list. A present-but-empty list matches nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for PatternList {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_owned())
    }
}

impl From<String> for PatternList {
    fn from(pattern: String) -> Self {
        Self::One(pattern)
    }
}

impl From<Vec<String>> for PatternList {
    fn from(patterns: Vec<String>) -> Self {
        Self::Many(patterns)
    }
}

impl From<Vec<&str>> for PatternList {
    fn from(patterns: Vec<&str>) -> Self {
        Self::Many(patterns.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PatternList {
    fn from(patterns: [&str; N]) -> Self {
        Self::Many(patterns.iter().map(|p| (*p).to_owned()).collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RuleSource
// ─────────────────────────────────────────────────────────────────────────────

/// Where a rule came from. Informational only; never consulted when matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleSource {
    /// Inline `rules:` block of a config file.
    #[default]
    RulesBlock,
    /// Markdown rule file colocated with the code it governs.
    ColocatedMarkdown,
    /// Legacy `.continuerules` dot file.
    DotFile,
    /// Any other loader-specific tag.
    Other(String),
}

impl RuleSource {
    /// Wire representation of this source tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::RulesBlock => "rules-block",
            Self::ColocatedMarkdown => "colocated-markdown",
            Self::DotFile => ".continuerules",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RuleSource {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "rules-block" => Self::RulesBlock,
            "colocated-markdown" => Self::ColocatedMarkdown,
            ".continuerules" => Self::DotFile,
            _ => Self::Other(tag),
        }
    }
}

impl From<RuleSource> for String {
    fn from(source: RuleSource) -> Self {
        source.as_str().to_owned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule
// ─────────────────────────────────────────────────────────────────────────────

/// A behavioral rule destined for an LLM system prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Display label. Also the key for [`RulePolicies`].
    #[serde(default)]
    pub name: String,
    /// Instruction text injected verbatim into the prompt.
    pub rule: String,
    /// Provenance tag.
    #[serde(default)]
    pub source: RuleSource,
    /// `Some(true)` forces the rule on, `Some(false)` restricts it to explicit
    /// globs, `None` selects the implicit behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_apply: Option<bool>,
    /// Explicit glob scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globs: Option<PatternList>,
    /// Content patterns (regular expressions) a candidate file must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<PatternList>,
    /// Path of the file that defined the rule. Relative or URI-qualified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Rule {
    /// Create an inline rule with no scoping data.
    pub fn new(name: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: rule.into(),
            source: RuleSource::RulesBlock,
            always_apply: None,
            globs: None,
            regex: None,
            source_file: None,
            description: None,
        }
    }

    /// The instruction text.
    pub fn text(&self) -> &str {
        &self.rule
    }

    /// Set the provenance tag.
    #[must_use]
    pub fn with_source(mut self, source: RuleSource) -> Self {
        self.source = source;
        self
    }

    /// Set the `alwaysApply` flag.
    #[must_use]
    pub fn with_always_apply(mut self, always_apply: bool) -> Self {
        self.always_apply = Some(always_apply);
        self
    }

    /// Set the glob scope.
    #[must_use]
    pub fn with_globs(mut self, globs: impl Into<PatternList>) -> Self {
        self.globs = Some(globs.into());
        self
    }

    /// Set the content patterns.
    #[must_use]
    pub fn with_regex(mut self, regex: impl Into<PatternList>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    /// Set the path of the defining file.
    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Policies
// ─────────────────────────────────────────────────────────────────────────────

/// User override for a single rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulePolicy {
    /// Evaluate the rule normally.
    On,
    /// Never apply the rule.
    Off,
}

/// Policies keyed by rule name.
pub type RulePolicies = HashMap<String, RulePolicy>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
