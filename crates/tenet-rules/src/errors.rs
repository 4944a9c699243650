//! Error types for rule pattern compilation.
//!
//! None of these reach callers of the engine: a pattern that fails to
//! compile is logged and then behaves as a pattern that matches nothing.

use thiserror::Error;

/// A rule pattern that could not be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Glob syntax error.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Glob {
        /// The pattern as written in the rule.
        pattern: String,
        /// Underlying parser error.
        #[source]
        source: globset::Error,
    },

    /// Regex syntax error.
    #[error("invalid regex pattern {pattern:?}: {source}")]
    Regex {
        /// The pattern as written in the rule.
        pattern: String,
        /// Underlying parser error.
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    /// The pattern as written in the rule.
    pub fn pattern(&self) -> &str {
        match self {
            Self::Glob { pattern, .. } | Self::Regex { pattern, .. } => pattern,
        }
    }
}
