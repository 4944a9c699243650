//! # tenet-rules
//!
//! Rule applicability engine. Given a rule catalog and the file paths
//! relevant to a conversation turn, decides which rules are active and
//! appends their text to the system message.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`path_extractor`] | Code block scanning and file path extraction from message text |
//! | [`path_matcher`] | Glob, directory colocation and content matching |
//! | [`root_locator`] | Global vs. colocated classification of rule files |
//! | [`candidates`] | Per-turn candidate path set |
//! | [`decider`] | Per-rule applicability decision |
//! | [`engine`] | `RuleEngine` (locator + policies) |
//! | [`resolver`] | Applicable rules for a turn |
//! | [`composer`] | System message composition |
//!
//! Nothing in the engine returns an error. Malformed patterns are logged and
//! match nothing; unusable inputs lead to "rule does not apply".

#![deny(unsafe_code)]

pub mod candidates;
pub mod composer;
pub mod constants;
pub mod decider;
pub mod engine;
pub mod errors;
pub mod path;
pub mod path_extractor;
pub mod path_matcher;
pub mod resolver;
pub mod root_locator;

pub use candidates::CandidatePaths;
pub use composer::{ComposedSystemMessage, SystemMessageRequest, system_message_with_rules};
pub use decider::{Decision, Reason, decide, should_apply_rule};
pub use engine::RuleEngine;
pub use errors::PatternError;
pub use path_extractor::{CodeBlock, extract_code_blocks, extract_paths_from_message};
pub use path_matcher::{glob_matches, path_is_under_directory};
pub use resolver::get_applicable_rules;
pub use root_locator::{ConfigDirLocator, RootLocator, RuleScope, rule_scope};
