//! # tenet-core
//!
//! Foundation types and logging for the tenet rule engine.
//!
//! This crate provides the shared vocabulary the other tenet crates depend on:
//!
//! - **Rules**: [`Rule`] records as supplied by a rule loader, with their
//!   [`PatternList`] scoping data and [`RuleSource`] provenance tag
//! - **Policies**: [`RulePolicy`] per-rule on/off switches
//! - **Context items**: [`ContextItem`] attachments that may reference a file
//! - **Logging**: `tracing` subscriber setup and log capture for tests

#![deny(unsafe_code)]

pub mod context;
pub mod logging;
pub mod rule;

pub use context::{ContextItem, ContextItemUri, UriKind};
pub use rule::{PatternList, Rule, RulePolicies, RulePolicy, RuleSource};
