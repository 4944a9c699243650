//! Rule applicability decision.
//!
//! Evaluated in priority order:
//!
//! | Policy | `alwaysApply` | `globs` | Origin    | Applies when                                  |
//! |--------|---------------|---------|-----------|-----------------------------------------------|
//! | off    | any           | any     | any       | never                                         |
//! |        | `true`        | ignored | any       | always                                        |
//! |        | `false`       | absent  | any       | never                                         |
//! |        | `false`       | present | any       | a path matches a glob                         |
//! |        | unset         | absent  | root      | always                                        |
//! |        | unset         | absent  | directory | a path is under the directory                 |
//! |        | unset         | present | directory | a path is under the directory and matches     |
//! |        | unset         | present | root      | a path matches a glob                         |
//!
//! When the rule carries content patterns, every row except `alwaysApply:
//! true` additionally requires the matching path's content to match one of
//! them. A root rule without globs then applies only if some path's content
//! matches.

use std::fmt;

use tenet_core::{Rule, RulePolicies, RulePolicy};
use tracing::debug;

use crate::candidates::CandidatePaths;
use crate::path_matcher::{ContentPatterns, GlobScope, path_is_under_directory};
use crate::root_locator::{ConfigDirLocator, RootLocator, RuleScope, rule_scope};

/// Why a rule was or was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    /// Disabled by a rule policy.
    PolicyOff,
    /// `alwaysApply: true`.
    AlwaysApply,
    /// `alwaysApply: false` with nothing to match.
    OptedOutWithoutGlobs,
    /// `alwaysApply: false` with globs.
    ExplicitGlobs,
    /// Root configuration rule without globs.
    Global,
    /// Colocated rule without globs.
    Directory,
    /// Colocated rule with globs.
    DirectoryGlobs,
    /// Root configuration rule with globs.
    RootGlobs,
}

impl Reason {
    /// Short label used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PolicyOff => "policy off",
            Self::AlwaysApply => "always apply",
            Self::OptedOutWithoutGlobs => "opted out without globs",
            Self::ExplicitGlobs => "explicit globs",
            Self::Global => "global",
            Self::Directory => "directory",
            Self::DirectoryGlobs => "directory and globs",
            Self::RootGlobs => "root globs",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one rule against one candidate set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Whether the rule is active for this turn.
    pub applies: bool,
    /// Branch of the decision table that produced `applies`.
    pub reason: Reason,
}

impl Decision {
    fn new(applies: bool, reason: Reason) -> Self {
        Self { applies, reason }
    }
}

/// Evaluate `rule` against `candidates`.
pub fn decide(
    rule: &Rule,
    candidates: &CandidatePaths,
    policies: &RulePolicies,
    locator: &dyn RootLocator,
) -> Decision {
    let decision = evaluate(rule, candidates, policies, locator);
    debug!(
        rule = %rule.name,
        applies = decision.applies,
        reason = %decision.reason,
        "rule evaluated"
    );
    decision
}

/// Decide with the default root locator and no policies.
pub fn should_apply_rule(rule: &Rule, candidates: &CandidatePaths) -> bool {
    decide(
        rule,
        candidates,
        &RulePolicies::new(),
        &ConfigDirLocator::default(),
    )
    .applies
}

fn evaluate(
    rule: &Rule,
    candidates: &CandidatePaths,
    policies: &RulePolicies,
    locator: &dyn RootLocator,
) -> Decision {
    if policies.get(&rule.name) == Some(&RulePolicy::Off) {
        return Decision::new(false, Reason::PolicyOff);
    }

    if rule.always_apply == Some(true) {
        return Decision::new(true, Reason::AlwaysApply);
    }

    let content = rule.regex.as_ref().map(ContentPatterns::compile);
    let globs = rule.globs.as_ref().map(GlobScope::compile);

    match rule.always_apply {
        // only `Some(false)` reaches here
        Some(_) => match globs {
            None => Decision::new(false, Reason::OptedOutWithoutGlobs),
            Some(globs) => {
                let filter = PathFilter {
                    globs: Some(globs),
                    directory: None,
                    content,
                };
                Decision::new(filter.any(candidates), Reason::ExplicitGlobs)
            }
        },
        None => {
            let scope = rule_scope(rule, locator);
            let reason = match (&scope, globs.is_some()) {
                (RuleScope::Global, false) => Reason::Global,
                (RuleScope::Directory(_), false) => Reason::Directory,
                (RuleScope::Directory(_), true) => Reason::DirectoryGlobs,
                (RuleScope::Global, true) => Reason::RootGlobs,
            };
            if reason == Reason::Global && content.is_none() {
                return Decision::new(true, reason);
            }
            let filter = PathFilter {
                globs,
                directory: match &scope {
                    RuleScope::Global => None,
                    RuleScope::Directory(dir) => Some(dir.as_str()),
                },
                content,
            };
            Decision::new(filter.any(candidates), reason)
        }
    }
}

/// Constraints a single candidate path must satisfy together.
struct PathFilter<'a> {
    globs: Option<GlobScope>,
    directory: Option<&'a str>,
    content: Option<ContentPatterns>,
}

impl PathFilter<'_> {
    fn any(&self, candidates: &CandidatePaths) -> bool {
        candidates.iter().any(|path| self.accepts(path, candidates))
    }

    fn accepts(&self, path: &str, candidates: &CandidatePaths) -> bool {
        self.directory
            .is_none_or(|dir| path_is_under_directory(path, dir))
            && self.globs.as_ref().is_none_or(|g| g.is_match(path))
            && self.content.as_ref().is_none_or(|patterns| {
                candidates
                    .contents(path)
                    .iter()
                    .any(|body| patterns.is_match(body))
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tenet_core::PatternList;
    use tenet_core::logging::capture_logs;

    fn paths(list: &[&str]) -> CandidatePaths {
        CandidatePaths::from_paths(list.iter().copied())
    }

    fn run(rule: &Rule, candidates: &CandidatePaths) -> Decision {
        decide(
            rule,
            candidates,
            &RulePolicies::new(),
            &ConfigDirLocator::default(),
        )
    }

    // ── alwaysApply: true ──

    #[test]
    fn always_apply_ignores_globs() {
        let rule = Rule::new("Always", "Always")
            .with_always_apply(true)
            .with_globs("**/*.tsx");
        let d = run(&rule, &paths(&["src/utils/helper.js"]));
        assert_eq!(d, Decision::new(true, Reason::AlwaysApply));
    }

    #[test]
    fn always_apply_with_no_paths() {
        let rule = Rule::new("Always", "Always").with_always_apply(true);
        assert!(should_apply_rule(&rule, &CandidatePaths::new()));
    }

    // ── alwaysApply: false ──

    #[test]
    fn opted_out_without_globs_never_applies() {
        let rule = Rule::new("Off", "x")
            .with_always_apply(false)
            .with_source_file("src/components/rules.md");
        let d = run(&rule, &paths(&["src/components/Button.tsx"]));
        assert_eq!(d, Decision::new(false, Reason::OptedOutWithoutGlobs));
    }

    #[test]
    fn opted_out_with_globs_ignores_directory() {
        let rule = Rule::new("TS", "x")
            .with_always_apply(false)
            .with_globs("**/*.ts")
            .with_source_file("src/components/rules.md");
        let d = run(&rule, &paths(&["src/redux/slice.ts"]));
        assert_eq!(d, Decision::new(true, Reason::ExplicitGlobs));
        assert!(!run(&rule, &paths(&["src/components/Button.tsx"])).applies);
    }

    // ── alwaysApply unset ──

    #[test]
    fn root_rule_without_globs_is_global() {
        let rule = Rule::new("Root", "Root rule").with_source_file(".continue/rules.md");
        assert_eq!(
            run(&rule, &CandidatePaths::new()),
            Decision::new(true, Reason::Global)
        );
    }

    #[test]
    fn inline_rule_is_global() {
        assert!(should_apply_rule(&Rule::new("Inline", "x"), &CandidatePaths::new()));
    }

    #[test]
    fn colocated_rule_needs_path_in_directory() {
        let rule = Rule::new("Hooks", "Use hooks").with_source_file("src/components/rules.md");
        assert!(run(&rule, &paths(&["src/components/Button.tsx"])).applies);
        assert!(!run(&rule, &paths(&["src/redux/slice.ts"])).applies);
        assert_eq!(
            run(&rule, &CandidatePaths::new()),
            Decision::new(false, Reason::Directory)
        );
    }

    #[test]
    fn colocated_rule_with_globs_needs_both() {
        let rule = Rule::new("TSX", "x")
            .with_source_file("src/components/rules.md")
            .with_globs("**/*.tsx");
        assert_eq!(
            run(&rule, &paths(&["src/components/Button.tsx"])),
            Decision::new(true, Reason::DirectoryGlobs)
        );
        assert!(!run(&rule, &paths(&["src/pages/Home.tsx"])).applies);
        assert!(!run(&rule, &paths(&["src/components/util.ts"])).applies);
    }

    #[test]
    fn both_constraints_must_hold_on_the_same_path() {
        let rule = Rule::new("TSX", "x")
            .with_source_file("src/components/rules.md")
            .with_globs("**/*.tsx");
        let d = run(&rule, &paths(&["src/pages/Home.tsx", "src/components/util.ts"]));
        assert!(!d.applies);
    }

    #[test]
    fn root_rule_with_globs_ignores_directory() {
        let rule = Rule::new("Py", "Follow PEP8")
            .with_source_file(".continue/rules.md")
            .with_globs("**/*.py");
        assert_eq!(
            run(&rule, &paths(&["scripts/tool.py"])),
            Decision::new(true, Reason::RootGlobs)
        );
        assert!(!run(&rule, &paths(&["src/main.ts"])).applies);
        assert!(!run(&rule, &CandidatePaths::new()).applies);
    }

    #[test]
    fn empty_glob_list_never_matches() {
        let rule = Rule::new("Empty", "x").with_globs(PatternList::Many(vec![]));
        assert!(!run(&rule, &paths(&["src/main.ts"])).applies);
    }

    #[test]
    fn absolute_origin_matches_relative_candidates() {
        let rule = Rule::new("Utils", "x")
            .with_source_file("file:///home/me/repo/src/utils/rules.md");
        assert!(run(&rule, &paths(&["src/utils/api.ts"])).applies);
    }

    // ── policies ──

    #[test]
    fn policy_off_overrides_always_apply() {
        let rule = Rule::new("Always", "x").with_always_apply(true);
        let policies = RulePolicies::from([("Always".to_owned(), RulePolicy::Off)]);
        let d = decide(
            &rule,
            &CandidatePaths::new(),
            &policies,
            &ConfigDirLocator::default(),
        );
        assert_eq!(d, Decision::new(false, Reason::PolicyOff));
    }

    #[test]
    fn policy_on_keeps_normal_evaluation() {
        let rule = Rule::new("Py", "x").with_globs("**/*.py");
        let policies = RulePolicies::from([("Py".to_owned(), RulePolicy::On)]);
        let d = decide(
            &rule,
            &paths(&["src/main.ts"]),
            &policies,
            &ConfigDirLocator::default(),
        );
        assert!(!d.applies);
    }

    // ── content patterns ──

    fn with_content(path: &str, content: &str) -> CandidatePaths {
        let mut set = CandidatePaths::new();
        set.insert_with_content(path, content);
        set
    }

    #[test]
    fn regex_narrows_globs() {
        let rule = Rule::new("Effects", "x")
            .with_globs("**/*.tsx")
            .with_regex("useEffect");
        assert!(run(&rule, &with_content("src/A.tsx", "useEffect(() => {})")).applies);
        assert!(!run(&rule, &with_content("src/A.tsx", "const a = 1")).applies);
    }

    #[test]
    fn regex_requires_known_content() {
        let rule = Rule::new("Effects", "x")
            .with_globs("**/*.tsx")
            .with_regex("useEffect");
        assert!(!run(&rule, &paths(&["src/A.tsx"])).applies);
    }

    #[test]
    fn regex_on_global_rule_needs_matching_content() {
        let rule = Rule::new("Classes", "x").with_regex(r"class \w+");
        assert!(run(&rule, &with_content("a.js", "class Calculator {}")).applies);
        assert!(!run(&rule, &CandidatePaths::new()).applies);
    }

    #[test]
    fn regex_ignored_by_always_apply() {
        let rule = Rule::new("Always", "x")
            .with_always_apply(true)
            .with_regex("never-present");
        assert!(run(&rule, &CandidatePaths::new()).applies);
    }

    #[test]
    fn invalid_regex_does_not_apply() {
        let rule = Rule::new("Bad", "x").with_globs("**/*.js").with_regex("([unclosed");
        assert!(!run(&rule, &with_content("a.js", "([unclosed")).applies);
    }

    // ── locator ──

    #[test]
    fn custom_locator_changes_scope() {
        let rule = Rule::new("Shared", "x").with_source_file("shared/rules.md");
        let everything_root = |_: &str| true;
        let d = decide(
            &rule,
            &CandidatePaths::new(),
            &RulePolicies::new(),
            &everything_root,
        );
        assert_matches!(d, Decision { applies: true, reason: Reason::Global });
    }

    // ── logging ──

    #[test]
    fn logs_each_decision() {
        let (logs, _guard) = capture_logs();
        let rule = Rule::new("Root Rule", "x").with_source_file(".continue/rules.md");
        let _ = run(&rule, &CandidatePaths::new());

        let events = logs.events_for_target("tenet_rules::decider");
        let event = events
            .iter()
            .find(|e| e.message == "rule evaluated")
            .unwrap();
        assert_eq!(event.field("rule"), Some("Root Rule"));
        assert_eq!(event.field("applies"), Some("true"));
        assert_eq!(event.field("reason"), Some("global"));
    }

    #[test]
    fn reason_labels() {
        assert_eq!(Reason::DirectoryGlobs.to_string(), "directory and globs");
        assert_eq!(Reason::PolicyOff.as_str(), "policy off");
    }

    // ── properties ──

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = String> {
            prop::sample::select(vec!["src", "components", "lib", "redux", "tests"])
                .prop_map(str::to_owned)
        }

        fn file_name() -> impl Strategy<Value = String> {
            prop::sample::select(vec!["a.tsx", "b.ts", "c.py", "d.rs"]).prop_map(str::to_owned)
        }

        fn path() -> impl Strategy<Value = String> {
            (prop::collection::vec(segment(), 0..4), file_name()).prop_map(|(dirs, file)| {
                let mut parts = dirs;
                parts.push(file);
                parts.join("/")
            })
        }

        fn candidate_set() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(path(), 0..5)
        }

        fn origin() -> impl Strategy<Value = Option<String>> {
            prop::option::of(
                prop::sample::select(vec![
                    ".continue/rules.md",
                    "src/components/rules.md",
                    "lib/rules.md",
                    "rules.md",
                ])
                .prop_map(str::to_owned),
            )
        }

        fn globs() -> impl Strategy<Value = Option<PatternList>> {
            prop::option::of(
                prop::sample::select(vec!["**/*.tsx", "src/**", "*.py", "lib/**/*.rs"])
                    .prop_map(PatternList::from),
            )
        }

        fn build(always: Option<bool>, globs: Option<PatternList>, origin: Option<String>) -> Rule {
            let mut rule = Rule::new("prop", "text");
            rule.always_apply = always;
            rule.globs = globs;
            rule.source_file = origin;
            rule
        }

        proptest! {
            #[test]
            fn always_apply_true_applies(
                candidates in candidate_set(),
                globs in globs(),
                origin in origin(),
            ) {
                let rule = build(Some(true), globs, origin);
                prop_assert!(should_apply_rule(&rule, &CandidatePaths::from_paths(candidates)));
            }

            #[test]
            fn opted_out_without_globs_never_applies(
                candidates in candidate_set(),
                origin in origin(),
            ) {
                let rule = build(Some(false), None, origin);
                prop_assert!(!should_apply_rule(&rule, &CandidatePaths::from_paths(candidates)));
            }

            #[test]
            fn root_rule_without_globs_applies(candidates in candidate_set()) {
                let rule = build(None, None, Some(".continue/rules.md".into()));
                prop_assert!(should_apply_rule(&rule, &CandidatePaths::from_paths(candidates)));
            }

            #[test]
            fn colocated_rule_follows_directory(candidates in candidate_set()) {
                let rule = build(None, None, Some("src/components/rules.md".into()));
                let expected = candidates
                    .iter()
                    .any(|p| p.split('/').any(|s| s == "components"));
                prop_assert_eq!(
                    should_apply_rule(&rule, &CandidatePaths::from_paths(candidates)),
                    expected
                );
            }

            #[test]
            fn colocated_globs_require_both(candidates in candidate_set()) {
                let rule = build(
                    None,
                    Some(PatternList::from("**/*.tsx")),
                    Some("src/components/rules.md".into()),
                );
                let expected = candidates.iter().any(|p| {
                    p.split('/').any(|s| s == "components") && p.ends_with(".tsx")
                });
                prop_assert_eq!(
                    should_apply_rule(&rule, &CandidatePaths::from_paths(candidates)),
                    expected
                );
            }

            #[test]
            fn decisions_are_idempotent(
                candidates in candidate_set(),
                always in prop::option::of(any::<bool>()),
                globs in globs(),
                origin in origin(),
            ) {
                let rule = build(always, globs, origin);
                let set = CandidatePaths::from_paths(candidates);
                prop_assert_eq!(run(&rule, &set), run(&rule, &set));
            }
        }
    }
}
