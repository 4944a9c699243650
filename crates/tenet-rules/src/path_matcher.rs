//! Glob, directory and content matching for candidate paths.
//!
//! Compilation never fails from a caller's point of view: an entry that does
//! not compile is logged at `warn` and dropped, so it matches nothing while
//! the remaining entries keep working.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use tenet_core::PatternList;
use tracing::{trace, warn};

use crate::errors::PatternError;
use crate::path::{basename, normalize_path, segments};

// ─────────────────────────────────────────────────────────────────────────────
// Globs
// ─────────────────────────────────────────────────────────────────────────────

/// Compiled glob entries of one rule, OR-combined.
#[derive(Clone, Debug)]
pub struct GlobScope {
    set: GlobSet,
}

impl GlobScope {
    /// Compile every entry of `patterns`.
    ///
    /// `*` and `?` stop at `/`. A leading `!` has no special meaning. Commas
    /// are literal characters of the entry they appear in.
    pub fn compile(patterns: &PatternList) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns.iter() {
            for expanded in expand_alternatives(pattern) {
                match GlobBuilder::new(&expanded).literal_separator(true).build() {
                    Ok(glob) => {
                        let _ = builder.add(glob);
                    }
                    Err(source) => {
                        let err = PatternError::Glob {
                            pattern: pattern.to_owned(),
                            source,
                        };
                        warn!(error = %err, "skipping glob pattern");
                    }
                }
            }
        }
        let set = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "failed to build glob set");
            GlobSet::empty()
        });
        Self { set }
    }

    /// `true` if the normalized `path` matches any entry.
    pub fn is_match(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        let matched = self.set.is_match(&normalized);
        trace!(path = %normalized, matched, "glob match");
        matched
    }

    /// `true` when no entry compiled.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Glob test with "no patterns" treated as no constraint.
///
/// `None` is vacuously `true`. Callers that need to tell "unconstrained"
/// apart from "matched" must check for `None` themselves.
pub fn glob_matches(path: &str, patterns: Option<&PatternList>) -> bool {
    match patterns {
        None => true,
        Some(patterns) => GlobScope::compile(patterns).is_match(path),
    }
}

/// Expand alternation groups into plain patterns.
///
/// Handles the extglob groups `?(a|b)` and `@(a|b)` and brace groups
/// `{a,b}`, nested to any depth. Each group multiplies the result:
///
/// ```text
/// "**/*.ts?(x)"         → ["**/*.ts", "**/*.tsx"]
/// "src/@(a|b)/*.rs"     → ["src/a/*.rs", "src/b/*.rs"]
/// "**/*.{ts,{tsx,jsx}}" → ["**/*.ts", "**/*.tsx", "**/*.jsx"]
/// ```
///
/// Other extglob forms, unclosed groups, escaped characters and braces
/// without a top-level comma are left verbatim.
pub fn expand_alternatives(pattern: &str) -> Vec<String> {
    let Some(group) = next_group(pattern) else {
        return vec![pattern.to_owned()];
    };

    let head = &pattern[..group.start];
    let tail = &pattern[group.close + 1..];
    let mut alternatives: Vec<String> =
        split_top_level(&pattern[group.body_start..group.close], group.separator)
            .into_iter()
            .flat_map(expand_alternatives)
            .collect();
    if group.optional {
        alternatives.insert(0, String::new());
    }

    let tails = expand_alternatives(tail);
    alternatives
        .iter()
        .flat_map(|alt| tails.iter().map(move |t| format!("{head}{alt}{t}")))
        .collect()
}

/// An expandable group located in a pattern. Indices are byte offsets.
struct Group {
    start: usize,
    body_start: usize,
    close: usize,
    separator: u8,
    optional: bool,
}

/// First expandable group of `pattern`, skipping escaped characters.
fn next_group(pattern: &str) -> Option<Group> {
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'?' | b'@' if bytes.get(i + 1) == Some(&b'(') => {
                if let Some(close) = closing(bytes, i + 2, b'(', b')') {
                    return Some(Group {
                        start: i,
                        body_start: i + 2,
                        close,
                        separator: b'|',
                        optional: bytes[i] == b'?',
                    });
                }
            }
            b'{' => {
                if let Some(close) = closing(bytes, i + 1, b'{', b'}') {
                    let body = &pattern[i + 1..close];
                    if split_top_level(body, b',').len() > 1 {
                        return Some(Group {
                            start: i,
                            body_start: i + 1,
                            close,
                            separator: b',',
                            optional: false,
                        });
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Byte index of the `close` matching an `open` whose body starts at `from`.
fn closing(bytes: &[u8], from: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == open => depth += 1,
            b if b == close && depth == 0 => return Some(i),
            b if b == close => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split a group body on `separator` outside nested groups.
fn split_top_level(body: &str, separator: u8) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'(' | b'{' => depth += 1,
            b')' | b'}' => depth = depth.saturating_sub(1),
            b if b == separator && depth == 0 => {
                parts.push(&body[last..i]);
                last = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&body[last..]);
    parts
}

// ─────────────────────────────────────────────────────────────────────────────
// Directory colocation
// ─────────────────────────────────────────────────────────────────────────────

/// Loose containment: `true` if the basename of `directory` is a whole
/// component of `path`.
///
/// Works across representations (`file:///home/me/repo/src/utils` against
/// `src/utils/api.ts`) but cannot tell apart two directories with the same
/// name at different depths. An empty `directory` is the repository root and
/// contains every path.
pub fn path_is_under_directory(path: &str, directory: &str) -> bool {
    let Some(dir_name) = basename(directory) else {
        return true;
    };
    segments(path).any(|segment| segment == dir_name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Content patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Compiled content regexes of one rule, OR-combined.
#[derive(Clone, Debug)]
pub struct ContentPatterns {
    patterns: Vec<Regex>,
}

impl ContentPatterns {
    /// Compile every entry of `patterns`, dropping those that fail.
    pub fn compile(patterns: &PatternList) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(source) => {
                    let err = PatternError::Regex {
                        pattern: pattern.to_owned(),
                        source,
                    };
                    warn!(error = %err, "skipping regex pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// `true` if any pattern matches `content`.
    pub fn is_match(&self, content: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(content))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
