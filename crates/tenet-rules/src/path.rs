//! Path normalization shared by the matcher and the root locator.
//!
//! Paths reach the engine in two shapes: repository-relative paths taken from
//! chat text (`src/components/Button.tsx`) and absolute, often URI-qualified
//! paths supplied by an IDE host (`file:///home/me/repo/.continue/rules.md`).
//! These helpers strip the scheme and authority, unify separators, and drop
//! empty and `.` components so both shapes can be compared segment by segment.

use crate::constants::URI_SCHEME_SEPARATOR;

/// Strip a leading `scheme://authority` from a URI, leaving the path.
///
/// ```text
/// strip_uri_scheme("file:///repo/a.ts")             → "/repo/a.ts"
/// strip_uri_scheme("vscode-remote://ssh+box/a.ts")  → "/a.ts"
/// strip_uri_scheme("src/a.ts")                      → "src/a.ts"
/// ```
pub fn strip_uri_scheme(path: &str) -> &str {
    let Some(idx) = path.find(URI_SCHEME_SEPARATOR) else {
        return path;
    };
    let scheme = &path[..idx];
    if !is_uri_scheme(scheme) {
        return path;
    }
    let rest = &path[idx + URI_SCHEME_SEPARATOR.len()..];
    match rest.find('/') {
        Some(slash) => &rest[slash..],
        None => "",
    }
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`.
fn is_uri_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Components of `path` after scheme stripping, with `/` and `\` both
/// treated as separators and empty or `.` components removed.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    strip_uri_scheme(path)
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
}

/// `true` if the path (after scheme stripping) starts at a filesystem root.
pub fn is_absolute(path: &str) -> bool {
    strip_uri_scheme(path).starts_with(['/', '\\'])
}

/// Canonical forward-slash form of `path`.
pub fn normalize_path(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    if is_absolute(path) {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Normalized parent directory of `path`. Empty for a bare file name.
pub fn parent_dir(path: &str) -> String {
    let parts: Vec<&str> = segments(path).collect();
    let parent = parts[..parts.len().saturating_sub(1)].join("/");
    if is_absolute(path) {
        format!("/{parent}")
    } else {
        parent
    }
}

/// Last component of `path`, if any.
pub fn basename(path: &str) -> Option<&str> {
    segments(path).last()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
