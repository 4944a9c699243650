//! File path extraction from chat message text.
//!
//! Pure functions that scan a message for fenced code blocks and read the file
//! path declared in each block's opening line:
//!
//! ````text
//! ```tsx src/components/Button.tsx (19-25)
//! ^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^ ^^^^^^^
//! lang path                        line range (discarded)
//! ```
//! ````
//!
//! A header token is a path only if it ends in a `.extension` and is not a
//! URL. Headers without such a token contribute nothing. Nothing here fails:
//! malformed headers are skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{CODE_FENCE, URI_SCHEME_SEPARATOR};

/// Trailing `(start-end)` line-range suffix on a fence header.
static LINE_RANGE_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*\(\s*\d+\s*-\s*\d+\s*\)\s*$").ok());

/// A fenced code block found in a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag, when the header starts with one.
    pub language: Option<String>,
    /// File path declared in the header.
    pub path: Option<String>,
    /// Lines between the fences.
    pub body: String,
}

/// Scan `message` for fenced code blocks.
///
/// A block opens on a line starting with three backticks and closes on the
/// next such line. A block left open at the end of the message runs to the
/// end of the text.
pub fn extract_code_blocks(message: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(&str, Vec<&str>)> = None;

    for line in message.lines() {
        let trimmed = line.trim_start();
        let is_fence = trimmed.starts_with(CODE_FENCE);

        match open.take() {
            None if is_fence => {
                open = Some((trimmed.trim_start_matches('`'), Vec::new()));
            }
            None => {}
            Some((header, body)) if is_fence => {
                blocks.push(build_block(header, &body));
            }
            Some((header, mut body)) => {
                body.push(line);
                open = Some((header, body));
            }
        }
    }

    if let Some((header, body)) = open {
        blocks.push(build_block(header, &body));
    }

    blocks
}

fn build_block(header: &str, body: &[&str]) -> CodeBlock {
    let (language, path) = parse_fence_header(header);
    CodeBlock {
        language,
        path,
        body: body.join("\n"),
    }
}

/// Distinct file paths declared in the message's code block headers, in
/// order of first appearance.
pub fn extract_paths_from_message(message: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_code_blocks(message)
        .into_iter()
        .filter_map(|block| block.path)
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Split a fence header into `(language, path)`.
///
/// ```text
/// "tsx Component.tsx"      → (Some("tsx"), Some("Component.tsx"))
/// "js test.js (19-25)"     → (Some("js"),  Some("test.js"))
/// "test.js"                → (None,        Some("test.js"))
/// "python"                 → (Some("python"), None)
/// ```
pub fn parse_fence_header(header: &str) -> (Option<String>, Option<String>) {
    let header = match LINE_RANGE_SUFFIX.as_ref() {
        Some(re) => re.replace(header, ""),
        None => header.into(),
    };
    let mut tokens = header.split_whitespace();

    let Some(first) = tokens.next() else {
        return (None, None);
    };
    if is_file_path_token(first) {
        return (None, Some(first.to_owned()));
    }

    let path = tokens
        .next()
        .filter(|t| is_file_path_token(t))
        .map(str::to_owned);
    (Some(first.to_owned()), path)
}

/// `true` if `token` looks like a file path: it ends in `.ext` and is not a
/// URL. The extension is alphanumeric and starts with a letter, so version
/// numbers such as `3.11` are not paths.
pub fn is_file_path_token(token: &str) -> bool {
    if token.contains(URI_SCHEME_SEPARATOR) {
        return false;
    }
    let file_name = token.rsplit(['/', '\\']).next().unwrap_or(token);
    match file_name.rsplit_once('.') {
        Some((_, ext)) => {
            ext.starts_with(|c: char| c.is_ascii_alphabetic())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_language_and_path() {
        let paths = extract_paths_from_message(
            "```tsx Component.tsx\nexport const Component = () => <div>Hello</div>;\n```",
        );
        assert_eq!(paths, vec!["Component.tsx"]);
    }

    #[test]
    fn extracts_filename_without_language() {
        let paths = extract_paths_from_message("```test.js\nclass Calculator {}\n```");
        assert_eq!(paths, vec!["test.js"]);
    }

    #[test]
    fn discards_line_range_suffix() {
        let paths = extract_paths_from_message("```js test.js (19-25)\ndivide(number) {}\n```");
        assert_eq!(paths, vec!["test.js"]);
    }

    #[test]
    fn language_only_contributes_nothing() {
        assert!(extract_paths_from_message("```python\nprint('hi')\n```").is_empty());
        assert!(extract_paths_from_message("```\nplain\n```").is_empty());
    }

    #[test]
    fn urls_are_not_paths() {
        assert!(extract_paths_from_message("```md https://example.com/readme.md\nx\n```").is_empty());
    }

    #[test]
    fn deduplicates_in_first_seen_order() {
        let message = "```ts src/b.ts\n1\n```\n```ts src/a.ts\n2\n```\n```ts src/b.ts\n3\n```";
        assert_eq!(extract_paths_from_message(message), vec!["src/b.ts", "src/a.ts"]);
    }

    #[test]
    fn mixed_header_formats() {
        let message = "```test.js\nclass Calculator {}\n```\n\
                       ```js utils.js (19-25)\ndivide(number) {}\n```\n\
                       ```ts config/settings.ts\nconst config = {};\n```";
        assert_eq!(
            extract_paths_from_message(message),
            vec!["test.js", "utils.js", "config/settings.ts"]
        );
    }

    #[test]
    fn closing_fence_does_not_open_a_block() {
        let blocks = extract_code_blocks("text\n```rust src/lib.rs\nfn a() {}\n```\nmore text");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language.as_deref(), Some("rust"));
        assert_eq!(blocks[0].path.as_deref(), Some("src/lib.rs"));
        assert_eq!(blocks[0].body, "fn a() {}");
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let blocks = extract_code_blocks("```py main.py\nprint(1)\nprint(2)");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "print(1)\nprint(2)");
    }

    #[test]
    fn message_without_fences_is_empty() {
        assert!(extract_code_blocks("just a question about src/main.rs").is_empty());
    }

    #[test]
    fn path_token_rules() {
        assert!(is_file_path_token("src/main.ts"));
        assert!(is_file_path_token(".gitignore"));
        assert!(is_file_path_token(r"src\win\main.rs"));
        assert!(!is_file_path_token("python"));
        assert!(!is_file_path_token("src/dir/"));
        assert!(!is_file_path_token("file.ts-"));
        assert!(!is_file_path_token("http://a.com/x.js"));
        assert!(!is_file_path_token("(19-25)"));
        assert!(!is_file_path_token("3.11"));
        assert!(is_file_path_token("app/(marketing)/page.tsx"));
    }

    #[test]
    fn parenthesized_directories_are_kept() {
        let message = "```tsx app/(marketing)/page.tsx (1-4)\nexport default function Page() {}\n```";
        assert_eq!(
            extract_paths_from_message(message),
            vec!["app/(marketing)/page.tsx"]
        );
    }

    #[test]
    fn version_numbers_are_not_paths() {
        assert_eq!(parse_fence_header("python 3.11"), (Some("python".into()), None));
        assert!(extract_paths_from_message("```python 3.11\nprint(1)\n```").is_empty());
    }

    #[test]
    fn header_parsing() {
        assert_eq!(
            parse_fence_header("ts src/main.ts"),
            (Some("ts".into()), Some("src/main.ts".into()))
        );
        assert_eq!(parse_fence_header("python"), (Some("python".into()), None));
        assert_eq!(parse_fence_header("   "), (None, None));
        assert_eq!(
            parse_fence_header("js utils.js(1-3)"),
            (Some("js".into()), Some("utils.js".into()))
        );
    }
}
