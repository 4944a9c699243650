//! Candidate paths gathered for one conversation turn.

use std::collections::HashMap;

use tenet_core::ContextItem;

use crate::path_extractor::extract_code_blocks;

/// Distinct paths relevant to the current turn, in first-seen order, plus any
/// content known for each path.
///
/// Built fresh per evaluation and dropped afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidatePaths {
    paths: Vec<String>,
    contents: HashMap<String, Vec<String>>,
}

impl CandidatePaths {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of bare paths with no content.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for path in paths {
            set.insert(path);
        }
        set
    }

    /// Paths from the message's code block headers followed by the paths of
    /// file-backed context items. Block bodies and item contents are kept as
    /// the content of their path.
    pub fn from_turn(message: Option<&str>, context_items: &[ContextItem]) -> Self {
        let mut set = Self::new();
        for block in message.map(extract_code_blocks).unwrap_or_default() {
            if let Some(path) = block.path {
                set.insert_with_content(path, block.body);
            }
        }
        for item in context_items {
            if let Some(path) = item.file_path() {
                set.insert_with_content(path, item.content.clone());
            }
        }
        set
    }

    /// Add a path if not already present.
    pub fn insert(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Add a path and record `content` for it.
    pub fn insert_with_content(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        self.contents
            .entry(path.clone())
            .or_default()
            .push(content.into());
        self.insert(path);
    }

    /// Paths in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Known contents of `path`. Empty when none was recorded.
    pub fn contents(&self, path: &str) -> &[String] {
        self.contents.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` when no path was gathered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CandidatePaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_paths(iter)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
