//! Context items attached to a conversation turn.

use serde::{Deserialize, Serialize};

/// Kind of resource a context item points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UriKind {
    /// A file in the workspace.
    File,
    /// A web resource.
    Url,
}

/// Reference from a context item to the resource it was built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItemUri {
    /// Resource kind.
    #[serde(rename = "type")]
    pub kind: UriKind,
    /// Path or URL.
    pub value: String,
}

/// An item attached to the current turn (file contents, search results, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextItem {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Item body.
    pub content: String,
    /// Originating resource, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<ContextItemUri>,
}

impl ContextItem {
    /// Context item for a file with the given contents.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_owned();
        Self {
            name,
            description: String::new(),
            content: content.into(),
            uri: Some(ContextItemUri {
                kind: UriKind::File,
                value: path,
            }),
        }
    }

    /// The referenced file path, if this item is backed by a file.
    pub fn file_path(&self) -> Option<&str> {
        match &self.uri {
            Some(ContextItemUri {
                kind: UriKind::File,
                value,
            }) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}
