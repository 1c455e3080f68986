//! Node types for artifact file trees

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Display name of the synthetic root folder
pub const ROOT_NAME: &str = "root";

/// Display name of synthetic up-link entries
pub const UP_LINK_NAME: &str = "...";

/// Kind of a tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// A single entry in an artifact file tree
///
/// Files and folders share every slot except that files carry a content
/// hash and never have children. `parent` always points at the direct
/// container, including on up-link entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display name (one path segment)
    pub name: String,

    /// File or folder
    pub kind: EntryKind,

    /// Content hash as reported by the registry; empty for folders and up-links
    pub hash: String,

    /// Child entries in insertion order; always empty for files
    pub children: Vec<NodeId>,

    /// Direct container; `None` only on the root
    pub parent: Option<NodeId>,

    /// True on the synthetic root folder
    pub is_root: bool,

    /// True on synthetic "go up one level" entries
    pub is_up_link: bool,
}

impl TreeNode {
    pub(crate) fn root() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            kind: EntryKind::Folder,
            hash: String::new(),
            children: Vec::new(),
            parent: None,
            is_root: true,
            is_up_link: false,
        }
    }

    pub(crate) fn folder(name: String, parent: NodeId) -> Self {
        Self {
            name,
            kind: EntryKind::Folder,
            hash: String::new(),
            children: Vec::new(),
            parent: Some(parent),
            is_root: false,
            is_up_link: false,
        }
    }

    pub(crate) fn file(name: String, hash: String, parent: NodeId) -> Self {
        Self {
            name,
            kind: EntryKind::File,
            hash,
            children: Vec::new(),
            parent: Some(parent),
            is_root: false,
            is_up_link: false,
        }
    }

    pub(crate) fn up_link(parent: NodeId) -> Self {
        Self {
            name: UP_LINK_NAME.to_string(),
            kind: EntryKind::Folder,
            hash: String::new(),
            children: Vec::new(),
            parent: Some(parent),
            is_root: false,
            is_up_link: true,
        }
    }

    /// True for folder entries, including the root and up-links
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// True for file entries
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}
