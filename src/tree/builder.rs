//! Tree builder for constructing navigable trees from flat file listings

use crate::error::TreeError;
use crate::manifest::{self, FileEntry};
use crate::tree::node::{EntryKind, TreeNode};
use crate::tree::path::{self, SegmentPolicy};
use crate::types::{Fingerprint, NodeId};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Navigable tree built from one artifact file listing
///
/// Nodes live in an arena indexed by [`NodeId`]; the root is always at
/// index 0. Parent and child links are plain indices, never shared
/// ownership. The tree is not mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileTree {
    /// Root folder NodeId
    root_id: NodeId,
    /// Arena of nodes in insertion order
    nodes: Vec<TreeNode>,
    /// Fingerprint of the listing this tree was built from
    fingerprint: Fingerprint,
}

impl FileTree {
    fn with_root(fingerprint: Fingerprint) -> Self {
        Self {
            root_id: NodeId(0),
            nodes: vec![TreeNode::root()],
            fingerprint,
        }
    }

    /// NodeId of the synthetic root folder
    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Fingerprint of the listing this tree was built from
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Number of nodes in the tree, including the root and up-links
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id
    pub fn get(&self, node_id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(node_id.0)
    }

    /// Find the parent NodeId for a given node
    ///
    /// Returns None if the node is the root or not found.
    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.get(node_id).and_then(|node| node.parent)
    }

    /// Children NodeIds of a node in canonical (insertion) order
    ///
    /// Returns an empty slice if the node is a file or not found.
    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.get(node_id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over all nodes with their ids
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Find a direct child by name and kind
    ///
    /// Up-links never match, so a real folder named like one stays distinct.
    /// Returns the first match in insertion order.
    pub fn find_child(&self, folder: NodeId, name: &str, kind: EntryKind) -> Option<NodeId> {
        self.children(folder).iter().copied().find(|&child_id| {
            match self.get(child_id) {
                Some(child) => !child.is_up_link && child.name == name && child.kind == kind,
                None => false,
            }
        })
    }

    /// The up-link entry of a folder, if it has one
    pub fn up_link_of(&self, folder: NodeId) -> Option<NodeId> {
        self.children(folder)
            .iter()
            .copied()
            .find(|&child_id| self.get(child_id).is_some_and(|child| child.is_up_link))
    }

    /// Resolve a listing path to a node by descending through folders
    ///
    /// The final segment matches a file first, then a folder. Returns None
    /// for paths that do not split cleanly or are not present.
    pub fn resolve(&self, listing_path: &str) -> Option<NodeId> {
        let segments = path::split_segments(listing_path, SegmentPolicy::Reject).ok()?;
        let mut cursor = self.root_id;
        let last = segments.len() - 1;

        for segment in &segments[..last] {
            cursor = self.find_child(cursor, segment, EntryKind::Folder)?;
        }

        let name = &segments[last];
        self.find_child(cursor, name, EntryKind::File)
            .or_else(|| self.find_child(cursor, name, EntryKind::Folder))
    }

    /// Append a folder under `parent`, seeding it with its up-link entry
    fn add_folder(&mut self, parent: NodeId, name: String) -> NodeId {
        let folder_id = self.push(TreeNode::folder(name, parent));
        self.nodes[parent.0].children.push(folder_id);

        // Every non-root folder starts with its navigate-up entry, so it
        // is first in canonical order as well as in sorted order.
        let up_link_id = self.push(TreeNode::up_link(folder_id));
        self.nodes[folder_id.0].children.push(up_link_id);

        folder_id
    }

    /// Append a file under `parent`
    fn add_file(&mut self, parent: NodeId, name: String, hash: String) -> NodeId {
        let file_id = self.push(TreeNode::file(name, hash, parent));
        self.nodes[parent.0].children.push(file_id);
        file_id
    }

    fn push(&mut self, node: TreeNode) -> NodeId {
        let node_id = NodeId(self.nodes.len());
        self.nodes.push(node);
        node_id
    }
}

/// Tree builder for converting flat file listings into navigable trees
pub struct TreeBuilder {
    policy: SegmentPolicy,
}

impl TreeBuilder {
    /// Create a tree builder with the default segment policy
    pub fn new() -> Self {
        Self {
            policy: SegmentPolicy::default(),
        }
    }

    /// Set the handling of empty path segments
    pub fn with_policy(mut self, policy: SegmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a tree from an ordered file listing
    ///
    /// Entries are inserted in input order under a fresh root. Re-listed
    /// paths merge onto their existing node with the newest hash, so
    /// building the same listing twice yields the same tree.
    #[instrument(skip(self, entries), fields(entry_count = entries.len()))]
    pub fn build(&self, entries: &[FileEntry]) -> Result<FileTree, TreeError> {
        let start = Instant::now();
        info!("Starting tree build");

        let mut tree = FileTree::with_root(manifest::fingerprint(entries));

        for entry in entries {
            self.insert(&mut tree, &entry.file, &entry.file_hash)?;
        }

        let duration = start.elapsed();
        info!(
            node_count = tree.node_count(),
            fingerprint = %hex::encode(tree.fingerprint),
            duration_ms = duration.as_millis(),
            "Tree build completed"
        );

        Ok(tree)
    }

    /// Insert one listing entry into the tree
    ///
    /// Walks the path segments with a cursor, reusing folders that already
    /// exist by name and creating the rest. A created folder starts with
    /// its up-link entry. Inserting a path that is already present replaces
    /// the stored hash instead of duplicating the node.
    pub fn insert(&self, tree: &mut FileTree, listing_path: &str, hash: &str) -> Result<NodeId, TreeError> {
        let segments = path::split_segments(listing_path, self.policy)?;
        trace!(path = listing_path, segments = segments.len(), "Inserting listing entry");

        let mut cursor = tree.root_id;
        let last = segments.len() - 1;

        for segment in &segments[..last] {
            cursor = match tree.find_child(cursor, segment, EntryKind::Folder) {
                Some(existing) => existing,
                None => tree.add_folder(cursor, segment.clone()),
            };
        }

        let name = &segments[last];
        match tree.find_child(cursor, name, EntryKind::File) {
            Some(existing) => {
                debug!(path = listing_path, "Replacing hash on re-listed file");
                tree.nodes[existing.0].hash = hash.to_string();
                Ok(existing)
            }
            None => Ok(tree.add_file(cursor, name.clone(), hash.to_string())),
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
