//! Folder navigation view-model for the artifact file browser

use crate::error::TreeError;
use crate::manifest::{self, FileEntry};
use crate::tree::builder::{FileTree, TreeBuilder};
use crate::tree::node::EntryKind;
use crate::tree::order;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One row of the current folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Display name of the entry
    pub name: String,
    /// File or folder
    pub kind: EntryKind,
    /// Content hash; empty for folders and up-links
    pub hash: String,
    /// True on the navigate-up entry
    pub is_up_link: bool,
}

/// Navigable view over a built file tree
///
/// The tree itself does not change after construction. The browser tracks
/// which folder is selected and the display order of its children; opening
/// folders only ever touches that view state.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    tree: FileTree,
    selected: NodeId,
    listing: Vec<NodeId>,
}

impl FileBrowser {
    /// Build a browser over the given listing entries
    ///
    /// The initial selection is the root. Its listing keeps canonical
    /// order; display sorting first applies when a folder is opened.
    pub fn new(builder: &TreeBuilder, entries: &[FileEntry]) -> Result<Self, TreeError> {
        Ok(Self::from_tree(builder.build(entries)?))
    }

    /// Wrap an already built tree
    pub fn from_tree(tree: FileTree) -> Self {
        let selected = tree.root_id();
        let listing = tree.children(selected).to_vec();
        Self {
            tree,
            selected,
            listing,
        }
    }

    /// The tree being browsed
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Currently selected node
    pub fn selected(&self) -> NodeId {
        self.selected
    }

    /// Current listing in display order
    pub fn listing(&self) -> &[NodeId] {
        &self.listing
    }

    /// Open an entry of the tree
    ///
    /// Opening an up-link moves one level up from the folder containing it;
    /// opening anything else selects the entry itself, files included. The
    /// new listing is the sorted form of the selection's children.
    pub fn open(&mut self, entry: NodeId) -> Result<NodeId, TreeError> {
        let node = self.tree.get(entry).ok_or(TreeError::NodeNotFound(entry))?;

        let target = if node.is_up_link {
            // The up-link's parent is the folder holding it; one level up
            // from that folder is where navigation lands.
            let holder = node.parent.ok_or(TreeError::NodeNotFound(entry))?;
            self.tree
                .parent(holder)
                .ok_or(TreeError::NodeNotFound(holder))?
        } else {
            entry
        };

        self.selected = target;
        self.listing = order::folder_listing(&self.tree, target);
        debug!(
            selected = target.index(),
            listing_len = self.listing.len(),
            "Opened folder"
        );

        Ok(target)
    }

    /// Open the entry at a listing path, as [`open`](Self::open) would
    pub fn open_path(&mut self, listing_path: &str) -> Result<NodeId, TreeError> {
        match self.tree.resolve(listing_path) {
            Some(entry) => self.open(entry),
            None => Err(TreeError::PathNotFound(listing_path.to_string())),
        }
    }

    /// Current listing as display rows
    pub fn rows(&self) -> Vec<DisplayRow> {
        self.listing
            .iter()
            .filter_map(|&entry_id| self.tree.get(entry_id))
            .map(|node| DisplayRow {
                name: node.name.clone(),
                kind: node.kind,
                hash: node.hash.clone(),
                is_up_link: node.is_up_link,
            })
            .collect()
    }

    /// Rebuild from a new listing when it differs from the current one
    ///
    /// The fingerprint decides: an identical listing keeps the current tree
    /// and selection, a changed one rebuilds and resets the selection to
    /// the root. Returns true when a rebuild happened.
    #[instrument(skip(self, builder, entries), fields(entry_count = entries.len()))]
    pub fn replace_listing(
        &mut self,
        builder: &TreeBuilder,
        entries: &[FileEntry],
    ) -> Result<bool, TreeError> {
        if manifest::fingerprint(entries) == self.tree.fingerprint() {
            debug!("Listing unchanged, keeping current tree");
            return Ok(false);
        }

        *self = Self::from_tree(builder.build(entries)?);
        info!("Listing replaced");
        Ok(true)
    }
}
