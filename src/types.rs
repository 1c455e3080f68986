//! Core type definitions for the stowage system.

use serde::{Deserialize, Serialize};

/// Index of a node within a file tree arena.
///
/// Nodes are appended in insertion order and never removed, so a `NodeId`
/// stays valid for the lifetime of the tree that issued it. Ids from one
/// tree carry no meaning in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// BLAKE3 digest identifying an ordered file listing
pub type Fingerprint = [u8; 32];
