//! Artifact file tree
//!
//! Represents one artifact file listing as a navigable tree, where each
//! entry keeps its display name, kind, content hash, and container.

pub mod builder;
pub mod node;
pub mod order;
pub mod path;
