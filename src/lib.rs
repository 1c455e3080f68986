//! Stowage: Artifact File Listing Trees
//!
//! Builds navigable file trees from flat artifact manifest listings and
//! provides the display ordering, navigation, and property projection
//! used by the artifact console.

pub mod additions;
pub mod browser;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod properties;
pub mod tree;
pub mod types;
