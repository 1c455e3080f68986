//! Error types for the stowage artifact browsing system.

use crate::types::NodeId;
use thiserror::Error;

/// Tree construction and navigation errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Empty path in file listing")]
    EmptyPath,

    #[error("Empty segment in path: {0:?}")]
    EmptySegment(String),

    #[error("Path not found in tree: {0}")]
    PathNotFound(String),
}

/// Surface errors for the artifact console model layer
#[derive(Debug, Error)]
pub enum StowageError {
    #[error("Tree error: {0}")]
    TreeError(#[from] TreeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for StowageError {
    fn from(err: config::ConfigError) -> Self {
        StowageError::ConfigError(err.to_string())
    }
}
