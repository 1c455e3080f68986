//! Artifact manifest records and model annotation parsing
//!
//! Model artifacts carry their file listing and related metadata as OCI
//! annotations under the `org.cnai.model.` namespace. This module parses
//! those payloads into typed records and fingerprints listings for change
//! detection.

use crate::types::Fingerprint;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Annotation key carrying the model file listing
pub const MODEL_FILES_KEY: &str = "org.cnai.model.files";

/// Annotation key carrying display tags
pub const MODEL_TAGS_KEY: &str = "org.cnai.model.tags";

/// Namespace prefix of model annotations
pub const MODEL_ANNOTATION_PREFIX: &str = "org.cnai.model.";

/// Hash shown when the listing names files without digests
pub const PLACEHOLDER_HASH: &str = "--";

/// One file record from an artifact listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path of the file within the artifact, `/`-separated
    pub file: String,

    /// Opaque content hash as reported by the registry
    #[serde(default = "default_file_hash")]
    pub file_hash: String,
}

fn default_file_hash() -> String {
    PLACEHOLDER_HASH.to_string()
}

impl FileEntry {
    pub fn new(file: impl Into<String>, file_hash: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            file_hash: file_hash.into(),
        }
    }

    /// Record for a bare file name with no digest
    pub fn without_hash(file: impl Into<String>) -> Self {
        Self::new(file, PLACEHOLDER_HASH)
    }
}

/// Extract the file listing from an artifact's annotations
///
/// Returns an empty listing when the key is absent.
pub fn file_overviews(annotations: &HashMap<String, String>, key: &str) -> Vec<FileEntry> {
    match annotations.get(key) {
        Some(payload) => parse_file_overviews(payload),
        None => Vec::new(),
    }
}

/// Parse a file-list annotation payload
///
/// Accepts the three encodings seen in registries: a JSON array of full
/// records, a JSON array of path strings, and a loose bracketed
/// comma-separated list. Bare names get the placeholder hash. Blank items
/// from stray commas are dropped.
pub fn parse_file_overviews(payload: &str) -> Vec<FileEntry> {
    if let Ok(records) = serde_json::from_str::<Vec<FileEntry>>(payload) {
        return records
            .into_iter()
            .filter(|entry| !entry.file.is_empty())
            .collect();
    }

    if let Ok(names) = serde_json::from_str::<Vec<String>>(payload) {
        return names
            .into_iter()
            .filter(|name| !name.is_empty())
            .map(FileEntry::without_hash)
            .collect();
    }

    debug!("File listing is not JSON, falling back to bracketed-list parsing");
    parse_bracketed_list(payload)
        .into_iter()
        .map(FileEntry::without_hash)
        .collect()
}

/// Parse a display-tags annotation payload
pub fn parse_tags(payload: &str) -> Vec<String> {
    if let Ok(tags) = serde_json::from_str::<Vec<String>>(payload) {
        return tags.into_iter().filter(|tag| !tag.is_empty()).collect();
    }
    parse_bracketed_list(payload)
}

/// Split a loose `[a, b, c]` payload on commas, trimming each item
fn parse_bracketed_list(payload: &str) -> Vec<String> {
    let inner = payload.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when any annotation sits in the model namespace
pub fn is_model_artifact(annotations: &HashMap<String, String>) -> bool {
    annotations
        .keys()
        .any(|key| key.starts_with(MODEL_ANNOTATION_PREFIX))
}

/// Fingerprint of an ordered file listing
///
/// fingerprint = hash("listing" || count || (file_len || file || hash_len || hash)*)
///
/// Lengths are hashed big-endian so distinct listings cannot collide by
/// shifting bytes between fields. Order matters: the same entries in a
/// different order are a different listing.
pub fn fingerprint(entries: &[FileEntry]) -> Fingerprint {
    let mut hasher = Hasher::new();

    hasher.update(b"listing");
    hasher.update(&(entries.len() as u64).to_be_bytes());

    for entry in entries {
        hasher.update(&(entry.file.len() as u64).to_be_bytes());
        hasher.update(entry.file.as_bytes());
        hasher.update(&(entry.file_hash.len() as u64).to_be_bytes());
        hasher.update(entry.file_hash.as_bytes());
    }

    *hasher.finalize().as_bytes()
}
