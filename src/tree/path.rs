//! Path segment handling for listing entries

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Separator between folder segments in listing paths
pub const FOLDER_PATH_SEPARATOR: char = '/';

/// How empty path segments are handled during tree construction
///
/// Empty segments come from doubled, leading, or trailing separators
/// (`a//b`, `/a`, `a/`). They are a defect in the listing, never a real
/// folder name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentPolicy {
    /// Fail with an error on any empty segment
    #[default]
    Reject,
    /// Drop empty segments and keep the rest of the path
    Normalize,
}

/// Split a listing path into normalized segments
///
/// Segments are normalized to NFC so composed and decomposed spellings of
/// the same name land in one node. A path that yields no segments is an
/// error under either policy.
pub fn split_segments(path: &str, policy: SegmentPolicy) -> Result<Vec<String>, TreeError> {
    if path.is_empty() {
        return Err(TreeError::EmptyPath);
    }

    let mut segments = Vec::new();
    for raw in path.split(FOLDER_PATH_SEPARATOR) {
        if raw.is_empty() {
            match policy {
                SegmentPolicy::Reject => return Err(TreeError::EmptySegment(path.to_string())),
                SegmentPolicy::Normalize => continue,
            }
        }
        segments.push(normalize_segment(raw));
    }

    if segments.is_empty() {
        return Err(TreeError::EmptyPath);
    }

    Ok(segments)
}

/// Normalize a single segment to NFC (Canonical Composition)
pub fn normalize_segment(segment: &str) -> String {
    segment.nfc().collect()
}
