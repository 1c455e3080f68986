//! Display ordering for folder listings

use crate::tree::builder::FileTree;
use crate::types::NodeId;

/// Sort a folder listing for display
///
/// Up-link entries come first, then folders by case-sensitive lexicographic
/// name, then files the same way. Entries with equal names keep their
/// relative order. Returns a new ordering; the canonical child order of the
/// tree is left untouched.
pub fn sort_for_display(tree: &FileTree, children: &[NodeId]) -> Vec<NodeId> {
    let mut up_links: Vec<NodeId> = Vec::new();
    let mut folders: Vec<(&str, NodeId)> = Vec::new();
    let mut files: Vec<(&str, NodeId)> = Vec::new();

    for &child_id in children {
        let child = match tree.get(child_id) {
            Some(child) => child,
            None => continue,
        };
        if child.is_up_link {
            up_links.push(child_id);
        } else if child.is_folder() {
            folders.push((child.name.as_str(), child_id));
        } else {
            files.push((child.name.as_str(), child_id));
        }
    }

    // sort_by is stable, so equal names stay in canonical order
    folders.sort_by(|a, b| a.0.cmp(b.0));
    files.sort_by(|a, b| a.0.cmp(b.0));

    up_links
        .into_iter()
        .chain(folders.into_iter().map(|(_, id)| id))
        .chain(files.into_iter().map(|(_, id)| id))
        .collect()
}

/// Children of a folder in display order
pub fn folder_listing(tree: &FileTree, folder: NodeId) -> Vec<NodeId> {
    sort_for_display(tree, tree.children(folder))
}
