//! Integration tests for folder navigation and display ordering

use stowage::browser::FileBrowser;
use stowage::error::TreeError;
use stowage::manifest::FileEntry;
use stowage::tree::builder::TreeBuilder;
use stowage::tree::node::{EntryKind, UP_LINK_NAME};

fn entries(pairs: &[(&str, &str)]) -> Vec<FileEntry> {
    pairs
        .iter()
        .map(|(file, hash)| FileEntry::new(*file, *hash))
        .collect()
}

fn listing_names(browser: &FileBrowser) -> Vec<String> {
    browser.rows().into_iter().map(|row| row.name).collect()
}

/// Test that opening a folder shows up-link, folders, then files
#[test]
fn test_open_folder_buckets_listing() {
    let builder = TreeBuilder::new();
    let mut browser = FileBrowser::new(
        &builder,
        &entries(&[
            ("pkg/b.txt", "1"),
            ("pkg/zeta/x.txt", "2"),
            ("pkg/a.txt", "3"),
            ("pkg/alpha/y.txt", "4"),
        ]),
    )
    .unwrap();

    browser.open_path("pkg").unwrap();

    assert_eq!(
        listing_names(&browser),
        vec![UP_LINK_NAME, "alpha", "zeta", "a.txt", "b.txt"]
    );

    let rows = browser.rows();
    assert!(rows[0].is_up_link);
    assert_eq!(rows[1].kind, EntryKind::Folder);
    assert_eq!(rows[3].kind, EntryKind::File);
}

/// Test that folder and file names sort case-sensitively
#[test]
fn test_display_sort_case_sensitive() {
    let builder = TreeBuilder::new();
    let mut browser = FileBrowser::new(
        &builder,
        &entries(&[
            ("dir/banana.txt", "1"),
            ("dir/Apple.txt", "2"),
            ("dir/apple.txt", "3"),
        ]),
    )
    .unwrap();

    browser.open_path("dir").unwrap();

    assert_eq!(
        listing_names(&browser),
        vec![UP_LINK_NAME, "Apple.txt", "apple.txt", "banana.txt"]
    );
}

/// Test that opening the up-link lands one level up
#[test]
fn test_up_link_navigates_one_level_up() {
    let builder = TreeBuilder::new();
    let mut browser =
        FileBrowser::new(&builder, &entries(&[("a/b/c.txt", "1"), ("a/d.txt", "2")])).unwrap();

    let deep = browser.open_path("a/b").unwrap();
    assert_eq!(browser.selected(), deep);

    // First row of a non-root folder is always the up-link
    let up_link = browser.listing()[0];
    assert!(browser.tree().get(up_link).unwrap().is_up_link);

    let landed = browser.open(up_link).unwrap();
    let a = browser.tree().resolve("a").unwrap();
    assert_eq!(landed, a);

    // The parent folder's listing shows its own up-link plus b and d.txt
    assert_eq!(listing_names(&browser), vec![UP_LINK_NAME, "b", "d.txt"]);

    // One more hop reaches the root, which lists without an up-link
    let up_again = browser.listing()[0];
    let root = browser.open(up_again).unwrap();
    assert_eq!(root, browser.tree().root_id());
    assert_eq!(listing_names(&browser), vec!["a"]);
}

/// Test that the root listing never contains an up-link row
#[test]
fn test_root_listing_has_no_up_link() {
    let builder = TreeBuilder::new();
    let mut browser =
        FileBrowser::new(&builder, &entries(&[("z.txt", "1"), ("a/x.txt", "2")])).unwrap();

    browser.open(browser.tree().root_id()).unwrap();

    let rows = browser.rows();
    assert!(rows.iter().all(|row| !row.is_up_link));
    assert_eq!(listing_names(&browser), vec!["a", "z.txt"]);
}

/// Test that opening folders never reorders canonical children
#[test]
fn test_open_preserves_canonical_order() {
    let builder = TreeBuilder::new();
    let mut browser = FileBrowser::new(
        &builder,
        &entries(&[("dir/z.txt", "1"), ("dir/a.txt", "2")]),
    )
    .unwrap();

    let dir = browser.tree().resolve("dir").unwrap();
    let canonical_before = browser.tree().children(dir).to_vec();

    browser.open(dir).unwrap();
    browser.open(browser.tree().root_id()).unwrap();
    browser.open(dir).unwrap();

    assert_eq!(browser.tree().children(dir), canonical_before.as_slice());
}

/// Test that unknown nodes and paths are reported as errors
#[test]
fn test_open_unknown_targets() {
    let builder = TreeBuilder::new();
    let mut browser = FileBrowser::new(&builder, &entries(&[("a.txt", "1")])).unwrap();

    let result = browser.open_path("missing/b.txt");
    assert!(matches!(result, Err(TreeError::PathNotFound(_))));

    // Failed opens leave the selection alone
    assert_eq!(browser.selected(), browser.tree().root_id());
}

/// Test display rows carry hashes for files only
#[test]
fn test_rows_hash_projection() {
    let builder = TreeBuilder::new();
    let mut browser = FileBrowser::new(
        &builder,
        &entries(&[("dir/data.bin", "sha256:ff"), ("dir/sub/x.txt", "1")]),
    )
    .unwrap();

    browser.open_path("dir").unwrap();

    for row in browser.rows() {
        if row.kind == EntryKind::File {
            assert_eq!(row.hash, "sha256:ff");
        } else {
            // Folders and up-links have no digest of their own
            assert!(row.hash.is_empty());
        }
    }
}

/// Test that an unchanged listing does not reset navigation
#[test]
fn test_replace_listing_no_op_keeps_selection() {
    let builder = TreeBuilder::new();
    let listing = entries(&[("a/b/c.txt", "1"), ("a/d.txt", "2")]);
    let mut browser = FileBrowser::new(&builder, &listing).unwrap();

    let deep = browser.open_path("a/b").unwrap();

    let rebuilt = browser.replace_listing(&builder, &listing).unwrap();
    assert!(!rebuilt);
    assert_eq!(browser.selected(), deep);
}

/// Test that a changed listing rebuilds and resets to the root
#[test]
fn test_replace_listing_rebuilds_on_change() {
    let builder = TreeBuilder::new();
    let mut browser =
        FileBrowser::new(&builder, &entries(&[("a/b.txt", "1")])).unwrap();
    browser.open_path("a").unwrap();

    let changed = entries(&[("a/b.txt", "1"), ("new.txt", "2")]);
    let rebuilt = browser.replace_listing(&builder, &changed).unwrap();

    assert!(rebuilt);
    assert_eq!(browser.selected(), browser.tree().root_id());
    assert!(browser.tree().resolve("new.txt").is_some());
}
