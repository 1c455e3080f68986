//! Integration tests for annotation parsing feeding the tree builder

use std::collections::HashMap;
use stowage::manifest::{self, FileEntry, MODEL_FILES_KEY, PLACEHOLDER_HASH};
use stowage::tree::builder::TreeBuilder;

fn annotations(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Test the full path from a JSON record annotation to a navigable tree
#[test]
fn test_json_records_to_tree() {
    let annotations = annotations(&[(
        MODEL_FILES_KEY,
        r#"[
            {"file":"model.safetensors","file_hash":"sha256:aa"},
            {"file":"tokenizer/vocab.json","file_hash":"sha256:bb"}
        ]"#,
    )]);

    let entries = manifest::file_overviews(&annotations, MODEL_FILES_KEY);
    assert_eq!(entries.len(), 2);

    let tree = TreeBuilder::new().build(&entries).unwrap();
    let model = tree.resolve("model.safetensors").unwrap();
    assert_eq!(tree.get(model).unwrap().hash, "sha256:aa");

    let vocab = tree.resolve("tokenizer/vocab.json").unwrap();
    assert_eq!(tree.get(vocab).unwrap().hash, "sha256:bb");
}

/// Test that a plain JSON string array builds with placeholder hashes
#[test]
fn test_string_array_to_tree() {
    let annotations = annotations(&[(
        MODEL_FILES_KEY,
        r#"["config.json","weights/part-0.bin","weights/part-1.bin"]"#,
    )]);

    let entries = manifest::file_overviews(&annotations, MODEL_FILES_KEY);
    let tree = TreeBuilder::new().build(&entries).unwrap();

    let config = tree.resolve("config.json").unwrap();
    assert_eq!(tree.get(config).unwrap().hash, PLACEHOLDER_HASH);

    // Both parts share one weights folder
    let weights = tree.resolve("weights").unwrap();
    assert_eq!(tree.children(weights).len(), 3);
}

/// Test that the loose bracketed encoding still builds a tree
#[test]
fn test_bracketed_list_to_tree() {
    let annotations = annotations(&[(MODEL_FILES_KEY, "[readme.md, src/app.ts]")]);

    let entries = manifest::file_overviews(&annotations, MODEL_FILES_KEY);
    assert_eq!(
        entries,
        vec![
            FileEntry::without_hash("readme.md"),
            FileEntry::without_hash("src/app.ts"),
        ]
    );

    let tree = TreeBuilder::new().build(&entries).unwrap();
    assert!(tree.resolve("src/app.ts").is_some());
}

/// Test that an artifact without a files annotation yields an empty tree
#[test]
fn test_missing_annotation_builds_empty_tree() {
    let annotations = annotations(&[("org.cnai.model.family", "llama3")]);

    let entries = manifest::file_overviews(&annotations, MODEL_FILES_KEY);
    assert!(entries.is_empty());

    let tree = TreeBuilder::new().build(&entries).unwrap();
    assert_eq!(tree.node_count(), 1);
    assert!(tree.children(tree.root_id()).is_empty());
}

/// Test model artifact detection across annotation sets
#[test]
fn test_model_artifact_detection() {
    let model = annotations(&[
        ("org.cnai.model.created", "2024-01-01T00:00:00Z"),
        ("com.example.builder", "ci"),
    ]);
    assert!(manifest::is_model_artifact(&model));

    let plain = annotations(&[("com.example.builder", "ci")]);
    assert!(!manifest::is_model_artifact(&plain));
}

/// Test that the listing fingerprint tracks content and order
#[test]
fn test_fingerprint_tracks_listing() {
    let original = vec![
        FileEntry::new("a.txt", "1"),
        FileEntry::new("b.txt", "2"),
    ];
    let same = original.clone();
    let reordered = vec![
        FileEntry::new("b.txt", "2"),
        FileEntry::new("a.txt", "1"),
    ];
    let rehashed = vec![
        FileEntry::new("a.txt", "1"),
        FileEntry::new("b.txt", "3"),
    ];

    assert_eq!(manifest::fingerprint(&original), manifest::fingerprint(&same));
    assert_ne!(
        manifest::fingerprint(&original),
        manifest::fingerprint(&reordered)
    );
    assert_ne!(
        manifest::fingerprint(&original),
        manifest::fingerprint(&rehashed)
    );
}

/// Test that the built tree records the fingerprint of its listing
#[test]
fn test_tree_carries_listing_fingerprint() {
    let entries = vec![FileEntry::new("a/b.txt", "1")];
    let tree = TreeBuilder::new().build(&entries).unwrap();

    assert_eq!(tree.fingerprint(), manifest::fingerprint(&entries));
}
