use std::io::Write;

use maptree::error::MapTreeError;
use maptree::loader::load_binary_file;
use tempfile::NamedTempFile;

fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_labels_and_features() {
    let file = write_dataset("1 0 1 0\n0 1 1 1\n1 0 0 1\n");
    let (features, labels) = load_binary_file(file.path()).unwrap();

    assert_eq!(labels, vec![true, false, true]);
    assert_eq!(
        features,
        vec![
            vec![false, true, false],
            vec![true, true, true],
            vec![false, false, true],
        ]
    );
}

#[test]
fn skips_blank_and_short_lines() {
    let file = write_dataset("1 0\n\n0\nx\n0 1\n");
    let (features, labels) = load_binary_file(file.path()).unwrap();

    assert_eq!(labels, vec![true, false]);
    assert_eq!(features, vec![vec![false], vec![true]]);
}

#[test]
fn ignores_non_binary_characters() {
    // anything that is not a 0 or 1 acts as a separator
    let file = write_dataset("1,0;1\n0 1 1\n");
    let (features, labels) = load_binary_file(file.path()).unwrap();

    assert_eq!(labels, vec![true, false]);
    assert_eq!(features, vec![vec![false, true], vec![true, true]]);
}

#[test]
fn rejects_inconsistent_widths() {
    let file = write_dataset("1 0 1\n1 0\n");
    let err = load_binary_file(file.path()).unwrap_err();
    match err {
        MapTreeError::InvalidInput(msg) => {
            assert!(msg.contains("line 2"), "unexpected message: {msg}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_file.txt");
    let err = load_binary_file(&missing).unwrap_err();
    assert!(matches!(err, MapTreeError::Io { .. }));
}
