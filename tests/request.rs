//! Run request construction and validation tests.

use rebundle::{RebundleError, SizeMode, StackRequest};

#[test]
fn defaults_to_classic_addressing_with_no_split() {
    let request = StackRequest::new("shots", "archive", "master", 0, 9);
    assert_eq!(request.size_mode, SizeMode::Classic);
    assert!(request.split_every.is_none());
}

#[test]
fn split_every_zero_disables_count_splitting() {
    let request = StackRequest::new("shots", "archive", "master", 0, 9).with_split_every(0);
    assert!(request.split_every.is_none());

    let request = request.with_split_every(2000);
    assert_eq!(request.split_every.map(|every| every.get()), Some(2000));
}

#[test]
fn container_paths_use_base_name_and_ascending_index() {
    let request = StackRequest::new("shots", "archive", "master", 0, 9);
    assert_eq!(
        request.container_path(0),
        std::path::Path::new("archive").join("master_0.tif"),
    );
    assert_eq!(
        request.container_path(12),
        std::path::Path::new("archive").join("master_12.tif"),
    );
}

#[test]
fn frame_count_is_inclusive() {
    let request = StackRequest::new("shots", "archive", "master", 10, 10);
    assert_eq!(request.frame_count(), 1);

    let request = StackRequest::new("shots", "archive", "master", 0, 7999);
    assert_eq!(request.frame_count(), 8000);
}

#[test]
fn inverted_range_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let request = StackRequest::new(dir.path(), dir.path(), "master", 9, 0);

    match request.validate().unwrap_err() {
        RebundleError::InvalidFrameRange { start: 9, end: 0 } => {}
        other => panic!("Expected InvalidFrameRange, got: {other}"),
    }
}

#[test]
fn missing_source_directory_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone");
    let request = StackRequest::new(&missing, dir.path(), "master", 0, 9);

    match request.validate().unwrap_err() {
        RebundleError::SourceDirectory { path } => assert_eq!(path, missing),
        other => panic!("Expected SourceDirectory, got: {other}"),
    }
}

#[test]
fn existing_directory_and_ordered_range_validate() {
    let dir = tempfile::tempdir().unwrap();
    let request = StackRequest::new(dir.path(), dir.path(), "master", 0, 9);
    assert!(request.validate().is_ok());
}
