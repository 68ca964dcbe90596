use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vendir_fs::{
    DependencyFile, DirectorySource, ErrorKind, FetchOptions, LockRequirement, MemorySource,
    fetch_files,
};

#[test]
fn test_fetches_both_files() {
    let source = MemorySource::new()
        .with_file("vendir.yml", "directories: []\n")
        .with_file("vendir.lock.yml", "directories: []\n");

    let files = fetch_files(&source, &FetchOptions::default()).unwrap();

    assert_eq!(files.manifest, DependencyFile::new("vendir.yml", "directories: []\n"));
    assert_eq!(files.lock.unwrap().path().as_str(), "/vendir.lock.yml");
}

#[test]
fn test_missing_manifest_is_not_found() {
    let source = MemorySource::new().with_file("vendir.lock.yml", "directories: []\n");

    let err = fetch_files(&source, &FetchOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("/vendir.yml"), "got: {err}");
}

#[test]
fn test_missing_lockfile_required() {
    let source = MemorySource::new().with_file("vendir.yml", "directories: []\n");

    let err = fetch_files(&source, &FetchOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("/vendir.lock.yml"), "got: {err}");
}

#[test]
fn test_missing_lockfile_optional() {
    let source = MemorySource::new().with_file("vendir.yml", "directories: []\n");
    let options = FetchOptions::default().with_lock(LockRequirement::Optional);

    let files = fetch_files(&source, &options).unwrap();

    assert!(files.lock.is_none());
}

#[test]
fn test_directory_source_reads_from_disk() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("vendir.yml"), "directories: []\n").unwrap();
    fs::write(temp.path().join("vendir.lock.yml"), "directories: []\n").unwrap();

    let source = DirectorySource::new(temp.path())
        .unwrap()
        .with_directory("/config");
    let files = fetch_files(&source, &FetchOptions::default()).unwrap();

    assert_eq!(files.manifest.path().as_str(), "/config/vendir.yml");
    assert_eq!(files.manifest.content, "directories: []\n");
}
