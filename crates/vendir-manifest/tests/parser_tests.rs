use pretty_assertions::assert_eq;
use vendir_fs::{DependencyFile, ErrorKind, ManifestFiles};
use vendir_manifest::{
    DependencyRecord, Error, FileParser, RefSelection, SourceSpec, RefUpdate, DirectoryPath,
    rewrite_git_refs,
};
use vendir_test_utils::fixtures;

fn files(manifest: &str, lock: Option<&str>) -> ManifestFiles {
    ManifestFiles::new(
        DependencyFile::new("vendir.yml", manifest),
        lock.map(|content| DependencyFile::new("vendir.lock.yml", content)),
    )
}

fn parse(manifest: &str, lock: Option<&str>) -> Result<Vec<DependencyRecord>, Error> {
    FileParser::new(&files(manifest, lock)).parse()
}

#[test]
fn test_fixture_yields_three_records() {
    let records = parse(fixtures::MANIFEST, Some(fixtures::LOCKFILE)).unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "config/_ytt_lib/github.com/cloudfoundry/cf-k8s-networking",
            "config/_ytt_lib/github.com/cloudfoundry/cf-networking-release",
            "config/_ytt_lib/github.com/cloudfoundry/cf-k8s-logging/config",
        ]
    );
}

#[test]
fn test_fixture_pinned_git_record() {
    let records = parse(fixtures::MANIFEST, Some(fixtures::LOCKFILE)).unwrap();
    let record = &records[0];

    assert_eq!(
        record.version.as_deref(),
        Some("4153bbdbaf3e8d3d681a84a112f3c9cc10129ff3")
    );
    assert_eq!(record.requirement(), Some("v0.0.6"));
    assert_eq!(record.requirements[0].file, "/vendir.yml");

    let git = record.git_source().unwrap();
    assert_eq!(git.url, "https://github.com/cloudfoundry/cf-k8s-networking");
    assert_eq!(git.reference.as_deref(), Some("v0.0.6"));
    assert_eq!(git.branch.as_deref(), Some("v0.0.6"));
    assert_eq!(git.selection, RefSelection::Ref);
}

#[test]
fn test_fixture_semver_range_record() {
    let records = parse(fixtures::MANIFEST, Some(fixtures::LOCKFILE)).unwrap();
    let git = records[1].git_source().unwrap();

    assert_eq!(records[1].requirement(), Some(">=2.36.0"));
    assert_eq!(git.reference.as_deref(), Some(">=2.36.0"));
    assert_eq!(git.branch, None);
    assert!(git.is_semver_range());
}

#[test]
fn test_fixture_github_release_record() {
    let records = parse(fixtures::MANIFEST, Some(fixtures::LOCKFILE)).unwrap();
    let record = &records[2];

    assert_eq!(
        record.version.as_deref(),
        Some("https://api.github.com/repos/cloudfoundry/cf-k8s-logging/releases/26725288")
    );
    assert_eq!(record.requirement(), Some("0.2.1"));
    match record.source() {
        Some(SourceSpec::GithubRelease(release)) => {
            assert_eq!(release.slug, "cloudfoundry/cf-k8s-logging");
            assert_eq!(release.tag.as_deref(), Some("0.2.1"));
        }
        other => panic!("expected githubRelease source, got {other:?}"),
    }
}

#[test]
fn test_single_git_dependency() {
    let manifest = fixtures::git_manifest("x", "https://example.com/r", "v1.0.0");
    let lock = fixtures::git_lockfile("x", "deadbeef");

    let records = parse(&manifest, Some(&lock)).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "vendor/x");
    assert_eq!(records[0].version.as_deref(), Some("deadbeef"));
    assert_eq!(records[0].requirement(), Some("v1.0.0"));
}

#[test]
fn test_top_level_leaf_name_is_its_path() {
    let manifest = "directories:\n- path: x\n  git:\n    url: https://example.com/r\n    ref: v1.0.0\n";
    let lock = "directories:\n- path: x\n  git:\n    sha: deadbeef\n";

    let records = parse(manifest, Some(lock)).unwrap();

    assert_eq!(records[0].name, "x");
    assert_eq!(records[0].version.as_deref(), Some("deadbeef"));
    assert_eq!(records[0].requirement(), Some("v1.0.0"));
}

#[test]
fn test_drifted_lockfile_is_structural_mismatch() {
    let err = parse(fixtures::MANIFEST, Some(fixtures::DRIFTED_LOCKFILE)).unwrap_err();

    assert!(matches!(err, Error::StructuralMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::NotParseable);
    assert!(err.to_string().contains("/vendir.lock.yml"));
}

#[test]
fn test_swapped_paths_are_structural_mismatch() {
    let manifest = "directories:\n- path: a\n  git: {url: u, ref: main}\n- path: b\n  git: {url: u, ref: main}\n";
    let lock = "directories:\n- path: b\n  git: {sha: abc1234}\n- path: a\n  git: {sha: abc1234}\n";

    let err = parse(manifest, Some(lock)).unwrap_err();
    assert!(err.to_string().contains("entry 0"));
}

#[test]
fn test_garbage_manifest_is_not_parseable() {
    let err = parse("this: [is not: valid", Some(fixtures::LOCKFILE)).unwrap_err();

    assert!(matches!(err, Error::NotParseable { ref file, .. } if file == "/vendir.yml"));
    assert_eq!(err.kind(), ErrorKind::NotParseable);
}

#[test]
fn test_missing_directories_key_is_not_parseable() {
    let err = parse("apiVersion: v1\n", None).unwrap_err();
    assert!(err.to_string().contains("directories"));
}

#[test]
fn test_missing_lockfile_yields_unlocked_records() {
    let records = parse(fixtures::MANIFEST, None).unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.version.is_none()));
    assert_eq!(records[0].requirement(), Some("v0.0.6"));
}

#[test]
fn test_nested_directory_reports_logical_path() {
    let files = ManifestFiles::new(
        DependencyFile::new("vendir.yml", "nope: [").with_directory("/deploy"),
        None,
    );
    let err = FileParser::new(&files).parse().unwrap_err();
    assert!(err.to_string().contains("/deploy/vendir.yml"));
}

#[test]
fn test_rewrite_then_parse_reflects_new_ref() {
    let manifest = DependencyFile::new("vendir.yml", fixtures::MANIFEST);
    let updates = [RefUpdate {
        directory: DirectoryPath::from_segments([
            "config/_ytt_lib",
            "github.com/cloudfoundry/cf-k8s-networking",
        ]),
        reference: "v0.0.7".to_string(),
    }];

    let rewritten = rewrite_git_refs(&manifest, &updates).unwrap();
    let records = parse(&rewritten, Some(fixtures::LOCKFILE)).unwrap();

    assert_eq!(records[0].requirement(), Some("v0.0.7"));
    assert_eq!(records[1].requirement(), Some(">=2.36.0"));
}
