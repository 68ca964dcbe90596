//! End-to-end tests for the update flow
//!
//! fetch -> parse -> resolve -> plan -> sync, with the sync tool replaced by
//! an in-process runner.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use vendir_fs::{
    DependencyFile, DirectorySource, FetchOptions, LockRequirement, ManifestFiles, MemorySource,
    fetch_files,
};
use vendir_git::RemoteRepository;
use vendir_manifest::{DependencyRecord, FileParser};
use vendir_resolve::{
    CommitChecker, PlannedUpdate, RemoteTag, Result as ResolveResult, TagCandidate, TagCatalog,
    UpdatePlanner, VersionResolver,
};
use vendir_sync::{
    CommandOutput, CommandRunner, Error as SyncError, FileUpdater, Result as SyncResult,
    SyncApplier, SyncCommand, SyncOptions,
};
use vendir_test_utils::fixtures;
use vendir_test_utils::git::UpstreamRepo;
use vendir_test_utils::workspace::TestWorkspace;

/// Tags of a single upstream, keyed by name.
struct StaticRemote {
    tags: Vec<(&'static str, &'static str)>,
}

impl TagCatalog for StaticRemote {
    fn list_tags(&self, _repository: &str) -> ResolveResult<Vec<RemoteTag>> {
        Ok(self
            .tags
            .iter()
            .map(|(name, sha)| RemoteTag::new(*name, Some(*sha)))
            .collect())
    }
}

impl CommitChecker for StaticRemote {
    fn head_commit(&self, _url: &str, _branch: Option<&str>) -> ResolveResult<String> {
        Ok(self.tags.last().map(|(_, sha)| sha.to_string()).unwrap_or_default())
    }

    fn tag_containing_commit(
        &self,
        _url: &str,
        commit_sha: &str,
    ) -> ResolveResult<Option<TagCandidate>> {
        Ok(self
            .tags
            .iter()
            .find(|(_, sha)| *sha == commit_sha)
            .and_then(|(name, sha)| TagCandidate::from_remote(&RemoteTag::new(*name, Some(*sha)))))
    }
}

/// Stands in for `vendir sync`: rewrites the lockfile sha.
struct LockWriter {
    from: &'static str,
    to: &'static str,
    calls: Cell<usize>,
}

impl LockWriter {
    fn new(from: &'static str, to: &'static str) -> Self {
        Self {
            from,
            to,
            calls: Cell::new(0),
        }
    }
}

impl CommandRunner for LockWriter {
    fn run(&self, _command: &SyncCommand, working_dir: &Path) -> SyncResult<CommandOutput> {
        self.calls.set(self.calls.get() + 1);
        let lock = working_dir.join("vendir.lock.yml");
        let content = fs::read_to_string(&lock)?;
        fs::write(&lock, content.replace(self.from, self.to))?;
        Ok(CommandOutput {
            status: Some(0),
            ..CommandOutput::default()
        })
    }
}

fn parse(files: &ManifestFiles) -> Vec<DependencyRecord> {
    FileParser::new(files).parse().unwrap()
}

fn plan(
    records: &[DependencyRecord],
    catalog: &dyn TagCatalog,
    checker: &dyn CommitChecker,
) -> Vec<PlannedUpdate> {
    let resolver = VersionResolver::new(catalog, checker);
    let planner = UpdatePlanner::new();
    records
        .iter()
        .map(|record| planner.plan(&resolver.resolve(record).unwrap()).unwrap())
        .collect()
}

fn updated_files(
    files: &ManifestFiles,
    planned: &[PlannedUpdate],
    runner: &dyn CommandRunner,
) -> SyncResult<Vec<DependencyFile>> {
    let applier = SyncApplier::new(runner, SyncOptions::default());
    FileUpdater::new(files, planned, &applier).updated_dependency_files()
}

#[test]
fn test_single_top_level_dependency_reconciles() {
    let source = MemorySource::new()
        .with_file(
            "vendir.yml",
            "directories:\n- path: x\n  git:\n    url: https://example.com/r\n    ref: v1.0.0\n",
        )
        .with_file("vendir.lock.yml", "directories:\n- path: x\n  git:\n    sha: deadbeef\n");

    let files = fetch_files(&source, &FetchOptions::default()).unwrap();
    let records = parse(&files);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "x");
    assert_eq!(records[0].version.as_deref(), Some("deadbeef"));
    assert_eq!(records[0].requirement(), Some("v1.0.0"));
    assert_eq!(records[0].package_manager, "vendir");
}

#[test]
fn test_version_tag_update_rewrites_manifest_and_lock() {
    let source = MemorySource::new()
        .with_file(
            "vendir.yml",
            fixtures::git_manifest("x", "https://example.com/r", "v1.0.0"),
        )
        .with_file("vendir.lock.yml", fixtures::git_lockfile("x", "deadbeef"));
    let files = fetch_files(&source, &FetchOptions::default()).unwrap();
    let remote = StaticRemote {
        tags: vec![("v1.0.0", "deadbeef"), ("v2.0.0", "cafef00d")],
    };

    let planned = plan(&parse(&files), &remote, &remote);
    assert_eq!(planned.len(), 1);
    assert!(planned[0].update_needed);
    assert_eq!(planned[0].record.requirement(), Some("v2.0.0"));

    let runner = LockWriter::new("deadbeef", "cafef00d");
    let updated = updated_files(&files, &planned, &runner).unwrap();

    assert_eq!(runner.calls.get(), 1);
    let names: Vec<&str> = updated.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["vendir.yml", "vendir.lock.yml"]);
    assert!(updated[0].content.contains("ref: v2.0.0"));
    assert!(updated[1].content.contains("sha: cafef00d"));

    let reparsed = parse(&ManifestFiles::new(updated[0].clone(), Some(updated[1].clone())));
    assert_eq!(reparsed[0].version.as_deref(), Some("cafef00d"));
    assert_eq!(reparsed[0].requirement(), Some("v2.0.0"));
}

#[test]
fn test_range_update_only_changes_lock() {
    let manifest = "directories:\n- path: vendor\n  contents:\n  - path: net\n    git:\n      url: https://example.com/net\n      refSelection:\n        semver:\n          constraints: '>=1.0.0 <2.0.0'\n";
    let lock = fixtures::git_lockfile("net", "1111111");
    let files = ManifestFiles::new(
        DependencyFile::new("vendir.yml", manifest),
        Some(DependencyFile::new("vendir.lock.yml", lock)),
    );
    let remote = StaticRemote {
        tags: vec![("v1.0.0", "1111111"), ("v1.4.0", "1444444"), ("v2.0.0", "2222222")],
    };

    let planned = plan(&parse(&files), &remote, &remote);
    assert!(planned[0].update_needed);
    assert_eq!(planned[0].ref_update(), None);
    assert_eq!(planned[0].record.requirement(), Some("v1.4.0"));

    let runner = LockWriter::new("1111111", "1444444");
    let updated = updated_files(&files, &planned, &runner).unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].name, "vendir.lock.yml");
    assert!(updated[0].content.contains("1444444"));
}

#[test]
fn test_up_to_date_dependency_skips_sync() {
    let files = ManifestFiles::new(
        DependencyFile::new(
            "vendir.yml",
            fixtures::git_manifest("x", "https://example.com/r", "v2.0.0"),
        ),
        Some(DependencyFile::new(
            "vendir.lock.yml",
            fixtures::git_lockfile("x", "cafef00d"),
        )),
    );
    let remote = StaticRemote {
        tags: vec![("v1.0.0", "deadbeef"), ("v2.0.0", "cafef00d")],
    };

    let planned = plan(&parse(&files), &remote, &remote);
    let runner = LockWriter::new("cafef00d", "0000000");

    assert!(matches!(
        updated_files(&files, &planned, &runner),
        Err(SyncError::NoFilesChanged)
    ));
    assert_eq!(runner.calls.get(), 0);
}

#[test]
fn test_fixture_workspace_against_local_upstream() {
    let upstream = UpstreamRepo::new();
    let first = upstream.commit("lib.txt", "one");
    upstream.tag("v1.0.0");
    let second = upstream.commit("lib.txt", "two");
    upstream.annotated_tag("v1.1.0");

    let workspace = TestWorkspace::empty()
        .with_manifest(&fixtures::git_manifest("lib", &upstream.url(), "v1.0.0"));
    let source = DirectorySource::new(workspace.root()).unwrap();

    // Check runs need no lockfile.
    let options = FetchOptions::default().with_lock(LockRequirement::Optional);
    let files = fetch_files(&source, &options).unwrap();
    assert!(files.lock.is_none());

    let remote = RemoteRepository::new();
    let records = parse(&files);
    let resolved = VersionResolver::new(&remote, &remote)
        .resolve(&records[0])
        .unwrap();

    assert!(resolved.resolution.update_needed);
    assert_eq!(resolved.resolution.latest_version().as_deref(), Some("1.1.0"));
    assert_eq!(
        resolved.resolution.tag().and_then(|t| t.commit_sha.as_deref()),
        Some(second.as_str())
    );

    // A full update needs the lockfile.
    workspace.write("vendir.lock.yml", &fixtures::git_lockfile("lib", &first));
    let files = fetch_files(&source, &FetchOptions::default()).unwrap();
    assert!(files.lock.is_some());
}
