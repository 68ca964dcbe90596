//! Remote tag catalog and commit lookups.
//!
//! These traits are the only way the resolver talks to a git host. The
//! git2-backed implementation lives in `vendir-git`; tests use in-memory
//! fakes.

use semver::Version;
use serde::Serialize;

use crate::error::Result;
use crate::version::{looks_like_commit_sha, looks_like_version, parse_version};

/// A tag as listed by a remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteTag {
    pub name: String,
    /// Commit the tag points at, peeled through annotated tags.
    pub commit_sha: Option<String>,
}

impl RemoteTag {
    pub fn new(name: impl Into<String>, commit_sha: Option<&str>) -> Self {
        Self {
            name: name.into(),
            commit_sha: commit_sha.map(str::to_string),
        }
    }
}

/// A tag whose name parses as a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCandidate {
    /// Raw tag text, prefix included.
    pub name: String,
    pub version: Version,
    pub commit_sha: Option<String>,
}

impl TagCandidate {
    pub fn from_remote(tag: &RemoteTag) -> Option<Self> {
        Some(Self {
            name: tag.name.clone(),
            version: parse_version(&tag.name)?,
            commit_sha: tag.commit_sha.clone(),
        })
    }
}

/// Keep the tags that parse as versions, highest first.
///
/// Ordered by semver precedence, which ignores build metadata. The sort is
/// stable, so equal versions stay in catalog order.
pub fn version_candidates(tags: &[RemoteTag]) -> Vec<TagCandidate> {
    let mut candidates: Vec<TagCandidate> =
        tags.iter().filter_map(TagCandidate::from_remote).collect();
    candidates.sort_by(|a, b| b.version.cmp_precedence(&a.version));
    candidates
}

/// Lists the tags of a repository.
pub trait TagCatalog {
    /// All tags of `repository`, every page included.
    fn list_tags(&self, repository: &str) -> Result<Vec<RemoteTag>>;
}

/// Branch head and commit containment lookups.
pub trait CommitChecker {
    /// Latest commit on `branch`, or on the remote's default branch.
    fn head_commit(&self, url: &str, branch: Option<&str>) -> Result<String>;

    /// Highest version tag whose history contains `commit_sha`.
    fn tag_containing_commit(&self, url: &str, commit_sha: &str) -> Result<Option<TagCandidate>>;

    fn ref_looks_like_version(&self, reference: &str) -> bool {
        looks_like_version(reference)
    }

    fn ref_looks_like_commit_sha(&self, reference: &str) -> bool {
        looks_like_commit_sha(reference)
    }
}
