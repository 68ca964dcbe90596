//! Ref listing and commit containment over git2.

use std::collections::BTreeMap;

use git2::{Direction, Oid, Remote, Repository};
use tempfile::TempDir;
use vendir_resolve::{CommitChecker, RemoteTag, TagCandidate, TagCatalog, version_candidates};

use crate::{Error, Result};

const TAG_PREFIX: &str = "refs/tags/";
const PEELED_SUFFIX: &str = "^{}";

/// A ref advertised by a remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub name: String,
    pub oid: String,
}

impl RemoteRef {
    pub fn new(name: impl Into<String>, oid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oid: oid.into(),
        }
    }
}

/// Talks to remotes by URL. Every call opens its own connection.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoteRepository;

impl RemoteRepository {
    pub fn new() -> Self {
        Self
    }

    /// Advertised refs, like `git ls-remote`.
    pub fn list_refs(&self, url: &str) -> Result<Vec<RemoteRef>> {
        let mut remote = Remote::create_detached(url)?;
        remote.connect(Direction::Fetch)?;
        let refs: Vec<RemoteRef> = remote
            .list()?
            .iter()
            .map(|head| RemoteRef::new(head.name(), head.oid().to_string()))
            .collect();
        remote.disconnect()?;

        tracing::debug!(url = %url, refs = refs.len(), "Listed remote refs");
        Ok(refs)
    }

    pub fn tags(&self, url: &str) -> Result<Vec<RemoteTag>> {
        Ok(tags_from_refs(&self.list_refs(url)?))
    }

    /// Commit at the tip of `branch`, or at the remote `HEAD`.
    pub fn head(&self, url: &str, branch: Option<&str>) -> Result<String> {
        let refs = self.list_refs(url)?;
        let wanted: Vec<String> = match branch {
            Some(name) => vec![
                format!("refs/heads/{name}"),
                format!("{TAG_PREFIX}{name}{PEELED_SUFFIX}"),
                format!("{TAG_PREFIX}{name}"),
            ],
            None => vec!["HEAD".to_string()],
        };

        wanted
            .iter()
            .find_map(|name| refs.iter().find(|r| &r.name == name))
            .map(|r| r.oid.clone())
            .ok_or_else(|| Error::RefNotFound {
                url: url.to_string(),
                name: branch.unwrap_or("HEAD").to_string(),
            })
    }

    /// Highest version tag at or after `commit_sha` in history.
    ///
    /// Fetches heads and tags into a scratch bare repository that is removed
    /// when the call returns. An unknown commit yields `None`.
    pub fn containing_tag(&self, url: &str, commit_sha: &str) -> Result<Option<TagCandidate>> {
        let scratch = TempDir::new()?;
        let repo = Repository::init_bare(scratch.path())?;
        {
            let mut remote = repo.remote_anonymous(url)?;
            remote.fetch(
                &[
                    "+refs/heads/*:refs/remotes/origin/*",
                    "+refs/tags/*:refs/tags/*",
                ],
                None,
                None,
            )?;
        }

        let target = match repo
            .revparse_single(commit_sha)
            .and_then(|object| object.peel_to_commit())
        {
            Ok(commit) => commit.id(),
            Err(e) => {
                tracing::debug!(url = %url, commit = %commit_sha, error = %e, "Commit not in fetched history");
                return Ok(None);
            }
        };

        let mut tags = Vec::new();
        for name in repo.tag_names(None)?.iter().flatten() {
            let commit = repo
                .revparse_single(&format!("{TAG_PREFIX}{name}"))?
                .peel_to_commit()?;
            tags.push(RemoteTag::new(name, Some(&commit.id().to_string())));
        }

        for candidate in version_candidates(&tags) {
            let Some(sha) = candidate.commit_sha.as_deref() else {
                continue;
            };
            let oid = Oid::from_str(sha)?;
            if oid == target || repo.graph_descendant_of(oid, target)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

/// Pair each tag with its commit, preferring the peeled `^{}` entry that
/// annotated tags advertise. Order follows the listing.
pub fn tags_from_refs(refs: &[RemoteRef]) -> Vec<RemoteTag> {
    let mut tags: Vec<(&str, &str)> = Vec::new();
    let mut peeled: BTreeMap<&str, &str> = BTreeMap::new();

    for r in refs {
        let Some(name) = r.name.strip_prefix(TAG_PREFIX) else {
            continue;
        };
        match name.strip_suffix(PEELED_SUFFIX) {
            Some(base) => {
                peeled.insert(base, r.oid.as_str());
            }
            None => tags.push((name, r.oid.as_str())),
        }
    }

    tags.into_iter()
        .map(|(name, oid)| {
            let commit = peeled.get(name).copied().unwrap_or(oid);
            RemoteTag::new(name, Some(commit))
        })
        .collect()
}

impl TagCatalog for RemoteRepository {
    fn list_tags(&self, repository: &str) -> vendir_resolve::Result<Vec<RemoteTag>> {
        self.tags(repository).map_err(|e| e.into_remote(repository))
    }
}

impl CommitChecker for RemoteRepository {
    fn head_commit(&self, url: &str, branch: Option<&str>) -> vendir_resolve::Result<String> {
        self.head(url, branch).map_err(|e| e.into_remote(url))
    }

    fn tag_containing_commit(
        &self,
        url: &str,
        commit_sha: &str,
    ) -> vendir_resolve::Result<Option<TagCandidate>> {
        self.containing_tag(url, commit_sha)
            .map_err(|e| e.into_remote(url))
    }
}
