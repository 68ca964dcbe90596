//! In-memory remote used by unit tests.

use vendir_manifest::{DependencyRecord, DirectoryPath, GitSource, RefSelection, SourceSpec};

use crate::catalog::{CommitChecker, RemoteTag, TagCandidate, TagCatalog};
use crate::error::{Error, Result};

pub(crate) const URL: &str = "https://example.com/r";

#[derive(Debug, Default)]
pub(crate) struct FakeRemote {
    pub(crate) tags: Vec<RemoteTag>,
    pub(crate) head: Option<String>,
    pub(crate) containing: Vec<(String, TagCandidate)>,
    pub(crate) fail: bool,
}

impl FakeRemote {
    pub(crate) fn with_tags(tags: &[(&str, &str)]) -> Self {
        Self {
            tags: tags
                .iter()
                .map(|(name, sha)| RemoteTag::new(*name, Some(sha)))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_head(mut self, sha: &str) -> Self {
        self.head = Some(sha.to_string());
        self
    }

    pub(crate) fn with_containing(mut self, commit: &str, tag: (&str, &str)) -> Self {
        let candidate = TagCandidate::from_remote(&RemoteTag::new(tag.0, Some(tag.1)))
            .unwrap_or_else(|| panic!("{} is not a version tag", tag.0));
        self.containing.push((commit.to_string(), candidate));
        self
    }

    fn check(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(Error::remote(url, "connection timed out"));
        }
        Ok(())
    }
}

impl TagCatalog for FakeRemote {
    fn list_tags(&self, repository: &str) -> Result<Vec<RemoteTag>> {
        self.check(repository)?;
        Ok(self.tags.clone())
    }
}

impl CommitChecker for FakeRemote {
    fn head_commit(&self, url: &str, _branch: Option<&str>) -> Result<String> {
        self.check(url)?;
        self.head
            .clone()
            .ok_or_else(|| Error::remote(url, "no head"))
    }

    fn tag_containing_commit(&self, url: &str, commit_sha: &str) -> Result<Option<TagCandidate>> {
        self.check(url)?;
        Ok(self
            .containing
            .iter()
            .find(|(commit, _)| commit == commit_sha)
            .map(|(_, tag)| tag.clone()))
    }
}

pub(crate) fn git_record(reference: Option<&str>, sha: Option<&str>) -> DependencyRecord {
    DependencyRecord::new(
        DirectoryPath::from_segments(["vendor", "r"]),
        sha.map(str::to_string),
        reference.map(str::to_string),
        "/vendir.yml",
        SourceSpec::Git(GitSource {
            url: URL.to_string(),
            reference: reference.map(str::to_string),
            branch: reference.map(str::to_string),
            selection: RefSelection::Ref,
            sha: sha.map(str::to_string),
        }),
    )
}

pub(crate) fn range_record(range: &str, sha: Option<&str>) -> DependencyRecord {
    DependencyRecord::new(
        DirectoryPath::from_segments(["vendor", "r"]),
        sha.map(str::to_string),
        Some(range.to_string()),
        "/vendir.yml",
        SourceSpec::Git(GitSource {
            url: URL.to_string(),
            reference: Some(range.to_string()),
            branch: None,
            selection: RefSelection::Semver,
            sha: sha.map(str::to_string),
        }),
    )
}
