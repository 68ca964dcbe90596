//! Reconciled dependency records.

use serde::Serialize;

use crate::PACKAGE_MANAGER;
use crate::path::DirectoryPath;

/// How the `reference` of a git source was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RefSelection {
    /// `git.ref`: a branch, tag or commit.
    #[default]
    Ref,
    /// `git.refSelection.semver.constraints`: a version range.
    Semver,
}

/// A vendored git repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GitSource {
    pub url: String,
    /// The declared ref, or the range when `selection` is `Semver`.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    /// Concrete branch/tag to track. `None` while the ref is still a range.
    pub branch: Option<String>,
    pub selection: RefSelection,
    /// Commit recorded in the lockfile.
    pub sha: Option<String>,
}

impl GitSource {
    /// Copy of this source pinned to a concrete tag or branch.
    pub fn pinned_to(&self, reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self {
            reference: Some(reference.clone()),
            branch: Some(reference),
            ..self.clone()
        }
    }

    pub fn is_semver_range(&self) -> bool {
        self.selection == RefSelection::Semver && self.branch.is_none()
    }
}

/// A GitHub release asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GithubReleaseSource {
    /// `owner/repo`
    pub slug: String,
    pub tag: Option<String>,
    /// Release URL recorded in the lockfile.
    pub url: Option<String>,
}

/// Where a dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SourceSpec {
    Git(GitSource),
    GithubRelease(GithubReleaseSource),
}

impl SourceSpec {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Git(_) => "git",
            Self::GithubRelease(_) => "githubRelease",
        }
    }

    /// URL identifying the upstream: the git URL, or the GitHub repository
    /// page of a release slug.
    pub fn identity(&self) -> String {
        match self {
            Self::Git(git) => git.url.clone(),
            Self::GithubRelease(release) => format!("https://github.com/{}", release.slug),
        }
    }

    pub fn as_git(&self) -> Option<&GitSource> {
        match self {
            Self::Git(git) => Some(git),
            Self::GithubRelease(_) => None,
        }
    }
}

/// One declaration of a dependency in a manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RequirementEntry {
    /// Declared constraint: an exact ref, a range, or nothing.
    pub requirement: Option<String>,
    /// Logical path of the declaring file.
    pub file: String,
    pub source: SourceSpec,
}

/// A dependency built from a manifest leaf and its lockfile counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyRecord {
    pub name: String,
    pub directory: DirectoryPath,
    /// Locked value: a commit SHA for git, a release URL for githubRelease.
    pub version: Option<String>,
    pub requirements: Vec<RequirementEntry>,
    pub package_manager: String,
}

impl DependencyRecord {
    /// Build a record with a single requirement declared in `file`.
    pub fn new(
        directory: DirectoryPath,
        version: Option<String>,
        requirement: Option<String>,
        file: impl Into<String>,
        source: SourceSpec,
    ) -> Self {
        Self {
            name: directory.name(),
            directory,
            version,
            requirements: vec![RequirementEntry {
                requirement,
                file: file.into(),
                source,
            }],
            package_manager: PACKAGE_MANAGER.to_string(),
        }
    }

    /// Requirement of the first declaration.
    pub fn requirement(&self) -> Option<&str> {
        self.requirements.first()?.requirement.as_deref()
    }

    /// Source of the first declaration.
    pub fn source(&self) -> Option<&SourceSpec> {
        self.requirements.first().map(|r| &r.source)
    }

    pub fn git_source(&self) -> Option<&GitSource> {
        self.source().and_then(SourceSpec::as_git)
    }

    pub fn is_git(&self) -> bool {
        self.git_source().is_some()
    }

    /// Upstream location for changelog and release-note lookups.
    pub fn source_url(&self) -> Option<String> {
        self.source().map(SourceSpec::identity)
    }

    /// Copy of this record with every requirement pointing at `source`.
    pub fn with_source(&self, source: &SourceSpec, requirement: Option<&str>) -> Self {
        let requirements = self
            .requirements
            .iter()
            .map(|entry| RequirementEntry {
                requirement: requirement
                    .map(str::to_string)
                    .or_else(|| entry.requirement.clone()),
                file: entry.file.clone(),
                source: source.clone(),
            })
            .collect();
        Self {
            requirements,
            ..self.clone()
        }
    }
}
