//! Picks the version a dependency should move to.
//!
//! Resolution is pure: the input record is never modified. A semver-range
//! dependency comes back as a new record whose requirement and ref name the
//! concrete tag that was selected, so later steps never see the range.

use serde::Serialize;
use vendir_manifest::{DependencyRecord, GitSource, SourceSpec};

use crate::catalog::{CommitChecker, TagCandidate, TagCatalog, version_candidates};
use crate::error::{Error, Result};
use crate::planner::source_details;
use crate::version::VersionConstraint;

/// How a dependency's ref was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinStyle {
    /// Not a git dependency. Nothing to resolve.
    NotGit,
    /// No ref recorded. Tracks the head of its branch.
    Unpinned,
    /// Pinned to a tag that parses as a version.
    VersionTag,
    /// Pinned to a raw commit.
    CommitSha,
    /// Selected by `refSelection.semver`.
    SemverRange,
    /// Pinned to something else, e.g. a branch name.
    OtherRef,
}

impl PinStyle {
    pub fn of(git: &GitSource, checker: &dyn CommitChecker) -> Self {
        if git.is_semver_range() {
            return Self::SemverRange;
        }
        match git.reference.as_deref() {
            None => Self::Unpinned,
            Some(r) if checker.ref_looks_like_version(r) => Self::VersionTag,
            Some(r) if checker.ref_looks_like_commit_sha(r) => Self::CommitSha,
            Some(_) => Self::OtherRef,
        }
    }
}

/// What the resolver settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolvedTarget {
    /// Head commit of the tracked branch.
    Commit { sha: String },
    Tag(TagCandidate),
    /// Nothing actionable.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionResolution {
    pub pin: PinStyle,
    pub target: ResolvedTarget,
    pub update_needed: bool,
    /// Locked version of the record this was resolved from.
    pub current_version: Option<String>,
}

impl VersionResolution {
    fn unchanged(pin: PinStyle, record: &DependencyRecord) -> Self {
        Self {
            pin,
            target: ResolvedTarget::Unchanged,
            update_needed: false,
            current_version: record.version.clone(),
        }
    }

    /// Readable version to report: the version of a tag, the SHA of a
    /// commit, or the current version when nothing changed.
    pub fn latest_version(&self) -> Option<String> {
        match &self.target {
            ResolvedTarget::Commit { sha } => Some(sha.clone()),
            ResolvedTarget::Tag(tag) => Some(tag.version.to_string()),
            ResolvedTarget::Unchanged => self.current_version.clone(),
        }
    }

    pub fn tag(&self) -> Option<&TagCandidate> {
        match &self.target {
            ResolvedTarget::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

/// A record after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// The record as parsed.
    pub original: DependencyRecord,
    /// The record with any range replaced by the selected tag.
    pub record: DependencyRecord,
    pub resolution: VersionResolution,
}

/// Resolves dependencies against a remote.
pub struct VersionResolver<'a> {
    catalog: &'a dyn TagCatalog,
    checker: &'a dyn CommitChecker,
}

impl<'a> VersionResolver<'a> {
    pub fn new(catalog: &'a dyn TagCatalog, checker: &'a dyn CommitChecker) -> Self {
        Self { catalog, checker }
    }

    pub fn pin_style(&self, record: &DependencyRecord) -> Result<PinStyle> {
        Ok(match source_details(record)? {
            Some(SourceSpec::Git(git)) => PinStyle::of(&git, self.checker),
            _ => PinStyle::NotGit,
        })
    }

    pub fn resolve(&self, record: &DependencyRecord) -> Result<Resolved> {
        let Some(SourceSpec::Git(git)) = source_details(record)? else {
            return Ok(self.done(record, record.clone(), VersionResolution::unchanged(PinStyle::NotGit, record)));
        };

        let pin = PinStyle::of(&git, self.checker);
        tracing::debug!(dependency = %record.name, pin = ?pin, "Resolving dependency");

        match pin {
            PinStyle::SemverRange => self.resolve_range(record, &git),
            PinStyle::Unpinned => {
                let sha = self.checker.head_commit(&git.url, git.branch.as_deref())?;
                let resolution = VersionResolution {
                    pin,
                    update_needed: record.version.as_deref() != Some(sha.as_str()),
                    target: ResolvedTarget::Commit { sha },
                    current_version: record.version.clone(),
                };
                Ok(self.done(record, record.clone(), resolution))
            }
            PinStyle::VersionTag => {
                let resolution = match self.latest_version_tag(&git.url)? {
                    Some(tag) => VersionResolution {
                        pin,
                        update_needed: tag_differs(&tag, &git, record),
                        target: ResolvedTarget::Tag(tag),
                        current_version: record.version.clone(),
                    },
                    None => VersionResolution::unchanged(pin, record),
                };
                Ok(self.done(record, record.clone(), resolution))
            }
            PinStyle::CommitSha => {
                let sha = git.reference.as_deref().unwrap_or_default();
                let resolution = match self.checker.tag_containing_commit(&git.url, sha)? {
                    Some(tag) => VersionResolution {
                        pin,
                        update_needed: true,
                        target: ResolvedTarget::Tag(tag),
                        current_version: record.version.clone(),
                    },
                    None => VersionResolution::unchanged(pin, record),
                };
                Ok(self.done(record, record.clone(), resolution))
            }
            PinStyle::OtherRef | PinStyle::NotGit => {
                Ok(self.done(record, record.clone(), VersionResolution::unchanged(pin, record)))
            }
        }
    }

    fn resolve_range(&self, record: &DependencyRecord, git: &GitSource) -> Result<Resolved> {
        let range = git.reference.as_deref().unwrap_or_default();
        let constraint = VersionConstraint::parse(range)?;
        let tags = self.catalog.list_tags(&git.url)?;

        let tag = version_candidates(&tags)
            .into_iter()
            .find(|candidate| constraint.matches(&candidate.version))
            .ok_or_else(|| Error::NoMatchingTag {
                dependency: record.name.clone(),
                repository: git.url.clone(),
                constraint: range.to_string(),
            })?;

        tracing::debug!(
            dependency = %record.name,
            constraint = %constraint,
            tag = %tag.name,
            "Selected tag for range"
        );

        let pinned = SourceSpec::Git(git.pinned_to(&tag.name));
        let concrete = record.with_source(&pinned, Some(&tag.name));
        let resolution = VersionResolution {
            pin: PinStyle::SemverRange,
            update_needed: tag
                .commit_sha
                .as_deref()
                .is_none_or(|sha| record.version.as_deref() != Some(sha)),
            target: ResolvedTarget::Tag(tag),
            current_version: record.version.clone(),
        };
        Ok(self.done(record, concrete, resolution))
    }

    fn latest_version_tag(&self, url: &str) -> Result<Option<TagCandidate>> {
        let tags = self.catalog.list_tags(url)?;
        Ok(version_candidates(&tags).into_iter().next())
    }

    fn done(
        &self,
        original: &DependencyRecord,
        record: DependencyRecord,
        resolution: VersionResolution,
    ) -> Resolved {
        if resolution.update_needed {
            tracing::info!(
                dependency = %original.name,
                current = original.version.as_deref().unwrap_or("-"),
                latest = resolution.latest_version().as_deref().unwrap_or("-"),
                "Update available"
            );
        }
        Resolved {
            original: original.clone(),
            record,
            resolution,
        }
    }
}

/// A newer tag is only an update if it moves the locked commit.
fn tag_differs(tag: &TagCandidate, git: &GitSource, record: &DependencyRecord) -> bool {
    match tag.commit_sha.as_deref() {
        Some(sha) => record.version.as_deref() != Some(sha),
        None => git.reference.as_deref() != Some(tag.name.as_str()),
    }
}
