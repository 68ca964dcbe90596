//! Decides the source specification to write back for a resolved dependency.

use serde::Serialize;
use vendir_manifest::{
    DependencyRecord, DirectoryPath, RefSelection, RefUpdate, RequirementEntry, SourceSpec,
};

use crate::error::{Error, Result};
use crate::resolver::{PinStyle, Resolved, ResolvedTarget};

/// The single source a record's requirements agree on.
///
/// Requirements that differ only in their ref share a source. Different
/// source types or upstreams (git URL, release slug) fail with
/// [`Error::MultipleSources`].
pub fn source_details(record: &DependencyRecord) -> Result<Option<SourceSpec>> {
    let mut sources: Vec<&SourceSpec> = Vec::new();
    for entry in &record.requirements {
        if !sources.contains(&&entry.source) {
            sources.push(&entry.source);
        }
    }
    if sources.len() <= 1 {
        return Ok(sources.first().map(|s| (*s).clone()));
    }

    let mut identities: Vec<(&str, String)> = Vec::new();
    for source in &sources {
        let identity = (source.type_name(), source.identity());
        if !identities.contains(&identity) {
            identities.push(identity);
        }
    }
    if identities.len() > 1 {
        let listed: Vec<String> = identities
            .iter()
            .map(|(kind, identity)| format!("{kind} {identity}"))
            .collect();
        return Err(Error::MultipleSources {
            dependency: record.name.clone(),
            sources: listed.join(", "),
        });
    }

    Ok(Some(sources[0].clone()))
}

/// The outcome of planning one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUpdate {
    pub name: String,
    pub directory: DirectoryPath,
    /// Source as parsed, before resolution.
    pub previous: Option<SourceSpec>,
    pub source: Option<SourceSpec>,
    pub update_needed: bool,
    /// The resolved record with its requirements pointing at `source`.
    pub record: DependencyRecord,
}

impl PlannedUpdate {
    /// Manifest edit needed for a pinned git ref that moved.
    ///
    /// `None` for `refSelection` leaves; the sync tool re-resolves those.
    pub fn ref_update(&self) -> Option<RefUpdate> {
        let (Some(SourceSpec::Git(old)), Some(SourceSpec::Git(new))) =
            (&self.previous, &self.source)
        else {
            return None;
        };
        if new.selection != RefSelection::Ref || new.reference == old.reference {
            return None;
        }
        Some(RefUpdate {
            directory: self.directory.clone(),
            reference: new.reference.clone()?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UpdatePlanner;

impl UpdatePlanner {
    pub fn new() -> Self {
        Self
    }

    /// New source for a resolved dependency.
    ///
    /// Non-git sources are returned unchanged. A version tag pin moves to
    /// the latest tag when that changes the commit, a commit pin moves to
    /// the tag found to contain it, and anything else stays as it is.
    pub fn plan_source(&self, resolved: &Resolved) -> Result<Option<SourceSpec>> {
        let base = source_details(&resolved.record)?;
        let Some(SourceSpec::Git(git)) = &base else {
            return Ok(base);
        };

        let resolution = &resolved.resolution;
        let planned = match (resolution.pin, &resolution.target) {
            (PinStyle::VersionTag | PinStyle::SemverRange, ResolvedTarget::Tag(tag))
                if resolution.update_needed =>
            {
                SourceSpec::Git(git.pinned_to(&tag.name))
            }
            (PinStyle::CommitSha, ResolvedTarget::Tag(tag)) => {
                SourceSpec::Git(git.pinned_to(&tag.name))
            }
            _ => return Ok(base),
        };
        Ok(Some(planned))
    }

    /// Requirements after the update.
    ///
    /// Returned as they are when the planned source equals the current one,
    /// otherwise every requirement points at the planned source.
    pub fn updated_requirements(&self, resolved: &Resolved) -> Result<Vec<RequirementEntry>> {
        let current = source_details(&resolved.record)?;
        let planned = self.plan_source(resolved)?;
        match planned {
            Some(source) if Some(&source) != current.as_ref() => {
                let requirement = source.as_git().and_then(|git| git.reference.clone());
                Ok(resolved
                    .record
                    .with_source(&source, requirement.as_deref())
                    .requirements)
            }
            _ => Ok(resolved.record.requirements.clone()),
        }
    }

    pub fn plan(&self, resolved: &Resolved) -> Result<PlannedUpdate> {
        let previous = source_details(&resolved.original)?;
        let source = self.plan_source(resolved)?;
        let requirements = self.updated_requirements(resolved)?;

        let planned = PlannedUpdate {
            name: resolved.record.name.clone(),
            directory: resolved.record.directory.clone(),
            previous,
            source,
            update_needed: resolved.resolution.update_needed,
            record: DependencyRecord {
                requirements,
                ..resolved.record.clone()
            },
        };
        tracing::debug!(
            dependency = %planned.name,
            update_needed = planned.update_needed,
            ref_update = planned.ref_update().is_some(),
            "Planned update"
        );
        Ok(planned)
    }
}
