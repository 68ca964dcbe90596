//! Pairs manifest leaves with their lockfile counterparts.
//!
//! `vendir sync` writes the lockfile in the same order as the manifest, so
//! the n-th leaf of one document describes the n-th leaf of the other. The
//! pairing is only trusted after every pair has been checked to agree on
//! kind and path.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use vendir_fs::DependencyFile;

use crate::dependency::{
    DependencyRecord, GitSource, GithubReleaseSource, RefSelection, SourceSpec,
};
use crate::error::{Error, Result};
use crate::flatten::FlatEntry;
use crate::node::NodeKind;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitManifestSpec {
    #[serde(default, deserialize_with = "scalar_string")]
    url: Option<String>,
    #[serde(default, rename = "ref", deserialize_with = "scalar_string")]
    reference: Option<String>,
    #[serde(default)]
    ref_selection: Option<RefSelectionSpec>,
}

#[derive(Debug, Default, Deserialize)]
struct RefSelectionSpec {
    #[serde(default)]
    semver: Option<SemverSpec>,
}

#[derive(Debug, Default, Deserialize)]
struct SemverSpec {
    #[serde(default, deserialize_with = "scalar_string")]
    constraints: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GitLockSpec {
    #[serde(default, deserialize_with = "scalar_string")]
    sha: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GithubReleaseManifestSpec {
    #[serde(default, deserialize_with = "scalar_string")]
    slug: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GithubReleaseLockSpec {
    #[serde(default, deserialize_with = "scalar_string")]
    url: Option<String>,
}

/// Accept `ref: 1.0` as well as `ref: "1.0"`.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Pair manifest and lockfile leaves into dependency records.
///
/// Fails with [`Error::StructuralMismatch`] when the lists differ in length
/// or any pair disagrees on kind or path. Kinds other than `git` and
/// `githubRelease` are skipped. Duplicate records are dropped, keeping the
/// first occurrence.
pub fn reconcile(
    manifest: &[FlatEntry],
    lock: &[FlatEntry],
    manifest_file: &DependencyFile,
    lock_file: &DependencyFile,
) -> Result<Vec<DependencyRecord>> {
    let mismatch = |reason: String| Error::StructuralMismatch {
        manifest: manifest_file.path().to_string(),
        lockfile: lock_file.path().to_string(),
        reason,
    };

    if manifest.len() != lock.len() {
        return Err(mismatch(format!(
            "manifest lists {} directories but lockfile lists {}",
            manifest.len(),
            lock.len()
        )));
    }

    let mut records = Vec::new();
    for (index, (declared, locked)) in manifest.iter().zip(lock).enumerate() {
        if declared.kind != locked.kind || declared.path != locked.path {
            return Err(mismatch(format!(
                "entry {index}: manifest has {} at '{}' but lockfile has {} at '{}'",
                declared.kind, declared.path, locked.kind, locked.path
            )));
        }

        if let Some(record) = build_record(declared, Some(locked), manifest_file, lock_file)? {
            push_unique(&mut records, record);
        }
    }

    tracing::debug!(
        entries = manifest.len(),
        records = records.len(),
        "Reconciled manifest with lockfile"
    );
    Ok(records)
}

/// Build records from manifest leaves alone, with no locked versions.
pub fn reconcile_unlocked(
    manifest: &[FlatEntry],
    manifest_file: &DependencyFile,
) -> Result<Vec<DependencyRecord>> {
    let mut records = Vec::new();
    for declared in manifest {
        if let Some(record) = build_record(declared, None, manifest_file, manifest_file)? {
            push_unique(&mut records, record);
        }
    }
    Ok(records)
}

fn push_unique(records: &mut Vec<DependencyRecord>, record: DependencyRecord) {
    if !records.contains(&record) {
        records.push(record);
    }
}

fn build_record(
    declared: &FlatEntry,
    locked: Option<&FlatEntry>,
    manifest_file: &DependencyFile,
    lock_file: &DependencyFile,
) -> Result<Option<DependencyRecord>> {
    let file = manifest_file.path().to_string();
    match declared.kind {
        NodeKind::Git => {
            let spec: GitManifestSpec = decode(declared, manifest_file)?;
            let lock: GitLockSpec = match locked {
                Some(entry) => decode(entry, lock_file)?,
                None => GitLockSpec::default(),
            };

            let url = spec.url.ok_or_else(|| {
                Error::not_parseable(&file, format!("git entry '{}' has no url", declared.path))
            })?;
            let range = spec
                .ref_selection
                .and_then(|selection| selection.semver)
                .and_then(|semver| semver.constraints);

            let source = match range {
                Some(range) => GitSource {
                    url,
                    reference: Some(range),
                    branch: None,
                    selection: RefSelection::Semver,
                    sha: lock.sha.clone(),
                },
                None => GitSource {
                    url,
                    reference: spec.reference.clone(),
                    branch: spec.reference,
                    selection: RefSelection::Ref,
                    sha: lock.sha.clone(),
                },
            };
            let requirement = source.reference.clone();

            Ok(Some(DependencyRecord::new(
                declared.path.clone(),
                lock.sha,
                requirement,
                file,
                SourceSpec::Git(source),
            )))
        }
        NodeKind::GithubRelease => {
            let spec: GithubReleaseManifestSpec = decode(declared, manifest_file)?;
            let lock: GithubReleaseLockSpec = match locked {
                Some(entry) => decode(entry, lock_file)?,
                None => GithubReleaseLockSpec::default(),
            };

            let slug = spec.slug.ok_or_else(|| {
                Error::not_parseable(
                    &file,
                    format!("githubRelease entry '{}' has no slug", declared.path),
                )
            })?;

            Ok(Some(DependencyRecord::new(
                declared.path.clone(),
                lock.url.clone(),
                spec.tag.clone(),
                file,
                SourceSpec::GithubRelease(GithubReleaseSource {
                    slug,
                    tag: spec.tag,
                    url: lock.url,
                }),
            )))
        }
        kind => {
            tracing::debug!(path = %declared.path, kind = %kind, "Skipping unsupported directory kind");
            Ok(None)
        }
    }
}

fn decode<T>(entry: &FlatEntry, file: &DependencyFile) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match entry.source_value() {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_yaml::from_value(value.clone()).map_err(|e| {
            Error::not_parseable(
                file.path().to_string(),
                format!("invalid {} entry '{}': {e}", entry.kind, entry.path),
            )
        }),
    }
}
