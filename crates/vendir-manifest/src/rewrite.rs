//! Rewrites pinned git refs in a manifest before it is synced.

use serde_yaml::{Mapping, Value};
use vendir_fs::DependencyFile;

use crate::error::{Error, Result};
use crate::node::{NodeKind, path_segment};
use crate::path::DirectoryPath;

/// A new `git.ref` for the leaf at `directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    pub directory: DirectoryPath,
    pub reference: String,
}

/// Set `git.ref` on every git leaf whose accumulated path matches an update.
///
/// Leaves that select their ref with `refSelection` are left alone; the sync
/// tool resolves those itself. With no updates the content is returned
/// untouched, otherwise the document is re-serialized.
pub fn rewrite_git_refs(manifest: &DependencyFile, updates: &[RefUpdate]) -> Result<String> {
    if updates.is_empty() {
        return Ok(manifest.content.clone());
    }

    let path = manifest.path().to_string();
    let mut document: Value = serde_yaml::from_str(&manifest.content)
        .map_err(|e| Error::not_parseable(&path, e.to_string()))?;
    let directories = document
        .get_mut("directories")
        .ok_or_else(|| Error::not_parseable(&path, "missing `directories` key"))?;

    let mut applied = vec![false; updates.len()];
    walk_mut(directories, &DirectoryPath::root(), &mut |leaf_path, kind, leaf| {
        if kind != NodeKind::Git {
            return;
        }
        let Some(git) = leaf.get_mut("git").and_then(Value::as_mapping_mut) else {
            return;
        };
        if git.contains_key("refSelection") {
            return;
        }
        for (index, update) in updates.iter().enumerate() {
            if &update.directory == leaf_path {
                git.insert(Value::from("ref"), Value::from(update.reference.clone()));
                applied[index] = true;
            }
        }
    });

    for (update, done) in updates.iter().zip(&applied) {
        if !done {
            tracing::debug!(
                directory = %update.directory,
                "No pinned git ref to rewrite"
            );
        }
    }

    serde_yaml::to_string(&document).map_err(|e| Error::not_parseable(path, e.to_string()))
}

fn walk_mut(
    node: &mut Value,
    ancestor: &DirectoryPath,
    visit: &mut dyn FnMut(&DirectoryPath, NodeKind, &mut Mapping),
) {
    match node {
        Value::Sequence(items) => {
            for item in items {
                walk_mut(item, ancestor, visit);
            }
        }
        Value::Mapping(mapping) => {
            let kind = NodeKind::of(mapping);
            let path = ancestor.child(path_segment(mapping));
            if kind == NodeKind::Contents {
                if let Some(children) = mapping.get_mut("contents") {
                    walk_mut(children, &path, visit);
                }
            } else {
                visit(&path, kind, mapping);
            }
        }
        Value::Tagged(tagged) => walk_mut(&mut tagged.value, ancestor, visit),
        _ => {}
    }
}
