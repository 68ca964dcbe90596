//! Walks a parsed manifest or lockfile into an ordered list of leaves.

use serde_yaml::{Mapping, Value};

use crate::node::{ManifestNode, NodeKind};
use crate::path::DirectoryPath;

/// One leaf of a flattened manifest tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    pub path: DirectoryPath,
    pub kind: NodeKind,
    /// The whole mapping of the leaf node.
    pub payload: Mapping,
}

impl FlatEntry {
    /// The kind-specific sub-mapping, e.g. the value under `git`.
    pub fn source_value(&self) -> Option<&Value> {
        self.payload.get(self.kind.as_str())
    }
}

/// Flatten `node` into leaves, in document order.
///
/// Sequences are walked element by element with the same ancestor path.
/// A `contents` mapping emits nothing itself; its children are walked with
/// the contents node's own path as their ancestor. Every other mapping
/// emits exactly one entry. Scalars emit nothing.
pub fn flatten(node: &Value, ancestor: &DirectoryPath) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    walk(node, ancestor, &mut entries);
    entries
}

fn walk(node: &Value, ancestor: &DirectoryPath, out: &mut Vec<FlatEntry>) {
    match node {
        Value::Sequence(items) => {
            for item in items {
                walk(item, ancestor, out);
            }
        }
        Value::Mapping(mapping) => match ManifestNode::classify(mapping) {
            ManifestNode::Contents { path, children } => {
                walk(children, &ancestor.child(path), out);
            }
            ManifestNode::Leaf {
                kind,
                path,
                payload,
            } => {
                let path = ancestor.child(path);
                tracing::trace!(path = %path, kind = %kind, "Flattened manifest leaf");
                out.push(FlatEntry {
                    path,
                    kind,
                    payload: payload.clone(),
                });
            }
        },
        Value::Tagged(tagged) => walk(&tagged.value, ancestor, out),
        _ => {}
    }
}
