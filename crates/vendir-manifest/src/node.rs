//! Classification of manifest nodes.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// What a node in `vendir.yml`/`vendir.lock.yml` describes.
///
/// Decided by which discriminating key a mapping carries, checked in the
/// order the variants are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Groups child nodes under a shared path prefix
    Contents,
    Git,
    GithubRelease,
    Directory,
    Manual,
    /// None of the known keys was present
    Unsupported,
}

impl NodeKind {
    const DISCRIMINANTS: [(&'static str, NodeKind); 5] = [
        ("contents", NodeKind::Contents),
        ("git", NodeKind::Git),
        ("githubRelease", NodeKind::GithubRelease),
        ("directory", NodeKind::Directory),
        ("manual", NodeKind::Manual),
    ];

    /// Classify a mapping by key precedence.
    pub fn of(mapping: &Mapping) -> Self {
        Self::DISCRIMINANTS
            .iter()
            .find(|(key, _)| mapping.contains_key(*key))
            .map(|(_, kind)| *kind)
            .unwrap_or(NodeKind::Unsupported)
    }

    /// The manifest key for this kind (`unsupported` has none).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contents => "contents",
            Self::Git => "git",
            Self::GithubRelease => "githubRelease",
            Self::Directory => "directory",
            Self::Manual => "manual",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified view over one mapping of a parsed manifest.
#[derive(Debug, Clone, Copy)]
pub enum ManifestNode<'a> {
    /// A `contents` node and the children it groups.
    Contents {
        path: Option<&'a str>,
        children: &'a Value,
    },
    /// Any other node; only `git` and `githubRelease` carry updatable sources.
    Leaf {
        kind: NodeKind,
        path: Option<&'a str>,
        payload: &'a Mapping,
    },
}

impl<'a> ManifestNode<'a> {
    pub fn classify(mapping: &'a Mapping) -> Self {
        let path = path_segment(mapping);
        match (NodeKind::of(mapping), mapping.get("contents")) {
            (NodeKind::Contents, Some(children)) => ManifestNode::Contents { path, children },
            (kind, _) => ManifestNode::Leaf {
                kind,
                path,
                payload: mapping,
            },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Contents { .. } => NodeKind::Contents,
            Self::Leaf { kind, .. } => *kind,
        }
    }
}

/// The node's own `path` value, if it is a string.
pub(crate) fn path_segment(mapping: &Mapping) -> Option<&str> {
    mapping.get("path").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[rstest]
    #[case("path: a\ncontents: []\ngit: {}", NodeKind::Contents)]
    #[case("path: a\ngit: {url: x}\ngithubRelease: {}", NodeKind::Git)]
    #[case("githubRelease: {slug: a/b}\nmanual: {}", NodeKind::GithubRelease)]
    #[case("directory: {path: ../x}", NodeKind::Directory)]
    #[case("manual: {}", NodeKind::Manual)]
    #[case("path: a\nhelmChart: {name: x}", NodeKind::Unsupported)]
    fn test_kind_precedence(#[case] yaml: &str, #[case] expected: NodeKind) {
        assert_eq!(NodeKind::of(&mapping(yaml)), expected);
    }

    #[test]
    fn test_classify_contents() {
        let map = mapping("path: vendor\ncontents:\n- path: a\n  git: {url: x}\n");
        match ManifestNode::classify(&map) {
            ManifestNode::Contents { path, children } => {
                assert_eq!(path, Some("vendor"));
                assert!(children.is_sequence());
            }
            other => panic!("expected contents node, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_leaf_without_path() {
        let map = mapping("git: {url: x}");
        let node = ManifestNode::classify(&map);
        assert_eq!(node.kind(), NodeKind::Git);
        assert!(matches!(node, ManifestNode::Leaf { path: None, .. }));
    }
}
