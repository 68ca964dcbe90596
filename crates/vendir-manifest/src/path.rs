//! Accumulated destination paths of vendored directories.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// The path segments collected from the root of a manifest down to a leaf.
///
/// `contents` nodes contribute their segment to every descendant, so a
/// leaf at `github.com/org/repo` inside a `contents` node at
/// `config/_ytt_lib` ends up with both segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DirectoryPath {
    segments: Vec<String>,
}

impl DirectoryPath {
    /// The empty path at the root of a document.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of a child node. An absent segment leaves the path unchanged.
    pub fn child(&self, segment: Option<&str>) -> Self {
        let mut segments = self.segments.clone();
        if let Some(segment) = segment {
            segments.push(segment.to_string());
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Display key: segments joined with `/`, `.` segments dropped.
    pub fn name(&self) -> String {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }

    /// Relative filesystem path for this directory.
    ///
    /// Returns `None` if any segment is absolute or climbs out with `..`.
    pub fn relative_path(&self) -> Option<PathBuf> {
        let mut out = PathBuf::new();
        for segment in &self.segments {
            let path = Path::new(segment);
            for component in path.components() {
                match component {
                    Component::Normal(part) => out.push(part),
                    Component::CurDir => {}
                    Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                        return None;
                    }
                }
            }
        }
        Some(out)
    }
}

impl std::fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
