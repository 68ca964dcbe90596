//! Logical file locations such as `/vendir.yml`

use std::fmt;
use std::path::Path;

/// A `/`-separated path, independent of the host platform.
///
/// Error messages name files by their logical location (the directory
/// they were fetched from joined with their name), so the separator is
/// normalized once here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Append `segment`, collapsing the separator between the two halves.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let base = self.inner.trim_end_matches('/');
        let inner = match (self.inner.is_empty(), base.is_empty()) {
            (true, _) => segment.to_string(),
            (false, true) => format!("/{segment}"),
            (false, false) => format!("{base}/{segment}"),
        };
        Self { inner }
    }

    /// Last component, `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }

    /// Extension of the last component. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
