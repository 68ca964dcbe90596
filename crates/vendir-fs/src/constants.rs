//! Logical file names understood by the updater.

use std::path::Path;

/// Message shown when a directory lacks one of the required files.
pub const REQUIRED_FILES_MESSAGE: &str = "Repo must contain both vendir.yml and vendir.lock.yml";

/// The two documents that describe a vendored tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendirFile {
    /// The declarative manifest (`vendir.yml`)
    Manifest,
    /// The resolved lockfile (`vendir.lock.yml`)
    Lock,
}

impl VendirFile {
    /// Get the default file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "vendir.yml",
            Self::Lock => "vendir.lock.yml",
        }
    }
}

impl AsRef<Path> for VendirFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for VendirFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for VendirFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
