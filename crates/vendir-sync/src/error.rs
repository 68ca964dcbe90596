//! Error types for vendir-sync

use vendir_fs::ErrorKind;

/// Result type for vendir-sync operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The sync tool hit a git failure, usually a host timeout.
    #[error("{message}")]
    NotResolvable { message: String },

    /// The sync tool rejected the manifest.
    #[error("{file}: {message}")]
    NotParseable { file: String, message: String },

    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No files changed")]
    NoFilesChanged,

    #[error("Filesystem error: {0}")]
    Fs(#[from] vendir_fs::Error),

    #[error(transparent)]
    Manifest(#[from] vendir_manifest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotResolvable { .. } => ErrorKind::NotResolvable,
            Self::NotParseable { .. } => ErrorKind::NotParseable,
            Self::Spawn { .. } | Self::Io(_) => ErrorKind::Io,
            Self::NoFilesChanged => ErrorKind::Other,
            Self::Fs(e) => e.kind(),
            Self::Manifest(e) => e.kind(),
        }
    }

    /// Only transient sync failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::NotResolvable
    }
}
