//! Error types for vendir-manifest

use vendir_fs::ErrorKind;

/// Result type for vendir-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or reconciling manifests
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Dependency file not parseable: {file}: {message}")]
    NotParseable { file: String, message: String },

    #[error("{manifest} and {lockfile} are out of sync: {reason}")]
    StructuralMismatch {
        manifest: String,
        lockfile: String,
        reason: String,
    },

    #[error("Filesystem error: {0}")]
    Fs(#[from] vendir_fs::Error),
}

impl Error {
    pub fn not_parseable(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotParseable {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotParseable { .. } | Self::StructuralMismatch { .. } => ErrorKind::NotParseable,
            Self::Fs(e) => e.kind(),
        }
    }
}
