//! Error types for vendir-fs

use std::path::PathBuf;

/// Result type for vendir-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes shared by every layer of the updater.
///
/// Callers decide how to react (abort, retry, report) from the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required file, branch or tag is absent.
    NotFound,
    /// A document does not have the expected shape.
    NotParseable,
    /// A transient failure talking to a git host or running the sync tool.
    NotResolvable,
    /// No tag in the catalog satisfies a version range.
    NoMatchingTag,
    /// A dependency points at more than one distinct source.
    MultipleSources,
    /// Local filesystem failure.
    Io,
    /// Anything else.
    Other,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotFound => "not-found",
            Self::NotParseable => "not-parseable",
            Self::NotResolvable => "not-resolvable",
            Self::NoMatchingTag => "no-matching-tag",
            Self::MultipleSources => "multiple-sources",
            Self::Io => "io",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// Errors that can occur in vendir-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::ConfigParse { .. } | Self::UnsupportedFormat { .. } => ErrorKind::NotParseable,
            Self::Io { .. } | Self::LockFailed { .. } => ErrorKind::Io,
        }
    }
}
