//! Filesystem layer for the vendir dependency updater
//!
//! Provides logical file names, the file source collaborator used to read
//! `vendir.yml`/`vendir.lock.yml`, atomic writes and the error taxonomy
//! shared by every crate in the workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod source;

pub use config::ConfigStore;
pub use constants::{REQUIRED_FILES_MESSAGE, VendirFile};
pub use error::{Error, ErrorKind, Result};
pub use path::NormalizedPath;
pub use source::{
    DependencyFile, DirectorySource, FetchOptions, FileSource, LockRequirement, ManifestFiles,
    MemorySource, fetch_files,
};
