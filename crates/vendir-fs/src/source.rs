//! File source collaborator and the manifest/lockfile fetcher.
//!
//! The updater never walks a repository itself. It asks a [`FileSource`]
//! for files by logical name and gets back `None` when a file is absent,
//! which [`fetch_files`] turns into a `FileNotFound` error where the file
//! is required.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::VendirFile;
use crate::{Error, NormalizedPath, Result, io};

/// A file's logical name, the directory it was fetched from, and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyFile {
    pub name: String,
    pub directory: String,
    pub content: String,
}

impl DependencyFile {
    /// Create a file located in the root directory (`/`).
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: "/".to_string(),
            content: content.into(),
        }
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Logical path used in error messages, e.g. `/vendir.yml`.
    pub fn path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.directory).join(&self.name)
    }

    /// Copy of this file with new content.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            directory: self.directory.clone(),
            content: content.into(),
        }
    }
}

/// Retrieves file contents by logical name.
pub trait FileSource {
    /// Read a file, returning `None` when it does not exist.
    fn read_file(&self, name: &str) -> Result<Option<String>>;

    /// Logical directory the files live in.
    fn directory(&self) -> &str {
        "/"
    }
}

/// Reads files from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    directory: String,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        Ok(Self {
            root,
            directory: "/".to_string(),
        })
    }

    /// Set the logical directory reported in file paths.
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSource for DirectorySource {
    fn read_file(&self, name: &str) -> Result<Option<String>> {
        io::read_text_if_present(&self.root.join(name))
    }

    fn directory(&self) -> &str {
        &self.directory
    }
}

/// In-memory file source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(name.into(), content.into());
        self
    }
}

impl FileSource for MemorySource {
    fn read_file(&self, name: &str) -> Result<Option<String>> {
        Ok(self.files.get(name).cloned())
    }
}

/// Whether a missing lockfile aborts the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockRequirement {
    /// Full reconciliation needs both documents.
    #[default]
    Required,
    /// Update checks can proceed from the manifest alone.
    Optional,
}

/// Names of the files to fetch and how strict to be about the lockfile.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub manifest_name: String,
    pub lockfile_name: String,
    pub lock: LockRequirement,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            manifest_name: VendirFile::Manifest.as_str().to_string(),
            lockfile_name: VendirFile::Lock.as_str().to_string(),
            lock: LockRequirement::Required,
        }
    }
}

impl FetchOptions {
    pub fn with_lock(mut self, lock: LockRequirement) -> Self {
        self.lock = lock;
        self
    }
}

/// The manifest and, when present, its lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFiles {
    pub manifest: DependencyFile,
    pub lock: Option<DependencyFile>,
}

impl ManifestFiles {
    pub fn new(manifest: DependencyFile, lock: Option<DependencyFile>) -> Self {
        Self { manifest, lock }
    }
}

/// Fetch `vendir.yml` and `vendir.lock.yml` from a source.
pub fn fetch_files(source: &dyn FileSource, options: &FetchOptions) -> Result<ManifestFiles> {
    let directory = source.directory().to_string();
    let missing = |name: &str| Error::FileNotFound {
        path: NormalizedPath::new(&directory).join(name).to_string(),
    };

    let manifest = source
        .read_file(&options.manifest_name)?
        .ok_or_else(|| missing(&options.manifest_name))?;
    let manifest =
        DependencyFile::new(&options.manifest_name, manifest).with_directory(&directory);

    let lock = match source.read_file(&options.lockfile_name)? {
        Some(content) => {
            Some(DependencyFile::new(&options.lockfile_name, content).with_directory(&directory))
        }
        None if options.lock == LockRequirement::Optional => {
            tracing::warn!(
                file = %options.lockfile_name,
                "Lockfile missing, continuing without locked versions"
            );
            None
        }
        None => return Err(missing(&options.lockfile_name)),
    };

    Ok(ManifestFiles { manifest, lock })
}
