//! Parses a manifest/lockfile pair into dependency records.

use serde_yaml::Value;
use vendir_fs::{DependencyFile, ManifestFiles};

use crate::dependency::DependencyRecord;
use crate::error::{Error, Result};
use crate::flatten::{FlatEntry, flatten};
use crate::path::DirectoryPath;
use crate::reconcile::{reconcile, reconcile_unlocked};

/// Builds [`DependencyRecord`]s from fetched vendir files.
///
/// Records are rebuilt on every call to [`FileParser::parse`].
#[derive(Debug)]
pub struct FileParser<'a> {
    files: &'a ManifestFiles,
}

impl<'a> FileParser<'a> {
    pub fn new(files: &'a ManifestFiles) -> Self {
        Self { files }
    }

    /// Parse both documents and reconcile them.
    ///
    /// Without a lockfile the records come from the manifest alone and
    /// carry no locked version.
    pub fn parse(&self) -> Result<Vec<DependencyRecord>> {
        let manifest = flatten_file(&self.files.manifest)?;
        let records = match &self.files.lock {
            Some(lock_file) => {
                let lock = flatten_file(lock_file)?;
                reconcile(&manifest, &lock, &self.files.manifest, lock_file)?
            }
            None => reconcile_unlocked(&manifest, &self.files.manifest)?,
        };

        tracing::debug!(
            file = %self.files.manifest.path(),
            dependencies = records.len(),
            "Parsed vendir manifest"
        );
        Ok(records)
    }
}

/// Parse a document and return the value under its `directories` key.
pub fn load_directories(file: &DependencyFile) -> Result<Value> {
    let path = file.path().to_string();
    let document: Value = serde_yaml::from_str(&file.content)
        .map_err(|e| Error::not_parseable(&path, e.to_string()))?;

    match document.get("directories") {
        Some(directories) => Ok(directories.clone()),
        None => Err(Error::not_parseable(path, "missing `directories` key")),
    }
}

/// Flatten the `directories` tree of a document.
pub fn flatten_file(file: &DependencyFile) -> Result<Vec<FlatEntry>> {
    Ok(flatten(&load_directories(file)?, &DirectoryPath::root()))
}
