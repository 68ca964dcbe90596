//! [`TestWorkspace`]: a temp directory holding a manifest pair.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::fixtures;

/// A temporary directory with `vendir.yml` and optionally `vendir.lock.yml`.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Empty directory.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap_or_else(|e| panic!("TestWorkspace: temp dir: {e}")),
        }
    }

    /// Directory holding the shared fixture pair.
    pub fn with_fixtures() -> Self {
        Self::empty()
            .with_manifest(fixtures::MANIFEST)
            .with_lockfile(fixtures::LOCKFILE)
    }

    pub fn with_manifest(self, content: &str) -> Self {
        self.write("vendir.yml", content);
        self
    }

    pub fn with_lockfile(self, content: &str) -> Self {
        self.write("vendir.lock.yml", content);
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestWorkspace: mkdir {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestWorkspace: write {}: {e}", path.display()));
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name))
            .unwrap_or_else(|e| panic!("TestWorkspace: read {name}: {e}"))
    }

    /// Assert that the file at `name` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let actual = self.read(name);
        assert!(
            actual.contains(content),
            "File {name} does not contain expected content.\nExpected: {content}\nActual: {actual}"
        );
    }
}
