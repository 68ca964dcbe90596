//! Local upstream repositories for resolver tests.
//!
//! Built with the `git` CLI so tests get real commit history and both
//! lightweight and annotated tags. Remote URLs are plain filesystem paths.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// A git repository in a temp directory, standing in for a remote host.
pub struct UpstreamRepo {
    dir: TempDir,
}

impl Default for UpstreamRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamRepo {
    /// Initialise a repository on branch `main` with one commit.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("UpstreamRepo: temp dir: {e}"));
        let repo = Self { dir };
        repo.git(&["init"]);
        repo.git(&["config", "user.email", "test@test.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "tag.gpgsign", "false"]);
        repo.commit("README.md", "# upstream\n");
        repo.git(&["branch", "-M", "main"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// URL to hand to a remote client.
    pub fn url(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Write a file, commit it, and return the new HEAD SHA.
    pub fn commit(&self, file: &str, content: &str) -> String {
        fs::write(self.path().join(file), content)
            .unwrap_or_else(|e| panic!("UpstreamRepo::commit: write {file}: {e}"));
        self.git(&["add", "."]);
        self.git(&["commit", "-m", &format!("update {file}")]);
        self.head()
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    /// Create an annotated tag at HEAD.
    pub fn annotated_tag(&self, name: &str) {
        self.git(&["tag", "-a", name, "-m", &format!("release {name}")]);
    }

    pub fn checkout_new_branch(&self, name: &str) {
        self.git(&["checkout", "-b", name]);
    }

    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", name]);
    }

    /// SHA of HEAD.
    pub fn head(&self) -> String {
        let repo = git2::Repository::open(self.path())
            .unwrap_or_else(|e| panic!("UpstreamRepo::head: open: {e}"));
        let commit = repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .unwrap_or_else(|e| panic!("UpstreamRepo::head: peel: {e}"));
        commit.id().to_string()
    }

    fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap_or_else(|e| panic!("UpstreamRepo: failed to run `git {args:?}`: {e}"));
        if !output.status.success() {
            panic!(
                "UpstreamRepo: `git {args:?}` failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
    }
}
