//! Manifest and lockfile documents shared across test suites.
//!
//! [`MANIFEST`] and [`LOCKFILE`] describe the same tree: four leaves, of
//! which three are git/githubRelease dependencies and one is manual.

/// A manifest with nested `contents`, a pinned tag, a semver range, a GitHub
/// release and a manually vendored directory.
pub const MANIFEST: &str = r#"apiVersion: vendir.k14s.io/v1alpha1
kind: Config
minimumRequiredVersion: 0.11.0
directories:
- path: config/_ytt_lib
  contents:
  - path: github.com/cloudfoundry/cf-k8s-networking
    git:
      url: https://github.com/cloudfoundry/cf-k8s-networking
      ref: v0.0.6
    includePaths:
    - config/**/*
  - path: github.com/cloudfoundry/cf-networking-release
    git:
      url: https://github.com/cloudfoundry/cf-networking-release
      refSelection:
        semver:
          constraints: ">=2.36.0"
  - path: github.com/cloudfoundry/cf-k8s-logging
    contents:
    - path: config
      githubRelease:
        slug: cloudfoundry/cf-k8s-logging
        tag: 0.2.1
        disableAutoChecksumValidation: true
  - path: github.com/cloudfoundry/uaa-local
    manual: {}
"#;

/// Lockfile matching [`MANIFEST`].
pub const LOCKFILE: &str = r#"apiVersion: vendir.k14s.io/v1alpha1
directories:
- contents:
  - git:
      commitTitle: Bump version
      sha: 4153bbdbaf3e8d3d681a84a112f3c9cc10129ff3
      tags:
      - v0.0.6
    path: github.com/cloudfoundry/cf-k8s-networking
  - git:
      commitTitle: Release 2.40.0
      sha: 6b3c6b1f4b5a4d9e8f7a6b5c4d3e2f1a0b9c8d7e
      tags:
      - v2.40.0
    path: github.com/cloudfoundry/cf-networking-release
  - contents:
    - githubRelease:
        url: https://api.github.com/repos/cloudfoundry/cf-k8s-logging/releases/26725288
      path: config
    path: github.com/cloudfoundry/cf-k8s-logging
  - manual: {}
    path: github.com/cloudfoundry/uaa-local
  path: config/_ytt_lib
kind: LockConfig
"#;

/// Lockfile for [`MANIFEST`] that is missing the release entry.
pub const DRIFTED_LOCKFILE: &str = r#"apiVersion: vendir.k14s.io/v1alpha1
directories:
- contents:
  - git:
      sha: 4153bbdbaf3e8d3d681a84a112f3c9cc10129ff3
    path: github.com/cloudfoundry/cf-k8s-networking
  - git:
      sha: 6b3c6b1f4b5a4d9e8f7a6b5c4d3e2f1a0b9c8d7e
    path: github.com/cloudfoundry/cf-networking-release
  - manual: {}
    path: github.com/cloudfoundry/uaa-local
  path: config/_ytt_lib
kind: LockConfig
"#;

/// A manifest with a single git dependency at `path`, pinned to `reference`.
pub fn git_manifest(path: &str, url: &str, reference: &str) -> String {
    format!(
        "apiVersion: vendir.k14s.io/v1alpha1\nkind: Config\ndirectories:\n- path: vendor\n  contents:\n  - path: {path}\n    git:\n      url: {url}\n      ref: {reference}\n"
    )
}

/// The lockfile for [`git_manifest`].
pub fn git_lockfile(path: &str, sha: &str) -> String {
    format!(
        "apiVersion: vendir.k14s.io/v1alpha1\ndirectories:\n- contents:\n  - git:\n      sha: {sha}\n    path: {path}\n  path: vendor\nkind: LockConfig\n"
    )
}
