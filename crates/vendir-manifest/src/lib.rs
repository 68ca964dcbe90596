//! Manifest handling for the vendir dependency updater.
//!
//! `vendir.yml` and `vendir.lock.yml` describe the same tree of vendored
//! directories. This crate walks both trees into ordered lists of leaves
//! ([`flatten`]), pairs them up by position ([`reconcile`]) and produces
//! the [`DependencyRecord`]s the rest of the updater works on.

pub mod dependency;
pub mod error;
pub mod flatten;
pub mod node;
pub mod parser;
pub mod path;
pub mod reconcile;
pub mod rewrite;

/// Identifier reported as the package manager of every record.
pub const PACKAGE_MANAGER: &str = "vendir";

pub use dependency::{
    DependencyRecord, GitSource, GithubReleaseSource, RefSelection, RequirementEntry, SourceSpec,
};
pub use error::{Error, Result};
pub use flatten::{FlatEntry, flatten};
pub use node::{ManifestNode, NodeKind};
pub use parser::FileParser;
pub use path::DirectoryPath;
pub use reconcile::{reconcile, reconcile_unlocked};
pub use rewrite::{RefUpdate, rewrite_git_refs};
