//! Version resolution and update planning.
//!
//! A [`DependencyRecord`](vendir_manifest::DependencyRecord) is resolved
//! against a remote tag catalog by [`VersionResolver`], producing a new
//! record plus a [`VersionResolution`]. [`UpdatePlanner`] turns that into
//! the source specification to write back.
//!
//! The remote side is reached only through the [`TagCatalog`] and
//! [`CommitChecker`] traits.

pub mod catalog;
pub mod error;
pub mod planner;
pub mod resolver;
pub mod version;

#[cfg(test)]
mod test_support;

pub use catalog::{CommitChecker, RemoteTag, TagCandidate, TagCatalog, version_candidates};
pub use error::{Error, Result};
pub use planner::{PlannedUpdate, UpdatePlanner, source_details};
pub use resolver::{PinStyle, Resolved, ResolvedTarget, VersionResolution, VersionResolver};
pub use version::{VersionConstraint, looks_like_commit_sha, looks_like_version, parse_version};
