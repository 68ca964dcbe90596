//! Version syntax and range constraints.
//!
//! Tags are compared as semantic versions after stripping a leading `v` or
//! `V`. `major` and `major.minor` are padded with `.0` parts. Tags with more
//! than three numeric parts are not versions.
//!
//! Constraints accept the forms found in vendir manifests and in the
//! requirement syntax they were copied from:
//!
//! - comma- or space-separated comparators: `>=1.5.0, <2.0.0`, `>= 1.5 < 2`
//! - `||` alternatives: `^1.2 || ^2.0`
//! - caret, tilde and wildcards: `^1.2`, `~1.2.3`, `1.x`
//! - the pessimistic operator: `~> 1.2` (`>=1.2.0, <2.0.0`)
//! - a bare version means exactly that version
//!
//! ```
//! use vendir_resolve::version::{VersionConstraint, parse_version};
//!
//! let constraint = VersionConstraint::parse(">=1.5.0").unwrap();
//! assert!(constraint.matches(&parse_version("v2.0.0").unwrap()));
//! assert!(!constraint.matches(&parse_version("v1.0.0").unwrap()));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use semver::{Version, VersionReq};

use crate::error::{Error, Result};

static COMMIT_SHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{7,40}$").expect("Invalid commit sha regex"));

/// Strip one leading `v` or `V`.
pub fn strip_version_prefix(s: &str) -> &str {
    s.strip_prefix(['v', 'V']).unwrap_or(s)
}

/// Parse a tag or ref as a version, or `None` if it is not one.
pub fn parse_version(s: &str) -> Option<Version> {
    Version::parse(&pad(strip_version_prefix(s.trim()))).ok()
}

pub fn looks_like_version(reference: &str) -> bool {
    parse_version(reference).is_some()
}

/// Hex string of 7 to 40 lowercase characters.
pub fn looks_like_commit_sha(reference: &str) -> bool {
    COMMIT_SHA.is_match(reference)
}

/// A parsed range. Matches when any `||` alternative matches.
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    alternatives: Vec<VersionReq>,
    raw: String,
}

impl VersionConstraint {
    pub fn parse(constraint: &str) -> Result<Self> {
        let raw = constraint.trim().to_string();
        let invalid = |reason: String| Error::InvalidConstraint {
            constraint: raw.clone(),
            reason,
        };

        let mut alternatives = Vec::new();
        for alternative in raw.split("||") {
            let comparators = comparators(alternative).map_err(invalid)?;
            if comparators.is_empty() {
                return Err(invalid("empty constraint".to_string()));
            }
            let req = VersionReq::parse(&comparators.join(", "))
                .map_err(|e| invalid(e.to_string()))?;
            alternatives.push(req);
        }

        Ok(Self { alternatives, raw })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// Check a tag or version string. Unparseable input never matches.
    pub fn satisfies(&self, version: &str) -> bool {
        parse_version(version).is_some_and(|v| self.matches(&v))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '~', '^', '!'];

/// Split one alternative into `semver` comparators.
fn comparators(alternative: &str) -> std::result::Result<Vec<String>, String> {
    let mut out = Vec::new();
    let mut pending: Option<&str> = None;

    let tokens = alternative
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    for token in tokens {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            if let Some(op) = pending {
                return Err(format!("operator '{op}' has no version"));
            }
            pending = Some(token);
            continue;
        }
        let comparator = match pending.take() {
            Some(op) => format!("{op}{token}"),
            None => token.to_string(),
        };
        out.extend(translate(&comparator)?);
    }

    match pending {
        Some(op) => Err(format!("operator '{op}' has no version")),
        None => Ok(out),
    }
}

fn translate(comparator: &str) -> std::result::Result<Vec<String>, String> {
    let split = comparator
        .find(|c: char| !OPERATOR_CHARS.contains(&c))
        .unwrap_or(comparator.len());
    let (op, version) = comparator.split_at(split);
    let version = strip_version_prefix(version);

    match op {
        "~>" => pessimistic(version),
        "!=" => Err("'!=' is not supported".to_string()),
        "^" | "~" => Ok(vec![format!("{op}{version}")]),
        _ if is_wildcard(version) => Ok(vec![format!("{op}{version}")]),
        "" | "=" | "==" => Ok(vec![format!("={}", pad(version))]),
        ">" | ">=" | "<" | "<=" => Ok(vec![format!("{op}{}", pad(version))]),
        other => Err(format!("unknown operator '{other}'")),
    }
}

fn is_wildcard(version: &str) -> bool {
    version
        .split('.')
        .any(|part| matches!(part, "*" | "x" | "X"))
}

/// Complete `1` or `1.2` to three numeric parts.
fn pad(version: &str) -> String {
    let (core, rest) = match version.find(['-', '+']) {
        Some(i) => version.split_at(i),
        None => (version, ""),
    };
    let parts = core.split('.').count();
    if parts >= 3 || !core.split('.').all(|p| p.parse::<u64>().is_ok()) {
        return version.to_string();
    }
    let mut padded = core.to_string();
    for _ in parts..3 {
        padded.push_str(".0");
    }
    padded.push_str(rest);
    padded
}

/// `~> X` is `>=X.0.0, <X+1.0.0`, `~> X.Y` is `>=X.Y.0, <X+1.0.0`,
/// `~> X.Y.Z` is `>=X.Y.Z, <X.Y+1.0`.
fn pessimistic(version: &str) -> std::result::Result<Vec<String>, String> {
    let parts: Vec<u64> = version
        .split('.')
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| format!("'~>' needs a numeric version, got '{version}'"))?;

    let overflow = || format!("'~>' upper bound of '{version}' overflows");
    let (lower, upper) = match parts.as_slice() {
        [major] => (
            format!("{major}.0.0"),
            format!("{}.0.0", major.checked_add(1).ok_or_else(overflow)?),
        ),
        [major, minor] => (
            format!("{major}.{minor}.0"),
            format!("{}.0.0", major.checked_add(1).ok_or_else(overflow)?),
        ),
        [major, minor, patch] => (
            format!("{major}.{minor}.{patch}"),
            format!("{major}.{}.0", minor.checked_add(1).ok_or_else(overflow)?),
        ),
        _ => return Err(format!("'~>' needs one to three version parts, got '{version}'")),
    };
    Ok(vec![format!(">={lower}"), format!("<{upper}")])
}
