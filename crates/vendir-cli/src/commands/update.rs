//! Update command implementation
//!
//! Resolves, plans and applies updates through the sync tool, then writes
//! the regenerated files back or prints them as a diff.

use std::path::Path;

use colored::Colorize;
use similar::TextDiff;
use vendir_fs::{DependencyFile, LockRequirement, io};
use vendir_git::RemoteRepository;
use vendir_manifest::DependencyRecord;
use vendir_resolve::{UpdatePlanner, VersionResolver};
use vendir_sync::{FileUpdater, ProcessRunner, SyncApplier};

use super::{load_files, parse_records};
use crate::config::BotConfig;
use crate::error::{CliError, Result};

pub fn run_update(
    dir: &Path,
    config: &BotConfig,
    dependencies: &[String],
    dry_run: bool,
) -> Result<()> {
    let files = load_files(dir, config, LockRequirement::Required)?;
    let records = select(parse_records(&files)?, dependencies)?;

    let remote = RemoteRepository::new();
    let resolver = VersionResolver::new(&remote, &remote);
    let planner = UpdatePlanner::new();
    let mut planned = Vec::with_capacity(records.len());
    for record in &records {
        let resolved = resolver.resolve(record)?;
        planned.push(planner.plan(&resolved)?);
    }

    let runner = ProcessRunner;
    let applier = SyncApplier::new(&runner, config.sync_options()?);
    let updated = match FileUpdater::new(&files, &planned, &applier).updated_dependency_files() {
        Ok(updated) => updated,
        Err(vendir_sync::Error::NoFilesChanged) => {
            println!("{} All dependencies are up to date.", "OK".green().bold());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let originals = [Some(&files.manifest), files.lock.as_ref()];
    for file in &updated {
        let before = originals
            .iter()
            .flatten()
            .find(|f| f.name == file.name)
            .map(|f| f.content.as_str())
            .unwrap_or("");
        if dry_run {
            print_diff(file, before);
        } else {
            io::write_text(&dir.join(&file.name), &file.content)?;
            println!("{} {}", "Updated".green().bold(), file.path());
        }
    }
    Ok(())
}

/// Keep only the named records. Unknown names are an error.
fn select(records: Vec<DependencyRecord>, names: &[String]) -> Result<Vec<DependencyRecord>> {
    if names.is_empty() {
        return Ok(records);
    }
    if let Some(unknown) = names.iter().find(|n| !records.iter().any(|r| &r.name == *n)) {
        return Err(CliError::user(format!("Unknown dependency '{unknown}'")));
    }
    Ok(records
        .into_iter()
        .filter(|r| names.contains(&r.name))
        .collect())
}

fn print_diff(file: &DependencyFile, before: &str) {
    let path = file.path().to_string();
    let diff = TextDiff::from_lines(before, file.content.as_str());
    for line in diff
        .unified_diff()
        .context_radius(3)
        .header(&format!("a{path}"), &format!("b{path}"))
        .to_string()
        .lines()
    {
        if line.starts_with('+') && !line.starts_with("+++") {
            println!("{}", line.green());
        } else if line.starts_with('-') && !line.starts_with("---") {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendir_manifest::{DirectoryPath, GithubReleaseSource, SourceSpec};

    fn record(name: &str) -> DependencyRecord {
        DependencyRecord::new(
            DirectoryPath::from_segments(name.split('/')),
            None,
            None,
            "/vendir.yml",
            SourceSpec::GithubRelease(GithubReleaseSource {
                slug: "org/repo".into(),
                tag: None,
                url: None,
            }),
        )
    }

    #[test]
    fn test_select_all_when_no_names() {
        let selected = select(vec![record("vendor/a"), record("vendor/b")], &[]).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_named() {
        let selected =
            select(vec![record("vendor/a"), record("vendor/b")], &["vendor/b".into()]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "vendor/b");
    }

    #[test]
    fn test_select_unknown_name_fails() {
        let err = select(vec![record("vendor/a")], &["vendor/z".into()]).unwrap_err();
        assert!(err.to_string().contains("vendor/z"));
    }
}
