//! Check command implementation
//!
//! Resolves every dependency against its remote and reports what is
//! available, without touching any file.

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use vendir_fs::LockRequirement;
use vendir_git::RemoteRepository;
use vendir_resolve::{Resolved, VersionResolver};

use super::{load_files, parse_records, short_version};
use crate::config::BotConfig;
use crate::error::Result;

pub fn run_check(dir: &Path, config: &BotConfig, json: bool) -> Result<()> {
    let files = load_files(dir, config, LockRequirement::Optional)?;
    let records = parse_records(&files)?;

    let remote = RemoteRepository::new();
    let resolver = VersionResolver::new(&remote, &remote);
    let resolved = records
        .iter()
        .map(|record| resolver.resolve(record))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if json {
        let entries: Vec<_> = resolved
            .iter()
            .map(|r| {
                json!({
                    "name": r.original.name,
                    "requirement": r.original.requirement(),
                    "current": r.resolution.current_version,
                    "latest": r.resolution.latest_version(),
                    "pin": r.resolution.pin,
                    "update_needed": r.resolution.update_needed,
                })
            })
            .collect();
        let pending = resolved.iter().filter(|r| r.resolution.update_needed).count();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "dependencies": entries, "updates": pending }))?
        );
        return Ok(());
    }

    print_report(&resolved);
    Ok(())
}

fn print_report(resolved: &[Resolved]) {
    let pending: Vec<&Resolved> = resolved.iter().filter(|r| r.resolution.update_needed).collect();
    if pending.is_empty() {
        println!("{} All dependencies are up to date.", "OK".green().bold());
        return;
    }

    println!("{} ({})", "Updates available".yellow().bold(), pending.len());
    println!();
    for r in pending {
        println!(
            "  {} {} -> {}",
            r.original.name.bold(),
            short_version(r.resolution.current_version.as_deref()).red(),
            short_version(r.resolution.latest_version().as_deref()).green()
        );
    }
}
