//! List command implementation
//!
//! Prints the reconciled dependency records.

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use vendir_fs::LockRequirement;
use vendir_manifest::{DependencyRecord, SourceSpec};

use super::{load_files, parse_records, short_version};
use crate::config::BotConfig;
use crate::error::Result;

pub fn run_list(dir: &Path, config: &BotConfig, json: bool) -> Result<()> {
    let files = load_files(dir, config, LockRequirement::Required)?;
    let records = parse_records(&files)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "dependencies": records }))?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} No dependencies declared.", "OK".green().bold());
        return Ok(());
    }

    println!("{} ({})", "Dependencies".blue().bold(), records.len());
    println!();
    for record in &records {
        print_record(record);
    }
    Ok(())
}

fn print_record(record: &DependencyRecord) {
    let source = match record.source() {
        Some(SourceSpec::Git(git)) => format!("git {}", git.url),
        Some(SourceSpec::GithubRelease(release)) => format!("githubRelease {}", release.slug),
        None => "unknown".to_string(),
    };
    println!(
        "  {} {} {} {}",
        record.name.bold(),
        record.requirement().unwrap_or("*").cyan(),
        short_version(record.version.as_deref()).yellow(),
        source.dimmed()
    );
}
