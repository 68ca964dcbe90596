//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// vendir-bot - Keep vendir-managed dependencies up to date
#[derive(Parser, Debug)]
#[command(name = "vendir-bot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: vendir-bot.toml in the target directory)
    #[arg(long, global = true, env = "VENDIR_BOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the dependencies recorded in vendir.yml and vendir.lock.yml
    List {
        /// Directory holding the manifest
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Look up the latest version of every dependency
    Check {
        /// Directory holding the manifest
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Update dependencies and regenerate the lockfile with vendir sync
    ///
    /// Examples:
    ///   vendir-bot update                         # Update everything
    ///   vendir-bot update -d vendor/lib           # Update one dependency
    ///   vendir-bot update --dry-run               # Show the diff only
    Update {
        /// Directory holding the manifest
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Only update these dependencies (by name)
        #[arg(short = 'd', long = "dependency")]
        dependencies: Vec<String>,

        /// Print the changes as a diff without writing files
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_dependencies() {
        let cli = Cli::try_parse_from([
            "vendir-bot",
            "update",
            "-d",
            "vendor/a",
            "--dependency",
            "vendor/b",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Update {
                dir: PathBuf::from("."),
                dependencies: vec!["vendor/a".into(), "vendor/b".into()],
                dry_run: true,
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vendir-bot", "list", "--json", "-v", "--config", "x.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
