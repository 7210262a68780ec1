//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::runner::Stage;

/// dotstrap - Bootstrap a development machine from a dotfiles checkout.
#[derive(Debug, Parser)]
#[command(name = "dotstrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the dotfiles checkout (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub repo: Option<PathBuf>,

    /// Path to config file (overrides <repo>/dotstrap.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output; installer output is captured
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full bootstrap (default if no command specified)
    Run(RunArgs),

    /// Create the dotfile symlinks only
    Link,

    /// Report host, package manager, tools and links without changing anything
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Print every command instead of executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Stages to skip (comma-separated)
    #[arg(long, value_delimiter = ',', value_enum)]
    pub skip: Vec<Stage>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["dotstrap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.repo.is_none());
    }

    #[test]
    fn run_parses_dry_run_and_skip_list() {
        let cli =
            Cli::try_parse_from(["dotstrap", "run", "--dry-run", "--skip", "toolchain,shell"])
                .unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.skip, vec![Stage::Toolchain, Stage::Shell]);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn unknown_stage_is_rejected() {
        let result = Cli::try_parse_from(["dotstrap", "run", "--skip", "fonts"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dotstrap", "status", "--json", "--repo", "/tmp/dots", "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.repo, Some(PathBuf::from("/tmp/dots")));
        assert!(matches!(cli.command, Some(Commands::Status(StatusArgs { json: true }))));
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["dotstrap", "completions"]).is_err());
        let cli = Cli::try_parse_from(["dotstrap", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Zsh }))
        ));
    }
}
