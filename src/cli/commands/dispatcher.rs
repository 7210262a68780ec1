//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, Settings};
use crate::error::Result;
use crate::shell::is_elevated;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    repo_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given dotfiles checkout.
    pub fn new(repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            config_path: None,
        }
    }

    /// Use an explicit config file instead of `<repo>/dotstrap.yml`.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Get the repo root path.
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Resolve settings: defaults, config file, environment.
    ///
    /// The repo root is made absolute first. Symlinks point at it and are
    /// resolved relative to their own directory, not the working directory.
    pub fn settings(&self) -> Result<Settings> {
        let repo_root = std::path::absolute(&self.repo_root)?;
        let config = load_config(&repo_root, self.config_path.as_deref())?;
        let settings = Settings::resolve(config, &repo_root)?.with_elevated(is_elevated());
        tracing::debug!(
            "Resolved settings: home={} repo={} go={}",
            settings.home.display(),
            settings.repo_root.display(),
            settings.go.version
        );
        Ok(settings)
    }

    /// Dispatch and execute a command.
    ///
    /// Settings are resolved before every command except `completions`, so a
    /// broken config file fails before anything runs.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(self.settings()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Link) => {
                let cmd = super::link::LinkCommand::new(self.settings()?);
                cmd.execute(ui)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(self.settings()?, args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::run::RunCommand::new(self.settings()?, RunArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
