//! Shell command execution and process environment checks.

pub mod command;
pub mod platform;
pub mod runner;

pub use command::{execute, execute_quiet, quote, quote_path, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated, privileged};
pub use runner::{CommandRunner, DryRunRunner, RecordingRunner, SystemRunner};
