//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves
//! settings once and routes CLI subcommands to their implementations.
//! Commands that touch the system also expose a `run_with` entry point
//! taking the command runner and tool locator, so tests drive them with
//! recording fakes.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod link;
pub mod run;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
