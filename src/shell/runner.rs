//! Command runners.
//!
//! Every external effect of a bootstrap run (package installs, git clones,
//! archive extraction) goes through [`CommandRunner`]. Components never spawn
//! processes directly, which lets the same orchestration run for real, as a
//! dry run, or against a [`RecordingRunner`] in tests.
//!
//! Two kinds of calls exist:
//! - [`CommandRunner::run`] for commands that change the system
//! - [`CommandRunner::probe`] for read-only queries (`uname`, `dpkg -s`),
//!   which also execute during a dry run

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use super::command::{execute, execute_quiet, CommandOptions, CommandResult};
use crate::error::Result;

/// Executes shell commands on behalf of the installers.
pub trait CommandRunner {
    /// Run a command that may modify the system.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not as
    /// an error; callers decide whether the failure is tolerated.
    fn run(&self, command: &str) -> Result<CommandResult>;

    /// Run a read-only query and capture its output.
    fn probe(&self, command: &str) -> Result<CommandResult>;

    /// Run a command and abort on failure.
    fn run_checked(&self, command: &str) -> Result<CommandResult> {
        self.run(command)?.into_checked(command)
    }

    /// Whether commands are only being reported, not executed.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs commands on the host.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    env: HashMap<String, String>,
    show_output: bool,
}

impl SystemRunner {
    /// Create a runner that lets installer output reach the terminal.
    pub fn new() -> Self {
        Self {
            env: HashMap::new(),
            show_output: true,
        }
    }

    /// Capture installer output instead of passing it through.
    pub fn quiet(mut self) -> Self {
        self.show_output = false;
        self
    }

    /// Add an environment variable for every command.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &str) -> Result<CommandResult> {
        tracing::debug!("Running: {}", command);
        let options = CommandOptions {
            env: self.env.clone(),
            capture_stdout: !self.show_output,
            capture_stderr: !self.show_output,
            ..Default::default()
        };
        let result = execute(command, &options)?;
        if !result.success {
            tracing::debug!("Command exited with {:?}: {}", result.exit_code, command);
        }
        Ok(result)
    }

    fn probe(&self, command: &str) -> Result<CommandResult> {
        tracing::debug!("Probing: {}", command);
        execute_quiet(command, None)
    }
}

/// Reports commands instead of running them.
///
/// Probes still execute so the plan reflects the real machine.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    planned: RefCell<Vec<String>>,
}

impl DryRunRunner {
    /// Create a dry-run runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands that would have been executed, in order.
    pub fn planned(&self) -> Vec<String> {
        self.planned.borrow().clone()
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &str) -> Result<CommandResult> {
        println!("  [dry-run] {}", command);
        self.planned.borrow_mut().push(command.to_string());
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }

    fn probe(&self, command: &str) -> Result<CommandResult> {
        execute_quiet(command, None)
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Records commands and answers them from canned responses.
///
/// Commands succeed unless they contain a substring registered with
/// [`RecordingRunner::fail_on`]. Probes return the stdout registered with
/// [`RecordingRunner::respond`] for an exact command and fail otherwise.
///
/// # Example
///
/// ```
/// use dotstrap::shell::{CommandRunner, RecordingRunner};
///
/// let runner = RecordingRunner::new();
/// runner.respond("uname -s", "Linux\n");
/// runner.fail_on("apt-get install");
///
/// assert_eq!(runner.probe("uname -s").unwrap().stdout, "Linux\n");
/// assert!(!runner.run("sudo apt-get install -y zsh").unwrap().success);
/// assert_eq!(runner.commands(), vec!["sudo apt-get install -y zsh"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<String>>,
    probes: RefCell<Vec<String>>,
    responses: RefCell<HashMap<String, String>>,
    failures: RefCell<Vec<String>>,
}

impl RecordingRunner {
    /// Create an empty recording runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register stdout for a probe command.
    pub fn respond(&self, command: &str, stdout: &str) {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), stdout.to_string());
    }

    /// Make every command containing `pattern` exit with code 1.
    pub fn fail_on(&self, pattern: &str) {
        self.failures.borrow_mut().push(pattern.to_string());
    }

    /// Mutating commands that were run, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Probe commands that were run, in order.
    pub fn probes(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }

    /// Whether any run command contains `fragment`.
    pub fn ran(&self, fragment: &str) -> bool {
        self.commands.borrow().iter().any(|c| c.contains(fragment))
    }

    fn should_fail(&self, command: &str) -> bool {
        self.failures
            .borrow()
            .iter()
            .any(|pattern| command.contains(pattern.as_str()))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str) -> Result<CommandResult> {
        self.commands.borrow_mut().push(command.to_string());
        if self.should_fail(command) {
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        } else {
            Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        }
    }

    fn probe(&self, command: &str) -> Result<CommandResult> {
        self.probes.borrow_mut().push(command.to_string());
        match self.responses.borrow().get(command) {
            Some(stdout) if !self.should_fail(command) => Ok(CommandResult::success(
                stdout.clone(),
                String::new(),
                Duration::ZERO,
            )),
            _ => Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DotstrapError;

    #[test]
    fn recording_runner_records_in_order() {
        let runner = RecordingRunner::new();
        runner.run("first").unwrap();
        runner.run("second").unwrap();
        assert_eq!(runner.commands(), vec!["first", "second"]);
        assert!(runner.probes().is_empty());
    }

    #[test]
    fn recording_runner_unknown_probe_fails() {
        let runner = RecordingRunner::new();
        let result = runner.probe("dpkg -s zsh").unwrap();
        assert!(!result.success);
        assert_eq!(runner.probes(), vec!["dpkg -s zsh"]);
    }

    #[test]
    fn run_checked_propagates_failure() {
        let runner = RecordingRunner::new();
        runner.fail_on("install");
        let err = runner.run_checked("brew install jq").unwrap_err();
        assert!(matches!(err, DotstrapError::CommandFailed { code: Some(1), .. }));
    }

    #[test]
    fn dry_run_runner_does_not_execute() {
        let temp = tempfile::TempDir::new().unwrap();
        let marker = temp.path().join("marker");
        let runner = DryRunRunner::new();

        let result = runner
            .run(&format!("touch {}", marker.display()))
            .unwrap();

        assert!(result.success);
        assert!(!marker.exists());
        assert_eq!(runner.planned().len(), 1);
        assert!(runner.is_dry_run());
    }

    #[test]
    fn dry_run_runner_still_probes() {
        let runner = DryRunRunner::new();
        let result = runner.probe("echo probed").unwrap();
        assert!(result.stdout.contains("probed"));
    }

    #[test]
    fn system_runner_quiet_captures_output() {
        let runner = SystemRunner::new().quiet().with_env("GREETING", "hi");
        let result = runner.run("echo $GREETING").unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hi");
    }
}
