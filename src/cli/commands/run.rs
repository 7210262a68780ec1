//! Run command implementation.
//!
//! The `dotstrap run` command executes the full bootstrap. It is also what
//! runs when no subcommand is given.

use crate::cli::args::RunArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::requirements::ToolLocator;
use crate::runner::{ItemStatus, RunOptions, RunProgress, Stage, WorkflowResult, WorkflowRunner};
use crate::shell::{CommandRunner, DryRunRunner, SystemRunner};
use crate::toolchain::{Downloader, DryRunDownloader, HttpDownloader};
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The run command implementation.
pub struct RunCommand {
    settings: Settings,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(settings: Settings, args: RunArgs) -> Self {
        Self { settings, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn build_options(&self) -> RunOptions {
        RunOptions {
            skip: self.args.skip.iter().copied().collect(),
        }
    }

    /// Run against the given effects.
    pub fn run_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn CommandRunner,
        downloader: &dyn Downloader,
        locator: &ToolLocator,
    ) -> Result<CommandResult> {
        let dry_run = runner.is_dry_run();
        ui.show_header(if dry_run {
            "dotstrap (dry run)"
        } else {
            "dotstrap"
        });

        let workflow = WorkflowRunner::new(&self.settings, runner, downloader, locator);
        let result = workflow.run_with_progress(&self.build_options(), |event| {
            show_progress(&mut *ui, event)
        })?;

        show_summary(ui, &result, dry_run);
        Ok(CommandResult::success())
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let locator = ToolLocator::from_env().with_extra(self.settings.search_dirs());

        if self.args.dry_run {
            return self.run_with(ui, &DryRunRunner::new(), &DryRunDownloader, &locator);
        }

        let runner = if ui.output_mode().shows_command_output() {
            SystemRunner::new()
        } else {
            SystemRunner::new().quiet()
        };
        let downloader = HttpDownloader::new()?;
        self.run_with(ui, &runner, &downloader, &locator)
    }
}

fn show_progress(ui: &mut dyn UserInterface, event: RunProgress<'_>) {
    match event {
        RunProgress::HostDetected { host, os, manager } => {
            let manager = manager.map(|m| m.name()).unwrap_or("none");
            ui.message(&format!(
                "Host: {} {} · package manager: {}",
                os, host.machine, manager
            ));
        }
        RunProgress::StageStarting {
            stage,
            index,
            total,
        } => ui.show_stage(index, total, stage.title()),
        RunProgress::StageFinished { report, .. } => show_report(ui, report),
        RunProgress::StageSkipped { stage, reason } => {
            ui.skipped(&format!("{} ({})", stage.title(), reason))
        }
    }
}

fn show_summary(ui: &mut dyn UserInterface, result: &WorkflowResult, dry_run: bool) {
    let done = result.count(ItemStatus::Done);
    let skipped = result.count(ItemStatus::Skipped);
    let warned = result.count(ItemStatus::Warned);

    ui.message("");
    let verb = if dry_run { "planned" } else { "done" };
    ui.success(&format!(
        "Bootstrap {} in {}: {} {}, {} already satisfied",
        if dry_run { "previewed" } else { "complete" },
        format_duration(result.duration),
        done,
        verb,
        skipped
    ));
    if warned > 0 {
        ui.warning(&format!("{} item(s) need attention, see above", warned));
    }
    let shell_changed = result
        .report(Stage::Shell)
        .is_some_and(|r| r.count(ItemStatus::Done) > 0);
    if shell_changed && !dry_run {
        ui.show_hint("Restart your shell or run `exec zsh` to load the new configuration");
    }
}
