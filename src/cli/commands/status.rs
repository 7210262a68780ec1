//! Status command implementation.
//!
//! The `dotstrap status` command reports what a run would find: the host,
//! the package manager it would use, tool presence and link state. Nothing
//! is installed, and on macOS a missing Homebrew is reported rather than
//! bootstrapped.

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::config::Settings;
use crate::detection::{HostInfo, SupportedOs};
use crate::error::{DotstrapError, Result};
use crate::links::{link_statuses, LinkStatus};
use crate::packages::select::{candidates, first_available};
use crate::packages::{tool_statuses, ManagerKind, PackageManager};
use crate::requirements::{ToolLocator, ToolStatus};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{link_label, presence_label};

/// Everything `status` reports, also its JSON shape.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub host: HostInfo,
    pub os: SupportedOs,
    pub arch: String,
    pub manager: Option<ManagerKind>,
    pub tools: Vec<ToolStatus>,
    pub links: Vec<LinkStatus>,
}

/// Probe the machine without changing it.
pub fn collect_status(
    settings: &Settings,
    runner: &dyn CommandRunner,
    locator: &ToolLocator,
) -> Result<StatusReport> {
    let host = HostInfo::detect(runner);
    let os = host.os().require_supported()?;
    let manager = first_available(candidates(os, settings.elevated), locator);
    let tools = tool_statuses(
        &settings.tools,
        os,
        manager.as_ref().map(|m| m as &dyn PackageManager),
        locator,
        runner,
    );

    Ok(StatusReport {
        arch: host.arch().to_string(),
        manager: manager.map(|m| m.kind()),
        os,
        host,
        tools,
        links: link_statuses(settings),
    })
}

/// The status command implementation.
pub struct StatusCommand {
    settings: Settings,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(settings: Settings, args: StatusArgs) -> Self {
        Self { settings, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    /// Report using the given effects.
    pub fn run_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn CommandRunner,
        locator: &ToolLocator,
    ) -> Result<CommandResult> {
        let report = collect_status(&self.settings, runner, locator)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| DotstrapError::Other(e.into()))?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        show_status(ui, &report, &self.settings);
        Ok(CommandResult::success())
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let locator = ToolLocator::from_env().with_extra(self.settings.search_dirs());
        self.run_with(ui, &SystemRunner::new().quiet(), &locator)
    }
}

fn show_status(ui: &mut dyn UserInterface, report: &StatusReport, settings: &Settings) {
    ui.show_header("dotstrap status");
    ui.message(&format!("Host:            {} {}", report.os, report.arch));
    match report.manager {
        Some(kind) => ui.message(&format!("Package manager: {}", kind)),
        None => ui.warning("Package manager: none found"),
    }
    ui.message(&format!("Repo:            {}", settings.repo_root.display()));
    ui.message("");

    let mut tools = Table::new(&["Tool", "State"]);
    for tool in &report.tools {
        tools.add_row([tool.name.clone(), presence_label(&tool.presence)]);
    }
    ui.message(&tools.render());
    ui.message("");

    let mut links = Table::new(&["Link", "Source", "State"]);
    for link in &report.links {
        let target = link
            .target
            .strip_prefix(&settings.home)
            .map(|p| format!("~/{}", p.display()))
            .unwrap_or_else(|_| link.target.display().to_string());
        let source = link
            .source
            .strip_prefix(&settings.repo_root)
            .unwrap_or(&link.source)
            .display()
            .to_string();
        links.add_row([target, source, link_label(&link.state)]);
    }
    ui.message(&links.render());

    let missing = report.tools.iter().filter(|t| !t.presence.is_present()).count();
    if missing > 0 {
        ui.show_hint(&format!("{} tool(s) missing, run `dotstrap run` to install", missing));
    }
}
