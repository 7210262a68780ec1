//! Link command implementation.
//!
//! The `dotstrap link` command runs only the symlink stage. It needs no
//! package manager and works on any host.

use crate::config::Settings;
use crate::error::Result;
use crate::links::link_all;
use crate::runner::ItemStatus;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The link command implementation.
pub struct LinkCommand {
    settings: Settings,
}

impl LinkCommand {
    /// Create a new link command.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Command for LinkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("dotstrap link");
        let report = link_all(&self.settings, false)?;
        show_report(ui, &report);

        let linked = report.count(ItemStatus::Done);
        let missing = report.count(ItemStatus::Warned);
        ui.success(&format!(
            "{} linked, {} already in place, {} missing from repo",
            linked,
            report.count(ItemStatus::Skipped),
            missing
        ));
        Ok(CommandResult::success())
    }
}
