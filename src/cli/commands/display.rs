//! Shared display helpers for stage reports and probe results.
//!
//! Used by `run` and `link` to render a [`StageReport`], and by `status`
//! to label tool and link states consistently.

use crate::links::LinkState;
use crate::requirements::Presence;
use crate::runner::{ItemStatus, ReportItem, StageReport};
use crate::ui::UserInterface;

/// Format one report item as `name (detail)`.
pub fn item_line(item: &ReportItem) -> String {
    if item.detail.is_empty() {
        format!("  {}", item.name)
    } else {
        format!("  {} ({})", item.name, item.detail)
    }
}

/// Print every item of a stage report, styled by status.
pub fn show_report(ui: &mut dyn UserInterface, report: &StageReport) {
    for item in report.items() {
        let line = item_line(item);
        match item.status {
            ItemStatus::Done => ui.success(&line),
            ItemStatus::Skipped => ui.skipped(&line),
            ItemStatus::Warned => ui.warning(&line),
        }
    }
}

/// Short label for a tool probe result.
pub fn presence_label(presence: &Presence) -> String {
    match presence {
        Presence::Present { path: Some(path) } => format!("✓ {}", path.display()),
        Presence::Present { path: None } => "✓ installed".to_string(),
        Presence::Absent => "✗ missing".to_string(),
        Presence::Unknown => "? unknown".to_string(),
    }
}

/// Short label for a link state.
pub fn link_label(state: &LinkState) -> String {
    match state {
        LinkState::Linked => "✓ linked".to_string(),
        LinkState::Missing => "○ not linked".to_string(),
        LinkState::NoSource => "⚠ no source in repo".to_string(),
        LinkState::Conflict { found } => format!("✗ {}", found),
    }
}
