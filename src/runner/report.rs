//! Per-stage outcome reports.
//!
//! Installers never talk to the terminal. They record what they did in a
//! [`StageReport`] and the workflow renders it through the UI.

use serde::Serialize;

/// What happened to one item of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Installed, cloned, linked, or planned in a dry run.
    Done,
    /// Already satisfied, nothing to do.
    Skipped,
    /// A tolerated failure or something the user should look at.
    Warned,
}

/// One line of a stage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportItem {
    pub name: String,
    pub status: ItemStatus,
    pub detail: String,
}

/// Items recorded by one stage, in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageReport {
    items: Vec<ReportItem>,
}

impl StageReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn done(&mut self, name: &str, detail: impl Into<String>) {
        self.push(name, ItemStatus::Done, detail.into());
    }

    pub fn skipped(&mut self, name: &str, detail: impl Into<String>) {
        self.push(name, ItemStatus::Skipped, detail.into());
    }

    pub fn warned(&mut self, name: &str, detail: impl Into<String>) {
        self.push(name, ItemStatus::Warned, detail.into());
    }

    fn push(&mut self, name: &str, status: ItemStatus, detail: String) {
        self.items.push(ReportItem {
            name: name.to_string(),
            status,
            detail,
        });
    }

    /// Append every item of another report.
    pub fn extend(&mut self, other: StageReport) {
        self.items.extend(other.items);
    }

    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    /// Number of items with the given status.
    pub fn count(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }

    /// Find the item recorded for a name.
    pub fn get(&self, name: &str) -> Option<&ReportItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_status() {
        let mut report = StageReport::new();
        report.done("zsh", "installed");
        report.skipped("git", "already installed");
        report.skipped("tmux", "already installed");
        report.warned("neovim", "package install failed");

        assert_eq!(report.count(ItemStatus::Done), 1);
        assert_eq!(report.count(ItemStatus::Skipped), 2);
        assert_eq!(report.count(ItemStatus::Warned), 1);
    }

    #[test]
    fn extend_keeps_order() {
        let mut first = StageReport::new();
        first.done("a", "");
        let mut second = StageReport::new();
        second.done("b", "");

        first.extend(second);

        let names: Vec<_> = first.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(first.get("b").unwrap().status, ItemStatus::Done);
        assert!(first.get("c").is_none());
    }
}
