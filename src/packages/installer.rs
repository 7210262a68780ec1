//! The package installer stage.
//!
//! For each tool: look for one of its binaries on PATH, then ask the package
//! manager. Only tools that neither check finds are installed, so a second
//! run issues no install commands at all.

use crate::detection::SupportedOs;
use crate::error::Result;
use crate::requirements::{Presence, ToolDescriptor, ToolLocator, ToolStatus};
use crate::runner::StageReport;
use crate::shell::CommandRunner;

use super::manager::PackageManager;

/// Presence of a tool, PATH first, then the manager's package database.
pub fn tool_presence(
    tool: &ToolDescriptor,
    manager: Option<&dyn PackageManager>,
    locator: &ToolLocator,
    runner: &dyn CommandRunner,
) -> Presence {
    locator.presence(&tool.binaries()).or_else(|| match manager {
        Some(manager) => manager.query_installed(tool.package_for(manager.kind()), runner),
        None => Presence::Unknown,
    })
}

/// Install every applicable tool that is not already present.
///
/// The first failing install aborts the stage.
pub fn install_tools(
    tools: &[ToolDescriptor],
    os: SupportedOs,
    manager: &dyn PackageManager,
    locator: &ToolLocator,
    runner: &dyn CommandRunner,
) -> Result<StageReport> {
    let mut report = StageReport::new();

    for tool in tools.iter().filter(|t| t.applies_to(os)) {
        if tool_presence(tool, Some(manager), locator, runner).is_present() {
            tracing::debug!("{} already installed", tool.name);
            report.skipped(&tool.name, "already installed");
            continue;
        }

        let package = tool.package_for(manager.kind());
        tracing::info!("Installing {} with {}", package, manager.name());
        manager.install(package, runner)?;
        report.done(&tool.name, format!("installed with {}", manager.name()));
    }

    Ok(report)
}

/// Presence of every applicable tool, for `dotstrap status`.
pub fn tool_statuses(
    tools: &[ToolDescriptor],
    os: SupportedOs,
    manager: Option<&dyn PackageManager>,
    locator: &ToolLocator,
    runner: &dyn CommandRunner,
) -> Vec<ToolStatus> {
    tools
        .iter()
        .filter(|t| t.applies_to(os))
        .map(|tool| ToolStatus {
            name: tool.name.clone(),
            presence: tool_presence(tool, manager, locator, runner),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::{ManagerKind, SystemPackageManager};
    use crate::requirements::probe::tests::create_fake_binary;
    use crate::runner::ItemStatus;
    use crate::shell::RecordingRunner;
    use tempfile::TempDir;

    fn tools() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new("git"),
            ToolDescriptor::new("fd")
                .with_binaries(&["fd", "fdfind"])
                .with_package(ManagerKind::Apt, "fd-find"),
            ToolDescriptor::new("go").only_on(SupportedOs::MacOS),
        ]
    }

    #[test]
    fn present_tools_issue_no_install_commands() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("git"));
        create_fake_binary(&temp.path().join("fdfind"));
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);
        let runner = RecordingRunner::new();
        let manager = SystemPackageManager::new(ManagerKind::Apt, false);

        let report = install_tools(&tools(), SupportedOs::Linux, &manager, &locator, &runner).unwrap();

        assert!(runner.commands().is_empty());
        assert_eq!(report.count(ItemStatus::Skipped), 2);
    }

    #[test]
    fn package_database_counts_as_present() {
        let temp = TempDir::new().unwrap();
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);
        let runner = RecordingRunner::new();
        runner.respond("dpkg -s git", "Status: install ok installed\n");
        runner.respond("dpkg -s fd-find", "Status: install ok installed\n");
        let manager = SystemPackageManager::new(ManagerKind::Apt, false);

        install_tools(&tools(), SupportedOs::Linux, &manager, &locator, &runner).unwrap();

        assert!(runner.commands().is_empty());
    }

    #[test]
    fn missing_tools_are_installed_with_manager_package_names() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("git"));
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);
        let runner = RecordingRunner::new();
        let manager = SystemPackageManager::new(ManagerKind::Apt, true);

        let report = install_tools(&tools(), SupportedOs::Linux, &manager, &locator, &runner).unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "apt-get update",
                "DEBIAN_FRONTEND=noninteractive apt-get install -y fd-find",
            ]
        );
        assert_eq!(report.get("fd").unwrap().status, ItemStatus::Done);
        assert!(report.get("go").is_none());
    }

    #[test]
    fn install_failure_aborts_the_stage() {
        let temp = TempDir::new().unwrap();
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);
        let runner = RecordingRunner::new();
        runner.fail_on("dnf install -y git");
        let manager = SystemPackageManager::new(ManagerKind::Dnf, true);

        let result = install_tools(&tools(), SupportedOs::Linux, &manager, &locator, &runner);

        assert!(result.is_err());
        assert!(!runner.ran("fd"));
    }

    #[test]
    fn statuses_report_each_applicable_tool() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("go"));
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);
        let runner = RecordingRunner::new();

        let statuses = tool_statuses(&tools(), SupportedOs::MacOS, None, &locator, &runner);

        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[0].presence, Presence::Absent);
        assert!(statuses[2].presence.is_present());
    }
}
