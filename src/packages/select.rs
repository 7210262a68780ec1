//! Package manager selection.
//!
//! The manager is chosen once per run by probing candidates in priority
//! order. On macOS, Homebrew is installed with the official non-interactive
//! installer when it is missing.

use crate::detection::SupportedOs;
use crate::error::{DotstrapError, Result};
use crate::requirements::ToolLocator;
use crate::shell::CommandRunner;

use super::manager::{ManagerKind, PackageManager, SystemPackageManager};

/// Official Homebrew installer, run without prompts.
pub const HOMEBREW_INSTALL: &str = "NONINTERACTIVE=1 /bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"";

/// Candidate managers for a platform, in probing order.
pub fn candidates(os: SupportedOs, elevated: bool) -> Vec<SystemPackageManager> {
    let kinds: &[ManagerKind] = match os {
        SupportedOs::Linux => &ManagerKind::LINUX_PRIORITY,
        SupportedOs::MacOS => &[ManagerKind::Homebrew],
    };
    kinds
        .iter()
        .map(|kind| SystemPackageManager::new(*kind, elevated))
        .collect()
}

/// Pick the first candidate that is available.
pub fn first_available<M: PackageManager>(candidates: Vec<M>, locator: &ToolLocator) -> Option<M> {
    candidates.into_iter().find(|m| m.detect(locator))
}

/// Select the package manager for this run.
///
/// Fails with [`DotstrapError::NoPackageManager`] when no Linux manager is
/// found, or when Homebrew is still missing after its installer ran.
pub fn select_manager(
    os: SupportedOs,
    elevated: bool,
    locator: &ToolLocator,
    runner: &dyn CommandRunner,
) -> Result<Box<dyn PackageManager>> {
    let candidates = candidates(os, elevated);
    let tried = candidates
        .iter()
        .map(|m| m.name())
        .collect::<Vec<_>>()
        .join(", ");

    if let Some(manager) = first_available(candidates, locator) {
        tracing::debug!("Selected package manager: {}", manager.name());
        return Ok(Box::new(manager));
    }

    if os == SupportedOs::MacOS {
        tracing::info!("Homebrew not found, installing it");
        runner.run_checked(HOMEBREW_INSTALL)?;
        let brew = SystemPackageManager::new(ManagerKind::Homebrew, elevated);
        if runner.is_dry_run() || brew.detect(locator) {
            return Ok(Box::new(brew));
        }
    }

    Err(DotstrapError::NoPackageManager { tried })
}
