//! Package manager strategies.
//!
//! Each supported manager is described by a [`ManagerKind`], which knows the
//! exact command lines for installing and querying a package. The
//! [`PackageManager`] trait is the seam the installers program against;
//! [`SystemPackageManager`] is the only production implementation.

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::requirements::{Presence, ToolLocator};
use crate::shell::{privileged, quote, CommandRunner};

/// Exit code `/bin/sh` reports when the command itself was not found.
const COMMAND_NOT_FOUND: i32 = 127;

/// The package managers dotstrap knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    Apt,
    Dnf,
    Pacman,
    Zypper,
    #[serde(rename = "brew")]
    Homebrew,
}

impl ManagerKind {
    /// Linux managers in probing order. The first one found wins.
    pub const LINUX_PRIORITY: [ManagerKind; 4] = [
        ManagerKind::Apt,
        ManagerKind::Dnf,
        ManagerKind::Pacman,
        ManagerKind::Zypper,
    ];

    /// Short name used in config files and output.
    pub fn name(&self) -> &'static str {
        match self {
            ManagerKind::Apt => "apt",
            ManagerKind::Dnf => "dnf",
            ManagerKind::Pacman => "pacman",
            ManagerKind::Zypper => "zypper",
            ManagerKind::Homebrew => "brew",
        }
    }

    /// Binary whose presence on PATH means the manager is available.
    pub fn binary(&self) -> &'static str {
        match self {
            ManagerKind::Apt => "apt-get",
            ManagerKind::Dnf => "dnf",
            ManagerKind::Pacman => "pacman",
            ManagerKind::Zypper => "zypper",
            ManagerKind::Homebrew => "brew",
        }
    }

    /// Whether install commands need root.
    pub fn needs_root(&self) -> bool {
        !matches!(self, ManagerKind::Homebrew)
    }

    /// Non-interactive install command, without any `sudo` prefix.
    pub fn install_command(&self, package: &str) -> String {
        let package = quote(package);
        match self {
            ManagerKind::Apt => format!("DEBIAN_FRONTEND=noninteractive apt-get install -y {}", package),
            ManagerKind::Dnf => format!("dnf install -y {}", package),
            ManagerKind::Pacman => format!("pacman -S --noconfirm --needed {}", package),
            ManagerKind::Zypper => format!("zypper --non-interactive install {}", package),
            ManagerKind::Homebrew => format!("brew install {}", package),
        }
    }

    /// Read-only query that exits 0 when the package is installed.
    pub fn query_command(&self, package: &str) -> String {
        let package = quote(package);
        match self {
            ManagerKind::Apt => format!("dpkg -s {}", package),
            ManagerKind::Dnf | ManagerKind::Zypper => format!("rpm -q {}", package),
            ManagerKind::Pacman => format!("pacman -Q {}", package),
            ManagerKind::Homebrew => format!("brew list --versions {}", package),
        }
    }

    /// Index refresh required before the first install, if any.
    pub fn refresh_command(&self) -> Option<&'static str> {
        match self {
            ManagerKind::Apt => Some("apt-get update"),
            _ => None,
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A package manager that can install and query packages.
pub trait PackageManager {
    /// Which manager this is.
    fn kind(&self) -> ManagerKind;

    /// Short display name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether the manager is usable on this host.
    fn detect(&self, locator: &ToolLocator) -> bool;

    /// Install one package. A non-zero exit is an error.
    fn install(&self, package: &str, runner: &dyn CommandRunner) -> Result<()>;

    /// Ask the manager whether a package is installed.
    fn query_installed(&self, package: &str, runner: &dyn CommandRunner) -> Presence;
}

/// Drives a manager through its command-line interface.
#[derive(Debug)]
pub struct SystemPackageManager {
    kind: ManagerKind,
    elevated: bool,
    refreshed: Cell<bool>,
}

impl SystemPackageManager {
    /// Create a manager. `elevated` means the process already runs as root.
    pub fn new(kind: ManagerKind, elevated: bool) -> Self {
        Self {
            kind,
            elevated,
            refreshed: Cell::new(false),
        }
    }

    fn privileged(&self, command: &str) -> String {
        if self.kind.needs_root() {
            privileged(command, self.elevated)
        } else {
            command.to_string()
        }
    }

    fn ensure_refreshed(&self, runner: &dyn CommandRunner) -> Result<()> {
        if self.refreshed.get() {
            return Ok(());
        }
        if let Some(refresh) = self.kind.refresh_command() {
            tracing::debug!("Refreshing {} package index", self.kind);
            runner.run_checked(&self.privileged(refresh))?;
        }
        self.refreshed.set(true);
        Ok(())
    }
}

impl PackageManager for SystemPackageManager {
    fn kind(&self) -> ManagerKind {
        self.kind
    }

    fn detect(&self, locator: &ToolLocator) -> bool {
        locator.has(self.kind.binary())
    }

    fn install(&self, package: &str, runner: &dyn CommandRunner) -> Result<()> {
        self.ensure_refreshed(runner)?;
        let command = self.privileged(&self.kind.install_command(package));
        runner.run_checked(&command)?;
        Ok(())
    }

    fn query_installed(&self, package: &str, runner: &dyn CommandRunner) -> Presence {
        match runner.probe(&self.kind.query_command(package)) {
            Ok(result) if result.success => Presence::installed(),
            Ok(result) if result.exit_code == Some(COMMAND_NOT_FOUND) => Presence::Unknown,
            Ok(_) => Presence::Absent,
            Err(e) => {
                tracing::debug!("Package query for {} failed to run: {}", package, e);
                Presence::Unknown
            }
        }
    }
}
