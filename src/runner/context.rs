//! Shared inputs of the installer stages.

use crate::config::Settings;
use crate::detection::{HostInfo, SupportedOs};
use crate::packages::PackageManager;
use crate::requirements::ToolLocator;
use crate::shell::CommandRunner;
use crate::toolchain::Downloader;

/// Everything an installer may consult or act through.
///
/// Installers take no other inputs, so each can be exercised in isolation
/// with recording fakes.
pub struct StageContext<'a> {
    pub settings: &'a Settings,
    pub host: &'a HostInfo,
    pub os: SupportedOs,
    pub runner: &'a dyn CommandRunner,
    pub downloader: &'a dyn Downloader,
    pub locator: &'a ToolLocator,
    /// The selected package manager, when the run needed one.
    pub manager: Option<&'a dyn PackageManager>,
}
