//! Fixtures for installer tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::config::Settings;
use crate::detection::{HostInfo, SupportedOs};
use crate::packages::{ManagerKind, PackageManager, SystemPackageManager};
use crate::requirements::probe::tests::create_fake_binary;
use crate::requirements::ToolLocator;
use crate::shell::RecordingRunner;
use crate::toolchain::RecordingDownloader;

use super::StageContext;

/// A throwaway home, repo and PATH with recording fakes.
pub(crate) struct Fixture {
    _temp: TempDir,
    pub settings: Settings,
    pub host: HostInfo,
    pub os: SupportedOs,
    pub runner: RecordingRunner,
    pub downloader: RecordingDownloader,
    pub locator: ToolLocator,
    pub bin_dir: PathBuf,
    pub manager: Option<SystemPackageManager>,
}

impl Fixture {
    pub fn linux(machine: &str) -> Self {
        Self::new("Linux", machine, SupportedOs::Linux)
    }

    pub fn macos(machine: &str) -> Self {
        Self::new("Darwin", machine, SupportedOs::MacOS)
    }

    fn new(kernel: &str, machine: &str, os: SupportedOs) -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let repo = temp.path().join("repo");
        let bin_dir = temp.path().join("bin");
        for dir in [&home, &repo, &bin_dir] {
            fs::create_dir_all(dir).unwrap();
        }

        let mut settings = Settings::defaults(home, repo);
        settings.go.install_parent = temp.path().join("usr-local");

        let runner = RecordingRunner::new();
        runner.respond("uname -s", &format!("{}\n", kernel));
        runner.respond("uname -m", &format!("{}\n", machine));

        Self {
            settings,
            host: HostInfo::new(kernel, machine),
            os,
            runner,
            downloader: RecordingDownloader::new(),
            locator: ToolLocator::new(vec![bin_dir.clone()]),
            bin_dir,
            manager: None,
            _temp: temp,
        }
    }

    pub fn with_manager(mut self, kind: ManagerKind) -> Self {
        self.manager = Some(SystemPackageManager::new(kind, false));
        self
    }

    /// Put an executable on the fixture PATH.
    pub fn install_binary(&self, name: &str) {
        create_fake_binary(&self.bin_dir.join(name));
    }

    pub fn context(&self) -> StageContext<'_> {
        StageContext {
            settings: &self.settings,
            host: &self.host,
            os: self.os,
            runner: &self.runner,
            downloader: &self.downloader,
            locator: &self.locator,
            manager: self.manager.as_ref().map(|m| m as &dyn PackageManager),
        }
    }
}
