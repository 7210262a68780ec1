//! Bootstrap orchestration.
//!
//! A run detects the host, selects a package manager, then executes the
//! stages in a fixed order. The first error aborts the run; nothing is
//! rolled back, since every installer is guarded by its own presence check
//! and a re-run picks up where the last one stopped.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::detection::{HostInfo, SupportedOs};
use crate::error::{DotstrapError, Result};
use crate::links::link_all;
use crate::packages::{install_tools, select_manager, ManagerKind, PackageManager};
use crate::plugins::install_shell;
use crate::requirements::ToolLocator;
use crate::shell::CommandRunner;
use crate::toolchain::{install_toolchain, Downloader};

use super::context::StageContext;
use super::report::{ItemStatus, StageReport};

/// The stages of a bootstrap run, in execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// System packages through the package manager.
    Packages,
    /// Go and Neovim from upstream releases (Linux only).
    Toolchain,
    /// oh-my-zsh, zsh plugins, starship and tpm.
    Shell,
    /// Dotfile symlinks.
    Links,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Packages, Stage::Toolchain, Stage::Shell, Stage::Links];

    /// Short title shown in output.
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Packages => "Packages",
            Stage::Toolchain => "Toolchain",
            Stage::Shell => "Shell",
            Stage::Links => "Links",
        }
    }

    fn needs_manager(&self) -> bool {
        !matches!(self, Stage::Links)
    }
}

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// The host was identified and a manager selected.
    HostDetected {
        host: &'a HostInfo,
        os: SupportedOs,
        manager: Option<ManagerKind>,
    },
    /// A stage is about to start.
    StageStarting {
        stage: Stage,
        index: usize,
        total: usize,
    },
    /// A stage finished.
    StageFinished {
        stage: Stage,
        report: &'a StageReport,
    },
    /// A stage was not run.
    StageSkipped { stage: Stage, reason: &'a str },
}

/// Options for a run.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Stages not to run.
    pub skip: HashSet<Stage>,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct WorkflowResult {
    pub host: HostInfo,
    pub os: SupportedOs,
    pub manager: Option<ManagerKind>,
    /// Reports of the stages that ran, in order.
    pub stages: Vec<(Stage, StageReport)>,
    /// Stages that did not run.
    pub skipped: Vec<Stage>,
    pub duration: Duration,
}

impl WorkflowResult {
    /// Items with the given status across all stages.
    pub fn count(&self, status: ItemStatus) -> usize {
        self.stages.iter().map(|(_, r)| r.count(status)).sum()
    }

    /// The report of one stage, if it ran.
    pub fn report(&self, stage: Stage) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, r)| r)
    }
}

/// Runs the bootstrap stages against injected effects.
pub struct WorkflowRunner<'a> {
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
    downloader: &'a dyn Downloader,
    locator: &'a ToolLocator,
}

impl<'a> WorkflowRunner<'a> {
    pub fn new(
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
        downloader: &'a dyn Downloader,
        locator: &'a ToolLocator,
    ) -> Self {
        Self {
            settings,
            runner,
            downloader,
            locator,
        }
    }

    /// Run every stage not skipped by `options`.
    pub fn run(&self, options: &RunOptions) -> Result<WorkflowResult> {
        self.run_with_progress(options, |_| {})
    }

    /// Run with a progress callback.
    ///
    /// An unsupported OS fails before any stage or manager probe starts.
    pub fn run_with_progress(
        &self,
        options: &RunOptions,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<WorkflowResult> {
        let start = Instant::now();

        let host = HostInfo::detect(self.runner);
        let os = host.os().require_supported()?;
        tracing::info!("Bootstrapping {} ({})", os, host.machine);

        let planned: Vec<Stage> = Stage::ALL
            .into_iter()
            .filter(|s| !options.skip.contains(s))
            .filter(|s| *s != Stage::Toolchain || os == SupportedOs::Linux)
            .collect();

        let manager: Option<Box<dyn PackageManager>> = if planned.iter().any(Stage::needs_manager)
        {
            Some(select_manager(
                os,
                self.settings.elevated,
                self.locator,
                self.runner,
            )?)
        } else {
            None
        };
        on_progress(RunProgress::HostDetected {
            host: &host,
            os,
            manager: manager.as_ref().map(|m| m.kind()),
        });

        let ctx = StageContext {
            settings: self.settings,
            host: &host,
            os,
            runner: self.runner,
            downloader: self.downloader,
            locator: self.locator,
            manager: manager.as_deref(),
        };

        let mut stages = Vec::new();
        let mut skipped = Vec::new();
        let total = planned.len();
        let mut index = 0;

        for stage in Stage::ALL {
            if options.skip.contains(&stage) {
                on_progress(RunProgress::StageSkipped {
                    stage,
                    reason: "skipped on request",
                });
                skipped.push(stage);
                continue;
            }
            if !planned.contains(&stage) {
                on_progress(RunProgress::StageSkipped {
                    stage,
                    reason: "Linux only",
                });
                skipped.push(stage);
                continue;
            }

            index += 1;
            on_progress(RunProgress::StageStarting {
                stage,
                index,
                total,
            });
            tracing::info!("Stage {}/{}: {}", index, total, stage.title());
            let report = self.run_stage(stage, &ctx)?;
            on_progress(RunProgress::StageFinished {
                stage,
                report: &report,
            });
            stages.push((stage, report));
        }

        Ok(WorkflowResult {
            manager: manager.as_ref().map(|m| m.kind()),
            host,
            os,
            stages,
            skipped,
            duration: start.elapsed(),
        })
    }

    fn run_stage(&self, stage: Stage, ctx: &StageContext<'_>) -> Result<StageReport> {
        match stage {
            Stage::Packages => {
                let manager = ctx.manager.ok_or_else(|| DotstrapError::NoPackageManager {
                    tried: "none".to_string(),
                })?;
                install_tools(&self.settings.tools, ctx.os, manager, ctx.locator, ctx.runner)
            }
            Stage::Toolchain => install_toolchain(ctx),
            Stage::Shell => install_shell(ctx),
            Stage::Links => link_all(self.settings, ctx.runner.is_dry_run()),
        }
    }
}
