//! The starship prompt and the tmux plugin manager.

use crate::detection::SupportedOs;
use crate::error::Result;
use crate::runner::{StageContext, StageReport};
use crate::shell::quote_path;

/// Upstream starship installer, run without prompts.
pub const STARSHIP_INSTALL: &str = "curl -sS https://starship.rs/install.sh | sh -s -- -y";

/// Git remote of tpm.
pub const TPM_REPO: &str = "https://github.com/tmux-plugins/tpm";

/// Install starship unless it is on PATH.
///
/// Homebrew is used on macOS, the upstream script elsewhere.
pub fn install_starship(ctx: &StageContext<'_>, report: &mut StageReport) -> Result<()> {
    if !ctx.settings.install_starship {
        report.skipped("starship", "disabled in config");
        return Ok(());
    }
    if ctx.locator.has("starship") {
        report.skipped("starship", "already installed");
        return Ok(());
    }

    match (ctx.os, ctx.manager) {
        (SupportedOs::MacOS, Some(manager)) => {
            manager.install("starship", ctx.runner)?;
            report.done("starship", format!("installed with {}", manager.name()));
        }
        _ => {
            ctx.runner.run_checked(STARSHIP_INSTALL)?;
            report.done("starship", "installed with the upstream script");
        }
    }
    Ok(())
}

/// Clone tpm unless its directory exists.
pub fn install_tpm(ctx: &StageContext<'_>, report: &mut StageReport) -> Result<()> {
    if !ctx.settings.install_tpm {
        report.skipped("tpm", "disabled in config");
        return Ok(());
    }
    let dest = ctx.settings.tpm_dir();
    if dest.exists() {
        report.skipped("tpm", "already cloned");
        return Ok(());
    }

    ctx.runner.run_checked(&format!(
        "git clone --depth=1 {} {}",
        TPM_REPO,
        quote_path(&dest)
    ))?;
    report.done("tpm", format!("cloned to {}", dest.display()));
    Ok(())
}
