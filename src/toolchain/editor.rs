//! Neovim installer.
//!
//! The distribution package is tried first. When that fails, or leaves no
//! `nvim` on the search path, the latest upstream release is installed into
//! the user's home instead.

use std::fs;
use std::path::PathBuf;

use crate::detection::Arch;
use crate::error::{DotstrapError, Result};
use crate::runner::{StageContext, StageReport};
use crate::shell::quote_path;

/// Where the upstream release assets live.
pub const NEOVIM_RELEASE_BASE: &str = "https://github.com/neovim/neovim/releases/latest/download";

const PACKAGE: &str = "neovim";

/// Upstream release asset for an architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAsset {
    /// A tarball unpacked into `~/.local/share/<dir>`.
    Archive {
        file: &'static str,
        dir: &'static str,
    },
    /// A self-contained AppImage used as the binary itself.
    AppImage { file: &'static str },
}

impl EditorAsset {
    pub fn file(&self) -> &'static str {
        match self {
            EditorAsset::Archive { file, .. } | EditorAsset::AppImage { file } => file,
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", NEOVIM_RELEASE_BASE, self.file())
    }
}

/// Pick the release asset for an architecture.
pub fn editor_asset(arch: &Arch) -> Result<EditorAsset> {
    match arch {
        Arch::Aarch64 => Ok(EditorAsset::Archive {
            file: "nvim-linux-arm64.tar.gz",
            dir: "nvim-linux-arm64",
        }),
        Arch::X86_64 => Ok(EditorAsset::AppImage {
            file: "nvim-linux-x86_64.appimage",
        }),
        other => Err(DotstrapError::UnsupportedArch {
            arch: other.to_string(),
            component: "neovim".to_string(),
        }),
    }
}

/// Install Neovim unless `nvim` is already available.
pub fn install_editor(ctx: &StageContext<'_>, report: &mut StageReport) -> Result<()> {
    if !ctx.settings.install_editor {
        report.skipped("neovim", "disabled in config");
        return Ok(());
    }
    if ctx.locator.has("nvim") {
        report.skipped("neovim", "already installed");
        return Ok(());
    }

    if let Some(manager) = ctx.manager {
        match manager.install(PACKAGE, ctx.runner) {
            Ok(()) if ctx.runner.is_dry_run() || ctx.locator.has("nvim") => {
                report.done("neovim", format!("installed with {}", manager.name()));
                return Ok(());
            }
            Ok(()) => {
                tracing::warn!("{} installed neovim but nvim is not on PATH", manager.name());
            }
            Err(e) => {
                tracing::warn!("Installing neovim with {} failed: {}", manager.name(), e);
                report.warned(
                    "neovim",
                    format!("{} package failed, using the upstream release", manager.name()),
                );
            }
        }
    }

    let asset = editor_asset(&ctx.host.arch())?;
    install_release(ctx, asset)?;
    report.done("neovim", format!("installed {}", asset.file()));
    Ok(())
}

fn install_release(ctx: &StageContext<'_>, asset: EditorAsset) -> Result<()> {
    let settings = ctx.settings;
    let link = settings.local_bin.join("nvim");
    if !ctx.runner.is_dry_run() {
        fs::create_dir_all(&settings.local_bin)?;
    }

    match asset {
        EditorAsset::Archive { file, dir } => {
            let archive = settings.cache_dir.join(file);
            let unpacked: PathBuf = settings.local_share.join(dir);
            if !ctx.runner.is_dry_run() {
                fs::create_dir_all(&settings.cache_dir)?;
                fs::create_dir_all(&settings.local_share)?;
            }
            ctx.downloader.download(&asset.url(), &archive)?;
            ctx.runner
                .run_checked(&format!("rm -rf {}", quote_path(&unpacked)))?;
            ctx.runner.run_checked(&format!(
                "tar -C {} -xzf {}",
                quote_path(&settings.local_share),
                quote_path(&archive)
            ))?;
            ctx.runner.run_checked(&format!(
                "ln -sfn {} {}",
                quote_path(&unpacked.join("bin/nvim")),
                quote_path(&link)
            ))?;
            match fs::remove_file(&archive) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        EditorAsset::AppImage { .. } => {
            ctx.downloader.download(&asset.url(), &link)?;
            ctx.runner
                .run_checked(&format!("chmod u+x {}", quote_path(&link)))?;
        }
    }

    Ok(())
}
