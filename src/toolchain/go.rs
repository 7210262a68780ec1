//! Go toolchain installer.
//!
//! Installs the pinned Go release from `go.dev` into `<install_parent>/go`,
//! the layout the official tarball expects.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::detection::Arch;
use crate::error::{DotstrapError, Result};
use crate::runner::{StageContext, StageReport};
use crate::shell::{privileged, quote_path};

use super::download::verify_download;

/// Go release installed when neither config nor `GO_VERSION` pins another.
pub const DEFAULT_GO_VERSION: &str = "1.23.4";

/// Base URL of the official Go downloads.
pub const GO_DOWNLOAD_BASE: &str = "https://go.dev/dl";

/// Go's name for a CPU architecture in release file names.
pub fn go_arch_tag(arch: &Arch) -> Result<&'static str> {
    match arch {
        Arch::X86_64 => Ok("amd64"),
        Arch::Aarch64 => Ok("arm64"),
        Arch::Arm => Ok("armv6l"),
        Arch::X86 => Ok("386"),
        Arch::Other(name) => Err(DotstrapError::UnsupportedArch {
            arch: name.clone(),
            component: "go".to_string(),
        }),
    }
}

/// Release archive name, e.g. `go1.23.4.linux-amd64.tar.gz`.
pub fn go_archive_name(version: &str, tag: &str) -> String {
    format!("go{}.linux-{}.tar.gz", version, tag)
}

/// Download URL of a release archive.
pub fn go_download_url(version: &str, tag: &str) -> String {
    format!("{}/{}", GO_DOWNLOAD_BASE, go_archive_name(version, tag))
}

/// Version reported by `go version` output.
pub fn parse_go_version(output: &str) -> Option<String> {
    let re = Regex::new(r"go(\d+\.\d+(?:\.\d+)?)").ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Path of an existing `go` binary, on the search path or under the Go root.
pub fn find_go(ctx: &StageContext<'_>) -> Option<PathBuf> {
    ctx.locator.find("go").or_else(|| {
        let bundled = ctx.settings.go.go_root().join("bin/go");
        bundled.is_file().then_some(bundled)
    })
}

/// Version of an installed `go` binary, if it reports one.
pub fn installed_go_version(ctx: &StageContext<'_>, go: &Path) -> Option<String> {
    let result = ctx
        .runner
        .probe(&format!("{} version", quote_path(go)))
        .ok()?;
    if !result.success {
        return None;
    }
    parse_go_version(&result.stdout)
}

/// Install the pinned Go toolchain unless one is already present.
///
/// The architecture is checked before anything is downloaded.
pub fn install_go(ctx: &StageContext<'_>, report: &mut StageReport) -> Result<()> {
    let go = &ctx.settings.go;
    if let Some(existing) = find_go(ctx) {
        let detail = match installed_go_version(ctx, &existing) {
            Some(found) if found == go.version => format!("already installed ({})", found),
            Some(found) => {
                tracing::warn!(
                    "Go {} found at {}, pinned version {} not installed",
                    found,
                    existing.display(),
                    go.version
                );
                format!("already installed ({}, pinned {})", found, go.version)
            }
            None => "already installed".to_string(),
        };
        report.skipped("go", detail);
        return Ok(());
    }

    let tag = go_arch_tag(&ctx.host.arch())?;
    let url = go_download_url(&go.version, tag);
    let archive = ctx.settings.cache_dir.join(go_archive_name(&go.version, tag));

    tracing::info!("Installing Go {} ({})", go.version, tag);
    if !ctx.runner.is_dry_run() {
        fs::create_dir_all(&ctx.settings.cache_dir)?;
    }
    ctx.downloader.download(&url, &archive)?;
    if go.verify_checksum && !ctx.runner.is_dry_run() {
        verify_download(ctx.downloader, &url, &archive)?;
    }

    let elevated = ctx.settings.elevated || go.install_parent.starts_with(&ctx.settings.home);
    ctx.runner.run_checked(&privileged(
        &format!("rm -rf {}", quote_path(&go.go_root())),
        elevated,
    ))?;
    ctx.runner.run_checked(&privileged(
        &format!(
            "tar -C {} -xzf {}",
            quote_path(&go.install_parent),
            quote_path(&archive)
        ),
        elevated,
    ))?;

    match fs::remove_file(&archive) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    report.done("go", format!("installed {} to {}", go.version, go.go_root().display()));
    Ok(())
}
