//! Upstream toolchain installs for Linux.
//!
//! Distribution packages for Go and Neovim tend to lag far behind, so on
//! Linux both come from upstream release artifacts instead.
//!
//! # Modules
//!
//! - [`download`] - The [`Downloader`] seam and checksum verification
//! - [`go`] - The pinned Go toolchain
//! - [`editor`] - Neovim, with a distribution package first

pub mod download;
pub mod editor;
pub mod go;

pub use download::{
    parse_checksum, sha256_file, verify_download, Downloader, DryRunDownloader, HttpDownloader,
    RecordingDownloader,
};
pub use editor::{editor_asset, install_editor, EditorAsset};
pub use go::{go_arch_tag, go_download_url, install_go, DEFAULT_GO_VERSION};

use crate::error::Result;
use crate::runner::{StageContext, StageReport};

/// Run the toolchain stage: Go, then Neovim.
pub fn install_toolchain(ctx: &StageContext<'_>) -> Result<StageReport> {
    let mut report = StageReport::new();
    install_go(ctx, &mut report)?;
    install_editor(ctx, &mut report)?;
    Ok(report)
}
