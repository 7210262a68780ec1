//! Shell enhancements: oh-my-zsh, zsh plugins, starship and tpm.
//!
//! Every installer is guarded by an existence check and invoked
//! non-interactively.

pub mod extras;
pub mod zsh;

pub use extras::{install_starship, install_tpm, STARSHIP_INSTALL, TPM_REPO};
pub use zsh::{builtin_plugins, install_oh_my_zsh, install_plugins, PluginRepo};

use crate::error::Result;
use crate::runner::{StageContext, StageReport};

/// Run the shell stage in order: oh-my-zsh, plugins, starship, tpm.
pub fn install_shell(ctx: &StageContext<'_>) -> Result<StageReport> {
    let mut report = StageReport::new();
    install_oh_my_zsh(ctx, &mut report)?;
    install_plugins(ctx, &mut report)?;
    install_starship(ctx, &mut report)?;
    install_tpm(ctx, &mut report)?;
    Ok(report)
}
