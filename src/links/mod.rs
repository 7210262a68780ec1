//! Dotfile symlinks.
//!
//! Each [`LinkPair`] maps a path in the dotfiles checkout to a path in the
//! home directory. Pairs whose source is missing from the checkout are
//! skipped with a warning so no dangling links are created. Pairs that
//! already point at their source are left alone, so a re-run makes no new
//! backups.

pub mod symlink;

pub use symlink::{backup_path, create_symlink, create_symlink_on, entry_exists, LinkOutcome};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::Result;
use crate::runner::StageReport;

/// A file or directory in the repo linked into the home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkPair {
    /// Path relative to the repo root.
    pub source: PathBuf,
    /// Path relative to the home directory.
    pub target: PathBuf,
}

impl LinkPair {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: PathBuf::from(source),
            target: PathBuf::from(target),
        }
    }

    /// Absolute source path.
    pub fn source_in(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(&self.source)
    }

    /// Absolute link path.
    pub fn target_in(&self, home: &Path) -> PathBuf {
        home.join(&self.target)
    }
}

/// The default link list.
pub fn builtin_links() -> Vec<LinkPair> {
    vec![
        LinkPair::new("zsh/.zshrc", ".zshrc"),
        LinkPair::new("tmux/.tmux.conf", ".tmux.conf"),
        LinkPair::new("git/.gitconfig", ".gitconfig"),
        LinkPair::new("starship/starship.toml", ".config/starship.toml"),
        LinkPair::new("nvim", ".config/nvim"),
    ]
}

/// State of one link, for `dotstrap status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LinkState {
    /// The link points at the repo source.
    Linked,
    /// The source is not in the repo.
    NoSource,
    /// Nothing at the link path yet.
    Missing,
    /// Something else occupies the link path.
    Conflict { found: String },
}

/// A link pair with its resolved paths and state.
#[derive(Debug, Clone, Serialize)]
pub struct LinkStatus {
    pub source: PathBuf,
    pub target: PathBuf,
    pub state: LinkState,
}

/// Inspect a pair without changing anything.
pub fn link_state(pair: &LinkPair, settings: &Settings) -> LinkState {
    let source = pair.source_in(&settings.repo_root);
    let target = pair.target_in(&settings.home);

    if !entry_exists(&source) {
        return LinkState::NoSource;
    }
    let Ok(metadata) = fs::symlink_metadata(&target) else {
        return LinkState::Missing;
    };
    if metadata.file_type().is_symlink() {
        match fs::read_link(&target) {
            Ok(points_to) if points_to == source => LinkState::Linked,
            Ok(points_to) => LinkState::Conflict {
                found: format!("symlink to {}", points_to.display()),
            },
            Err(e) => LinkState::Conflict {
                found: e.to_string(),
            },
        }
    } else if metadata.is_dir() {
        LinkState::Conflict {
            found: "directory".to_string(),
        }
    } else {
        LinkState::Conflict {
            found: "file".to_string(),
        }
    }
}

/// States of every configured pair.
pub fn link_statuses(settings: &Settings) -> Vec<LinkStatus> {
    settings
        .links
        .iter()
        .map(|pair| LinkStatus {
            source: pair.source_in(&settings.repo_root),
            target: pair.target_in(&settings.home),
            state: link_state(pair, settings),
        })
        .collect()
}

/// Run the symlink stage.
///
/// In a dry run the links are reported but the filesystem is not touched.
pub fn link_all(settings: &Settings, dry_run: bool) -> Result<StageReport> {
    let mut report = StageReport::new();

    for pair in &settings.links {
        let name = pair.target.display().to_string();
        let source = pair.source_in(&settings.repo_root);
        let target = pair.target_in(&settings.home);

        if !entry_exists(&source) {
            tracing::warn!("Skipping {}: {} not found", name, source.display());
            report.warned(&name, format!("{} not found in repo", pair.source.display()));
            continue;
        }
        if link_state(pair, settings) == LinkState::Linked {
            report.skipped(&name, "already linked");
            continue;
        }
        if dry_run {
            println!("  [dry-run] link {} -> {}", target.display(), source.display());
            report.done(&name, format!("would link to {}", source.display()));
            continue;
        }

        let outcome = create_symlink(&source, &target)?;
        let detail = match outcome.backup {
            Some(backup) => format!("linked, previous saved as {}", backup.display()),
            None => "linked".to_string(),
        };
        report.done(&name, detail);
    }

    Ok(report)
}
