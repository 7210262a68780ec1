//! Symlink creation with date-stamped backups.
//!
//! Whatever occupies the link path (file, directory, symlink, even a broken
//! one) is renamed to `<link>.backup.YYYYMMDD` before the new link is made.
//! A second run on the same day replaces that backup, so the original is
//! only kept by the first run of each day.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::error::Result;

/// What [`create_symlink`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    /// Where the previous entry was moved, if there was one.
    pub backup: Option<PathBuf>,
    /// Whether an older backup with the same name was discarded.
    pub replaced_backup: bool,
}

/// Backup name for a link path on a given day.
pub fn backup_path(link_name: &Path, date: NaiveDate) -> PathBuf {
    let mut name = OsString::from(link_name.as_os_str());
    name.push(format!(".backup.{}", date.format("%Y%m%d")));
    PathBuf::from(name)
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Make `link_name` a symlink to `target`, backing up what was there.
pub fn create_symlink(target: &Path, link_name: &Path) -> Result<LinkOutcome> {
    create_symlink_on(target, link_name, today())
}

/// [`create_symlink`] with an explicit backup date.
pub fn create_symlink_on(target: &Path, link_name: &Path, date: NaiveDate) -> Result<LinkOutcome> {
    if let Some(parent) = link_name.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut outcome = LinkOutcome {
        backup: None,
        replaced_backup: false,
    };

    if entry_exists(link_name) {
        let backup = backup_path(link_name, date);
        if entry_exists(&backup) {
            tracing::warn!(
                "Replacing existing backup {}; its previous content is lost",
                backup.display()
            );
            remove_entry(&backup)?;
            outcome.replaced_backup = true;
        }
        tracing::debug!("Backing up {} to {}", link_name.display(), backup.display());
        fs::rename(link_name, &backup)?;
        outcome.backup = Some(backup);
    }

    replace_with_symlink(target, link_name)?;
    Ok(outcome)
}

/// Whether anything, including a dangling symlink, exists at `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn remove_entry(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Create the symlink beside `link_name` and rename it into place, so the
/// path never points anywhere else in between.
fn replace_with_symlink(target: &Path, link_name: &Path) -> io::Result<()> {
    let mut staging = OsString::from(link_name.as_os_str());
    staging.push(".dotstrap-tmp");
    let staging = PathBuf::from(staging);

    if entry_exists(&staging) {
        remove_entry(&staging)?;
    }
    symlink(target, &staging)?;
    fs::rename(&staging, link_name)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are only supported on Unix",
    ))
}
