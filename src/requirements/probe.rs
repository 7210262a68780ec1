//! PATH-based presence checks.
//!
//! A freshly installed tool is often not yet on the PATH of the running
//! process: Homebrew lands in `/opt/homebrew/bin`, the Go toolchain in
//! `/usr/local/go/bin`, user binaries in `~/.local/bin`. The [`ToolLocator`]
//! searches the system PATH augmented with those well-known locations.
//!
//! Lookups hit the filesystem every time, so a tool installed earlier in the
//! same run is found by later checks.
//!
//! # Example
//!
//! ```no_run
//! use dotstrap::requirements::ToolLocator;
//!
//! let locator = ToolLocator::from_env();
//! if let Some(path) = locator.find("git") {
//!     println!("git at {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use super::status::Presence;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On other platforms executability is not tracked in permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command: `which` behavior varies across systems and
/// is sometimes a shell builtin with inconsistent error handling.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Default Homebrew prefix bin directories (absolute, not relative to home).
pub fn homebrew_bin_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(target_os = "macos") {
        if cfg!(target_arch = "aarch64") {
            dirs.push(PathBuf::from("/opt/homebrew/bin"));
        } else {
            dirs.push(PathBuf::from("/usr/local/bin"));
        }
    }
    dirs
}

/// Finds executables on an augmented PATH.
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    path_entries: Vec<PathBuf>,
}

impl ToolLocator {
    /// Search exactly the given directories, in order.
    pub fn new(path_entries: Vec<PathBuf>) -> Self {
        Self { path_entries }
    }

    /// Search the system PATH plus the Homebrew prefix.
    pub fn from_env() -> Self {
        Self::new(parse_system_path()).with_extra(homebrew_bin_dirs())
    }

    /// Append directories that are searched after the existing entries.
    pub fn with_extra(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        for dir in dirs {
            if !self.path_entries.contains(&dir) {
                self.path_entries.push(dir);
            }
        }
        self
    }

    /// Directories searched, in order.
    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }

    /// Locate a single binary.
    pub fn find(&self, binary: &str) -> Option<PathBuf> {
        resolve_tool_path(binary, &self.path_entries)
    }

    /// Whether a binary can be found.
    pub fn has(&self, binary: &str) -> bool {
        self.find(binary).is_some()
    }

    /// Presence of a tool that may be installed under any of several names.
    ///
    /// Returns [`Presence::Unknown`] when there is no PATH to search at all,
    /// since absence cannot be concluded in that case.
    pub fn presence<S: AsRef<str>>(&self, binaries: &[S]) -> Presence {
        if self.path_entries.is_empty() {
            return Presence::Unknown;
        }
        binaries
            .iter()
            .find_map(|b| self.find(b.as_ref()))
            .map(Presence::found_at)
            .unwrap_or(Presence::Absent)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Create a fake binary at a path (creates parent dirs as needed).
    pub(crate) fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    /// Create a non-executable file at a path.
    #[cfg(unix)]
    fn create_non_executable_file(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "not executable").unwrap();
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        create_fake_binary(&dir_a.join("git"));
        create_fake_binary(&dir_b.join("git"));

        let result = resolve_tool_path("git", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_a.join("git")));
    }

    #[test]
    fn resolve_tool_path_returns_none_when_not_found() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        assert!(resolve_tool_path("git", &[dir]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");

        create_non_executable_file(&dir_a.join("tmux"));
        create_fake_binary(&dir_b.join("tmux"));

        let result = resolve_tool_path("tmux", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("tmux")));
    }

    #[test]
    fn resolve_tool_path_ignores_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nvim")).unwrap();

        assert!(resolve_tool_path("nvim", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }

    #[test]
    fn presence_accepts_alternate_binary_names() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("fdfind"));
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);

        let presence = locator.presence(&["fd", "fdfind"]);

        assert_eq!(presence, Presence::found_at(temp.path().join("fdfind")));
    }

    #[test]
    fn presence_is_absent_when_no_name_matches() {
        let temp = TempDir::new().unwrap();
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);

        assert_eq!(locator.presence(&["rg"]), Presence::Absent);
    }

    #[test]
    fn presence_is_unknown_without_path() {
        let locator = ToolLocator::new(vec![]);
        assert_eq!(locator.presence(&["git"]), Presence::Unknown);
    }

    #[test]
    fn with_extra_appends_without_duplicates() {
        let locator = ToolLocator::new(vec![PathBuf::from("/usr/bin")])
            .with_extra(vec![PathBuf::from("/usr/bin"), PathBuf::from("/opt/bin")]);

        assert_eq!(
            locator.path_entries(),
            &[PathBuf::from("/usr/bin"), PathBuf::from("/opt/bin")]
        );
    }

    #[test]
    fn lookups_see_binaries_created_later() {
        let temp = TempDir::new().unwrap();
        let locator = ToolLocator::new(vec![temp.path().to_path_buf()]);
        assert!(!locator.has("starship"));

        create_fake_binary(&temp.path().join("starship"));

        assert!(locator.has("starship"));
    }
}
