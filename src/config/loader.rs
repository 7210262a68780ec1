//! Configuration file discovery and loading.
//!
//! An explicit `--config` path must exist. Otherwise `dotstrap.yml` at the
//! repo root is used when present, and built-in defaults when not.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DotstrapConfig;
use crate::error::{DotstrapError, Result};

/// Config file name looked up at the repo root.
pub const CONFIG_FILE_NAME: &str = "dotstrap.yml";

/// The config file used for a repo, if any.
pub fn find_config(repo_root: &Path) -> Option<PathBuf> {
    let path = repo_root.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Load a specific config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DotstrapConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DotstrapError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DotstrapError::Io(e)
        }
    })?;
    parse_config(&content, path)
}

/// Parse config YAML, reporting errors against `source_path`.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DotstrapConfig> {
    if content.trim().is_empty() {
        return Ok(DotstrapConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DotstrapError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
pub fn load_config(repo_root: &Path, config_override: Option<&Path>) -> Result<DotstrapConfig> {
    if let Some(path) = config_override {
        tracing::debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }
    match find_config(repo_root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(DotstrapConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_repo_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, DotstrapConfig::default());
    }

    #[test]
    fn repo_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "editor:\n  enabled: false\n").unwrap();

        let config = load_config(temp.path(), None).unwrap();

        assert_eq!(config.editor.enabled, Some(false));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");

        let err = load_config(temp.path(), Some(&path)).unwrap_err();

        assert!(matches!(err, DotstrapError::ConfigNotFound { path: p } if p == path));
    }

    #[test]
    fn explicit_config_wins_over_repo_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "tpm:\n  enabled: false\n").unwrap();
        let other = temp.path().join("other.yml");
        fs::write(&other, "tpm:\n  enabled: true\n").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();

        assert_eq!(config.tpm.enabled, Some(true));
    }

    #[test]
    fn parse_error_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "go: [unclosed").unwrap();

        let err = load_config(temp.path(), None).unwrap_err();

        match err {
            DotstrapError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_config("\n", Path::new("dotstrap.yml")).unwrap();
        assert_eq!(config, DotstrapConfig::default());
    }
}
