//! Error types for dotstrap operations.
//!
//! This module defines [`DotstrapError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Unsupported environments (OS, CPU architecture, package manager) are fatal
//!   and surface before any installation step runs
//! - Failed commands propagate immediately; nothing is rolled back
//! - Use `anyhow::Error` (via `DotstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dotstrap operations.
#[derive(Debug, Error)]
pub enum DotstrapError {
    /// The host operating system is neither macOS nor Linux.
    #[error("Unsupported operating system: {name}")]
    UnsupportedOs { name: String },

    /// The host CPU architecture has no matching release asset.
    #[error("Unsupported architecture '{arch}' for {component}")]
    UnsupportedArch { arch: String, component: String },

    /// None of the known package managers is available.
    #[error("No supported package manager found (tried: {tried})")]
    NoPackageManager { tried: String },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A release artifact could not be downloaded.
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// A downloaded artifact does not match its published checksum.
    #[error("Checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    /// The home directory could not be determined.
    #[error("Could not determine the home directory (set HOME)")]
    HomeNotFound,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for dotstrap operations.
pub type Result<T> = std::result::Result<T, DotstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_os_displays_name() {
        let err = DotstrapError::UnsupportedOs {
            name: "Plan9".into(),
        };
        assert!(err.to_string().contains("Plan9"));
    }

    #[test]
    fn unsupported_arch_displays_arch_and_component() {
        let err = DotstrapError::UnsupportedArch {
            arch: "riscv64".into(),
            component: "go".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("riscv64"));
        assert!(msg.contains("go"));
    }

    #[test]
    fn no_package_manager_lists_candidates() {
        let err = DotstrapError::NoPackageManager {
            tried: "apt, dnf, pacman, zypper".into(),
        };
        assert!(err.to_string().contains("apt, dnf, pacman, zypper"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DotstrapError::ConfigParseError {
            path: PathBuf::from("/repo/dotstrap.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/repo/dotstrap.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = DotstrapError::CommandFailed {
            command: "sudo apt-get install -y zsh".into(),
            code: Some(100),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt-get install"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn checksum_mismatch_displays_both_digests() {
        let err = DotstrapError::ChecksumMismatch {
            url: "https://go.dev/dl/go.tar.gz".into(),
            expected: "aaaa".into(),
            actual: "bbbb".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("aaaa"));
        assert!(msg.contains("bbbb"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DotstrapError = io_err.into();
        assert!(matches!(err, DotstrapError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(DotstrapError::HomeNotFound)
        }
        assert!(returns_error().is_err());
    }
}
