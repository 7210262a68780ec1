//! Operating system classification.
//!
//! The kernel name reported by `uname -s` selects one of two installation
//! paths. Everything else is unsupported and stops the run before any
//! installation step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DotstrapError, Result};

/// Operating system as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Os {
    /// Darwin kernel.
    MacOS,
    /// Linux kernel.
    Linux,
    /// Any other kernel name, kept verbatim for the diagnostic.
    Unsupported(String),
}

/// A platform dotstrap knows how to bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SupportedOs {
    #[serde(rename = "macos")]
    MacOS,
    #[serde(rename = "linux")]
    Linux,
}

impl Os {
    /// Classify a kernel name (`uname -s` output).
    pub fn from_uname(kernel: &str) -> Self {
        match kernel.trim() {
            "Darwin" => Os::MacOS,
            "Linux" => Os::Linux,
            other => Os::Unsupported(other.to_string()),
        }
    }

    /// Narrow to a supported platform or fail with [`DotstrapError::UnsupportedOs`].
    pub fn require_supported(&self) -> Result<SupportedOs> {
        match self {
            Os::MacOS => Ok(SupportedOs::MacOS),
            Os::Linux => Ok(SupportedOs::Linux),
            Os::Unsupported(name) => Err(DotstrapError::UnsupportedOs {
                name: if name.is_empty() {
                    "<unknown>".to_string()
                } else {
                    name.clone()
                },
            }),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::MacOS => write!(f, "macOS"),
            Os::Linux => write!(f, "Linux"),
            Os::Unsupported(name) => write!(f, "{} (unsupported)", name),
        }
    }
}

impl fmt::Display for SupportedOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportedOs::MacOS => write!(f, "macOS"),
            SupportedOs::Linux => write!(f, "Linux"),
        }
    }
}
