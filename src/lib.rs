//! dotstrap - Bootstrap a development machine from a dotfiles checkout.
//!
//! A run detects the host, picks the system package manager, installs a
//! fixed set of command-line tools, sets up the Go and Neovim toolchains on
//! Linux, installs oh-my-zsh with its plugins, and finally links the
//! dotfiles into the home directory. Every step checks whether its work is
//! already done, so re-running is safe.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `dotstrap.yml` loading and settings resolution
//! - [`detection`] - Host OS and CPU architecture
//! - [`error`] - Error types and result aliases
//! - [`links`] - Dotfile symlinks with dated backups
//! - [`packages`] - Package manager selection and tool installation
//! - [`plugins`] - oh-my-zsh, zsh plugins, starship and tpm
//! - [`requirements`] - Tool descriptors and presence probes
//! - [`runner`] - Stage orchestration
//! - [`shell`] - Shell command execution
//! - [`toolchain`] - Go and Neovim release installs
//! - [`ui`] - Spinners, tables and terminal output
//!
//! # Example
//!
//! ```
//! use dotstrap::detection::{Os, SupportedOs};
//! use dotstrap::packages::ManagerKind;
//!
//! let os = Os::from_uname("Linux").require_supported().unwrap();
//! assert_eq!(os, SupportedOs::Linux);
//! assert_eq!(ManagerKind::Apt.install_command("zsh"),
//!     "DEBIAN_FRONTEND=noninteractive apt-get install -y zsh");
//! ```
//!
//! For full runs against recording fakes, see the integration tests.

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod links;
pub mod packages;
pub mod plugins;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod toolchain;
pub mod ui;

pub use error::{DotstrapError, Result};
