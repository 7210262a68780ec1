//! System package installation.
//!
//! # Modules
//!
//! - [`manager`] - The [`PackageManager`] strategy and its command lines
//! - [`select`] - Ordered probing for the manager used by a run
//! - [`installer`] - The idempotent package installer stage

pub mod installer;
pub mod manager;
pub mod select;

pub use installer::{install_tools, tool_presence, tool_statuses};
pub use manager::{ManagerKind, PackageManager, SystemPackageManager};
pub use select::{select_manager, HOMEBREW_INSTALL};
