//! Tool descriptors and presence detection.
//!
//! # Modules
//!
//! - [`probe`] - PATH lookups through [`ToolLocator`]
//! - [`registry`] - Tool descriptors and the built-in tool list
//! - [`status`] - The tri-state [`Presence`] result

pub mod probe;
pub mod registry;
pub mod status;

pub use probe::ToolLocator;
pub use registry::{builtin_tools, ToolDescriptor};
pub use status::{Presence, ToolStatus};
