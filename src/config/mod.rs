//! Configuration loading and settings resolution.
//!
//! # Modules
//!
//! - [`schema`] - The `dotstrap.yml` file format
//! - [`loader`] - Locating and parsing the config file
//! - [`settings`] - Layering defaults, file, environment and CLI into [`Settings`]

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{DotstrapConfig, GoConfig, ToggleConfig};
pub use settings::{GoSettings, Settings};
