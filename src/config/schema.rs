//! Configuration file schema.
//!
//! Every key is optional. A missing key keeps the built-in default, and a
//! list key (`tools`, `links`, `zsh_plugins`) replaces the whole default list.
//!
//! ```yaml
//! go:
//!   version: "1.22.5"
//!   verify_checksum: true
//! editor:
//!   enabled: false
//! links:
//!   - source: zsh/.zshrc
//!     target: .zshrc
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::links::LinkPair;
use crate::plugins::PluginRepo;
use crate::requirements::ToolDescriptor;

/// Contents of `dotstrap.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotstrapConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDescriptor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkPair>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zsh_plugins: Option<Vec<PluginRepo>>,

    pub go: GoConfig,

    pub editor: ToggleConfig,

    pub starship: ToggleConfig,

    pub tpm: ToggleConfig,
}

/// The `go` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoConfig {
    /// Release to install, e.g. `1.23.4`.
    pub version: Option<String>,

    /// Directory that receives the `go/` tree.
    pub install_dir: Option<PathBuf>,

    /// Verify the archive against the published SHA-256.
    pub verify_checksum: Option<bool>,
}

/// A section that only switches an installer on or off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToggleConfig {
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: DotstrapConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, DotstrapConfig::default());
    }

    #[test]
    fn parses_all_sections() {
        let yaml = r#"
tools:
  - name: htop
links:
  - source: git/.gitconfig
    target: .gitconfig
zsh_plugins:
  - name: zsh-autosuggestions
    url: https://github.com/zsh-users/zsh-autosuggestions
go:
  version: "1.22.5"
  install_dir: /opt
  verify_checksum: false
editor:
  enabled: false
starship:
  enabled: true
tpm:
  enabled: false
"#;
        let config: DotstrapConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.tools.unwrap()[0].name, "htop");
        assert_eq!(config.links.unwrap()[0].target, PathBuf::from(".gitconfig"));
        assert_eq!(config.zsh_plugins.unwrap().len(), 1);
        assert_eq!(config.go.version.as_deref(), Some("1.22.5"));
        assert_eq!(config.go.install_dir, Some(PathBuf::from("/opt")));
        assert_eq!(config.go.verify_checksum, Some(false));
        assert_eq!(config.editor.enabled, Some(false));
        assert_eq!(config.starship.enabled, Some(true));
        assert_eq!(config.tpm.enabled, Some(false));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<DotstrapConfig, _> = serde_yaml::from_str("gopher: true");
        assert!(result.is_err());
    }
}
