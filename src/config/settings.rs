//! Resolved run settings.
//!
//! [`Settings`] is built once at startup from, in increasing priority:
//! built-in defaults, the config file, the environment (`HOME`,
//! `GO_VERSION`, `ZSH_CUSTOM`) and the command line. Every component reads
//! from it instead of consulting the environment on its own.

use std::path::{Component, Path, PathBuf};

use regex::Regex;

use crate::config::schema::DotstrapConfig;
use crate::error::{DotstrapError, Result};
use crate::links::{builtin_links, LinkPair};
use crate::plugins::{builtin_plugins, PluginRepo};
use crate::requirements::{builtin_tools, ToolDescriptor};
use crate::toolchain::DEFAULT_GO_VERSION;

/// Go toolchain settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoSettings {
    pub version: String,
    /// Directory that receives the `go/` tree.
    pub install_parent: PathBuf,
    pub verify_checksum: bool,
}

impl GoSettings {
    /// The `GOROOT` the installer produces.
    pub fn go_root(&self) -> PathBuf {
        self.install_parent.join("go")
    }
}

/// Everything a run needs to know, resolved once.
#[derive(Debug, Clone)]
pub struct Settings {
    pub home: PathBuf,
    /// Root of the dotfiles checkout.
    pub repo_root: PathBuf,
    pub oh_my_zsh_dir: PathBuf,
    pub zsh_custom: PathBuf,
    pub local_bin: PathBuf,
    pub local_share: PathBuf,
    /// Scratch space for downloaded archives.
    pub cache_dir: PathBuf,
    /// Running as root, so no `sudo` is needed.
    pub elevated: bool,
    pub go: GoSettings,
    pub install_editor: bool,
    pub install_starship: bool,
    pub install_tpm: bool,
    pub tools: Vec<ToolDescriptor>,
    pub links: Vec<LinkPair>,
    pub zsh_plugins: Vec<PluginRepo>,
}

impl Settings {
    /// Built-in defaults for a home directory and repo checkout.
    pub fn defaults(home: PathBuf, repo_root: PathBuf) -> Self {
        let oh_my_zsh_dir = home.join(".oh-my-zsh");
        Self {
            zsh_custom: oh_my_zsh_dir.join("custom"),
            oh_my_zsh_dir,
            local_bin: home.join(".local/bin"),
            local_share: home.join(".local/share"),
            cache_dir: home.join(".cache/dotstrap"),
            elevated: false,
            go: GoSettings {
                version: DEFAULT_GO_VERSION.to_string(),
                install_parent: PathBuf::from("/usr/local"),
                verify_checksum: true,
            },
            install_editor: true,
            install_starship: true,
            install_tpm: true,
            tools: builtin_tools(),
            links: builtin_links(),
            zsh_plugins: builtin_plugins(),
            home,
            repo_root,
        }
    }

    /// Resolve from the process environment.
    pub fn resolve(config: DotstrapConfig, repo_root: &Path) -> Result<Self> {
        Self::resolve_with_env(config, repo_root, |key| std::env::var(key))
    }

    /// Resolve with a custom env var lookup (for testing).
    pub fn resolve_with_env<F>(config: DotstrapConfig, repo_root: &Path, env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let var = |key: &str| env_fn(key).ok().filter(|v| !v.trim().is_empty());

        let home = var("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(DotstrapError::HomeNotFound)?;
        let mut settings = Self::defaults(home, repo_root.to_path_buf());

        // Config file layer.
        if let Some(tools) = config.tools {
            settings.tools = tools;
        }
        if let Some(links) = config.links {
            settings.links = links;
        }
        if let Some(plugins) = config.zsh_plugins {
            settings.zsh_plugins = plugins;
        }
        if let Some(version) = config.go.version {
            settings.go.version = version;
        }
        if let Some(dir) = config.go.install_dir {
            settings.go.install_parent = dir;
        }
        if let Some(verify) = config.go.verify_checksum {
            settings.go.verify_checksum = verify;
        }
        if let Some(enabled) = config.editor.enabled {
            settings.install_editor = enabled;
        }
        if let Some(enabled) = config.starship.enabled {
            settings.install_starship = enabled;
        }
        if let Some(enabled) = config.tpm.enabled {
            settings.install_tpm = enabled;
        }

        // Environment layer.
        if let Some(version) = var("GO_VERSION") {
            settings.go.version = version.trim().to_string();
        }
        if let Some(custom) = var("ZSH_CUSTOM") {
            settings.zsh_custom = PathBuf::from(custom);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Record whether the process runs as root.
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Where tpm is cloned.
    pub fn tpm_dir(&self) -> PathBuf {
        self.home.join(".tmux/plugins/tpm")
    }

    /// Install locations searched in addition to PATH.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        vec![self.go.go_root().join("bin"), self.local_bin.clone()]
    }

    fn validate(&self) -> Result<()> {
        let version_re = Regex::new(r"^\d+\.\d+(\.\d+)?$").map_err(anyhow::Error::from)?;
        if !version_re.is_match(&self.go.version) {
            return Err(DotstrapError::ConfigValidationError {
                message: format!(
                    "Go version '{}' is not of the form 1.23 or 1.23.4",
                    self.go.version
                ),
            });
        }

        if let Some(tool) = self.tools.iter().find(|t| t.name.trim().is_empty()) {
            return Err(DotstrapError::ConfigValidationError {
                message: format!("tool with empty name: {:?}", tool),
            });
        }

        for pair in &self.links {
            if !stays_inside(&pair.target) || !stays_inside(&pair.source) {
                return Err(DotstrapError::ConfigValidationError {
                    message: format!(
                        "link {} -> {} must use relative paths without '..'",
                        pair.source.display(),
                        pair.target.display()
                    ),
                });
            }
        }

        if let Some(plugin) = self
            .zsh_plugins
            .iter()
            .find(|p| !is_single_component(&p.name))
        {
            return Err(DotstrapError::ConfigValidationError {
                message: format!("invalid zsh plugin name '{}'", plugin.name),
            });
        }

        Ok(())
    }
}

/// A relative path with no `..` component.
fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// A plain directory name: not empty, `.` or `..`, and no separator.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::GoConfig;
    use std::collections::HashMap;

    fn make_env(vars: &[(&str, &str)]) -> impl Fn(&str) -> std::result::Result<String, std::env::VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }

    fn resolve(config: DotstrapConfig, vars: &[(&str, &str)]) -> Result<Settings> {
        Settings::resolve_with_env(config, Path::new("/repo"), make_env(vars))
    }

    #[test]
    fn defaults_derive_from_home() {
        let settings = resolve(DotstrapConfig::default(), &[("HOME", "/home/me")]).unwrap();

        assert_eq!(settings.home, PathBuf::from("/home/me"));
        assert_eq!(settings.repo_root, PathBuf::from("/repo"));
        assert_eq!(settings.zsh_custom, PathBuf::from("/home/me/.oh-my-zsh/custom"));
        assert_eq!(settings.local_bin, PathBuf::from("/home/me/.local/bin"));
        assert_eq!(settings.tpm_dir(), PathBuf::from("/home/me/.tmux/plugins/tpm"));
        assert_eq!(settings.go.version, DEFAULT_GO_VERSION);
        assert_eq!(settings.go.go_root(), PathBuf::from("/usr/local/go"));
        assert!(settings.go.verify_checksum);
        assert_eq!(settings.links.len(), 5);
    }

    #[test]
    fn config_overrides_defaults() {
        let config = DotstrapConfig {
            go: GoConfig {
                version: Some("1.22.5".to_string()),
                install_dir: Some(PathBuf::from("/opt")),
                verify_checksum: Some(false),
            },
            links: Some(vec![LinkPair::new("zsh/.zshrc", ".zshrc")]),
            ..Default::default()
        };

        let settings = resolve(config, &[("HOME", "/home/me")]).unwrap();

        assert_eq!(settings.go.version, "1.22.5");
        assert_eq!(settings.go.go_root(), PathBuf::from("/opt/go"));
        assert!(!settings.go.verify_checksum);
        assert_eq!(settings.links.len(), 1);
    }

    #[test]
    fn environment_overrides_config() {
        let config = DotstrapConfig {
            go: GoConfig {
                version: Some("1.22.5".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let settings = resolve(
            config,
            &[
                ("HOME", "/home/me"),
                ("GO_VERSION", "1.21.0"),
                ("ZSH_CUSTOM", "/custom/zsh"),
            ],
        )
        .unwrap();

        assert_eq!(settings.go.version, "1.21.0");
        assert_eq!(settings.zsh_custom, PathBuf::from("/custom/zsh"));
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let settings = resolve(
            DotstrapConfig::default(),
            &[("HOME", "/home/me"), ("GO_VERSION", ""), ("ZSH_CUSTOM", " ")],
        )
        .unwrap();

        assert_eq!(settings.go.version, DEFAULT_GO_VERSION);
        assert_eq!(settings.zsh_custom, PathBuf::from("/home/me/.oh-my-zsh/custom"));
    }

    #[test]
    fn malformed_go_version_is_rejected() {
        let err = resolve(
            DotstrapConfig::default(),
            &[("HOME", "/home/me"), ("GO_VERSION", "latest")],
        )
        .unwrap_err();

        assert!(matches!(err, DotstrapError::ConfigValidationError { .. }));
    }

    #[test]
    fn absolute_link_target_is_rejected() {
        let config = DotstrapConfig {
            links: Some(vec![LinkPair::new("zsh/.zshrc", "/etc/zshrc")]),
            ..Default::default()
        };

        let err = resolve(config, &[("HOME", "/home/me")]).unwrap_err();

        assert!(err.to_string().contains("relative"));
    }

    #[test]
    fn parent_dir_in_link_paths_is_rejected() {
        for pair in [
            LinkPair::new("zsh/.zshrc", "../.zshrc"),
            LinkPair::new("../outside/.zshrc", ".zshrc"),
        ] {
            let config = DotstrapConfig {
                links: Some(vec![pair]),
                ..Default::default()
            };

            let err = resolve(config, &[("HOME", "/home/me")]).unwrap_err();

            assert!(matches!(err, DotstrapError::ConfigValidationError { .. }));
        }
    }

    #[test]
    fn plugin_names_must_be_plain_directory_names() {
        for name in ["", ".", "..", "a/b", "plugins/"] {
            let config = DotstrapConfig {
                zsh_plugins: Some(vec![PluginRepo::new(name, "https://example.com/p.git")]),
                ..Default::default()
            };

            let err = resolve(config, &[("HOME", "/home/me")]).unwrap_err();

            assert!(err.to_string().contains("zsh plugin name"), "accepted {:?}", name);
        }
    }

    #[test]
    fn search_dirs_cover_install_locations() {
        let settings = Settings::defaults(PathBuf::from("/home/me"), PathBuf::from("/repo"));
        assert_eq!(
            settings.search_dirs(),
            vec![
                PathBuf::from("/usr/local/go/bin"),
                PathBuf::from("/home/me/.local/bin")
            ]
        );
    }
}
