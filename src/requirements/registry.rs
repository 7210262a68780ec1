//! Tool descriptors.
//!
//! A [`ToolDescriptor`] names a command-line tool, the binaries that prove it
//! is installed, and the package that provides it under each manager. The
//! built-in list can be replaced wholesale by the `tools` key of the config
//! file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detection::SupportedOs;
use crate::packages::ManagerKind;

/// A tool the package installer makes sure exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolDescriptor {
    /// Tool name, also the default binary and package name.
    pub name: String,

    /// Binaries checked on PATH. Empty means just `name`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binaries: Vec<String>,

    /// Package names that differ from `name`, per manager.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<ManagerKind, String>,

    /// Platforms the tool is installed on. Empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<SupportedOs>,
}

impl ToolDescriptor {
    /// A tool whose binary and package share its name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            binaries: Vec::new(),
            packages: BTreeMap::new(),
            platforms: Vec::new(),
        }
    }

    /// Accept any of these binaries as proof of installation.
    pub fn with_binaries(mut self, binaries: &[&str]) -> Self {
        self.binaries = binaries.iter().map(|b| b.to_string()).collect();
        self
    }

    /// Use a different package name under one manager.
    pub fn with_package(mut self, kind: ManagerKind, package: &str) -> Self {
        self.packages.insert(kind, package.to_string());
        self
    }

    /// Restrict the tool to a single platform.
    pub fn only_on(mut self, os: SupportedOs) -> Self {
        self.platforms = vec![os];
        self
    }

    /// Binaries to look for on PATH.
    pub fn binaries(&self) -> Vec<&str> {
        if self.binaries.is_empty() {
            vec![self.name.as_str()]
        } else {
            self.binaries.iter().map(String::as_str).collect()
        }
    }

    /// Package name for a manager.
    pub fn package_for(&self, kind: ManagerKind) -> &str {
        self.packages
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    /// Whether the tool is installed on this platform.
    pub fn applies_to(&self, os: SupportedOs) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&os)
    }
}

/// The default tool list.
///
/// On Linux, Go and Neovim come from the toolchain stage instead.
pub fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("git"),
        ToolDescriptor::new("curl"),
        ToolDescriptor::new("wget"),
        ToolDescriptor::new("zsh"),
        ToolDescriptor::new("tmux"),
        ToolDescriptor::new("fzf"),
        ToolDescriptor::new("ripgrep").with_binaries(&["rg"]),
        ToolDescriptor::new("fd")
            .with_binaries(&["fd", "fdfind"])
            .with_package(ManagerKind::Apt, "fd-find")
            .with_package(ManagerKind::Dnf, "fd-find"),
        ToolDescriptor::new("bat").with_binaries(&["bat", "batcat"]),
        ToolDescriptor::new("jq"),
        ToolDescriptor::new("tree"),
        ToolDescriptor::new("unzip"),
        ToolDescriptor::new("go").only_on(SupportedOs::MacOS),
        ToolDescriptor::new("neovim")
            .with_binaries(&["nvim"])
            .only_on(SupportedOs::MacOS),
    ]
}
