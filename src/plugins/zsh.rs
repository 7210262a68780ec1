//! oh-my-zsh and its plugins.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::runner::{StageContext, StageReport};
use crate::shell::{quote, quote_path};

/// Upstream oh-my-zsh install script.
pub const OH_MY_ZSH_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// A zsh plugin cloned into `$ZSH_CUSTOM/plugins/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginRepo {
    pub name: String,
    pub url: String,
}

impl PluginRepo {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// The default plugin list.
pub fn builtin_plugins() -> Vec<PluginRepo> {
    vec![
        PluginRepo::new(
            "zsh-autosuggestions",
            "https://github.com/zsh-users/zsh-autosuggestions",
        ),
        PluginRepo::new(
            "zsh-syntax-highlighting",
            "https://github.com/zsh-users/zsh-syntax-highlighting",
        ),
        PluginRepo::new(
            "zsh-completions",
            "https://github.com/zsh-users/zsh-completions",
        ),
    ]
}

/// Install oh-my-zsh unless its directory exists.
///
/// The installer must neither start a new shell nor change the login shell,
/// and an existing `.zshrc` is kept since the symlink stage manages it.
pub fn install_oh_my_zsh(ctx: &StageContext<'_>, report: &mut StageReport) -> Result<()> {
    let dir = &ctx.settings.oh_my_zsh_dir;
    if dir.is_dir() {
        report.skipped("oh-my-zsh", "already installed");
        return Ok(());
    }

    let command = format!(
        "ZSH={} RUNZSH=no CHSH=no KEEP_ZSHRC=yes sh -c \"$(curl -fsSL {})\" \"\" --unattended --keep-zshrc",
        quote_path(dir),
        OH_MY_ZSH_INSTALL_URL
    );
    tracing::info!("Installing oh-my-zsh into {}", dir.display());
    ctx.runner.run_checked(&command)?;
    report.done("oh-my-zsh", format!("installed to {}", dir.display()));
    Ok(())
}

/// Clone each plugin whose directory is missing.
pub fn install_plugins(ctx: &StageContext<'_>, report: &mut StageReport) -> Result<()> {
    let plugins_dir = ctx.settings.zsh_custom.join("plugins");
    for plugin in &ctx.settings.zsh_plugins {
        let dest = plugins_dir.join(&plugin.name);
        if dest.exists() {
            report.skipped(&plugin.name, "already cloned");
            continue;
        }
        ctx.runner.run_checked(&format!(
            "git clone --depth=1 {} {}",
            quote(&plugin.url),
            quote_path(&dest)
        ))?;
        report.done(&plugin.name, format!("cloned to {}", dest.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::test_support::Fixture;
    use crate::runner::ItemStatus;
    use std::fs;

    #[test]
    fn existing_oh_my_zsh_is_left_alone() {
        let fixture = Fixture::linux("x86_64");
        fs::create_dir_all(&fixture.settings.oh_my_zsh_dir).unwrap();
        let mut report = StageReport::new();

        install_oh_my_zsh(&fixture.context(), &mut report).unwrap();

        assert!(fixture.runner.commands().is_empty());
        assert_eq!(report.get("oh-my-zsh").unwrap().status, ItemStatus::Skipped);
    }

    #[test]
    fn oh_my_zsh_installer_runs_unattended() {
        let fixture = Fixture::linux("x86_64");

        install_oh_my_zsh(&fixture.context(), &mut StageReport::new()).unwrap();

        let commands = fixture.runner.commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].contains("RUNZSH=no CHSH=no"));
        assert!(commands[0].contains("--unattended --keep-zshrc"));
        assert!(commands[0].contains(OH_MY_ZSH_INSTALL_URL));
    }

    #[test]
    fn installer_failure_propagates() {
        let fixture = Fixture::linux("x86_64");
        fixture.runner.fail_on("ohmyzsh");

        assert!(install_oh_my_zsh(&fixture.context(), &mut StageReport::new()).is_err());
    }

    #[test]
    fn clones_only_missing_plugins() {
        let fixture = Fixture::linux("x86_64");
        let plugins_dir = fixture.settings.zsh_custom.join("plugins");
        fs::create_dir_all(plugins_dir.join("zsh-autosuggestions")).unwrap();
        let mut report = StageReport::new();

        install_plugins(&fixture.context(), &mut report).unwrap();

        assert_eq!(
            fixture.runner.commands(),
            vec![
                format!(
                    "git clone --depth=1 https://github.com/zsh-users/zsh-syntax-highlighting {}",
                    plugins_dir.join("zsh-syntax-highlighting").display()
                ),
                format!(
                    "git clone --depth=1 https://github.com/zsh-users/zsh-completions {}",
                    plugins_dir.join("zsh-completions").display()
                ),
            ]
        );
        assert_eq!(report.count(ItemStatus::Skipped), 1);
        assert_eq!(report.count(ItemStatus::Done), 2);
    }

    #[test]
    fn plugin_repo_from_yaml() {
        let plugin: PluginRepo =
            serde_yaml::from_str("name: fast-syntax-highlighting\nurl: https://example.test/fsh")
                .unwrap();
        assert_eq!(plugin.name, "fast-syntax-highlighting");
    }
}
