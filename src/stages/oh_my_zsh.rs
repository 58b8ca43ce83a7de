//! Stage 05: Oh My Zsh installation, including the shell plugins the
//! dotfiles expect to be present.

use anyhow::Result;

use super::{Stage, StageContext};

const OH_MY_ZSH_REPO: &str = "https://github.com/ohmyzsh/ohmyzsh.git";

/// Shell plugins cloned into `custom/plugins/`.
const PLUGINS: &[(&str, &str)] = &[
    (
        "zsh-autosuggestions",
        "https://github.com/zsh-users/zsh-autosuggestions.git",
    ),
    (
        "zsh-syntax-highlighting",
        "https://github.com/zsh-users/zsh-syntax-highlighting.git",
    ),
];

pub struct OhMyZshInstallation;

impl Stage for OhMyZshInstallation {
    fn ordinal(&self) -> &'static str {
        "05"
    }

    fn name(&self) -> &'static str {
        "oh-my-zsh-installation"
    }

    fn is_complete(&self, ctx: &StageContext) -> bool {
        ctx.home.join(".oh-my-zsh").is_dir()
    }

    fn run(&self, ctx: &StageContext) -> Result<()> {
        let root = ctx.home.join(".oh-my-zsh");
        let root_str = root.display().to_string();
        ctx.log.info("Installing Oh My Zsh");
        ctx.effects
            .run_tool("git", &["clone", "--depth", "1", OH_MY_ZSH_REPO, &root_str])?;

        let plugins_dir = root.join("custom").join("plugins");
        for (name, repo) in PLUGINS {
            let target = plugins_dir.join(name);
            if target.is_dir() {
                ctx.log.debug(&format!("plugin {name} already present"));
                continue;
            }
            let target_str = target.display().to_string();
            ctx.effects
                .run_tool("git", &["clone", "--depth", "1", repo, &target_str])?;
        }
        Ok(())
    }
}
