//! Stage 09: dotfiles deployment.
//!
//! Symlinks the tracked dotfiles from `~/.dotfiles` into the home directory
//! and marks the bundled `fc-*` plugin scripts executable.

use std::fs;
use std::path::Path;

use anyhow::Result;

use super::{Stage, StageContext};

/// Files symlinked from the dotfiles directory into `$HOME`.
const DOTFILES: &[&str] = &[".zshrc", ".vimrc", ".gitignore_global"];

/// Directory (relative to home) holding the tracked dotfiles.
const SOURCE_DIR: &str = ".dotfiles";

pub struct DotfilesDeployment;

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

impl Stage for DotfilesDeployment {
    fn ordinal(&self) -> &'static str {
        "09"
    }

    fn name(&self) -> &'static str {
        "dotfiles-deployment"
    }

    fn is_complete(&self, ctx: &StageContext) -> bool {
        DOTFILES.iter().all(|name| is_symlink(&ctx.home.join(name)))
    }

    fn run(&self, ctx: &StageContext) -> Result<()> {
        let source_dir = ctx.home.join(SOURCE_DIR);
        ctx.log.info("Deploying dotfiles");
        for name in DOTFILES {
            let target = ctx.home.join(name);
            if is_symlink(&target) {
                ctx.log.debug(&format!("{name} already linked"));
                continue;
            }
            ctx.effects.symlink(&source_dir.join(name), &target)?;
        }

        // Plugin scripts ship without the executable bit set.
        let bin_dir = source_dir.join("bin");
        if let Ok(entries) = fs::read_dir(&bin_dir) {
            let mut scripts: Vec<_> = entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("fc-"))
                })
                .collect();
            scripts.sort();
            for script in scripts {
                ctx.effects.make_executable(&script)?;
            }
        }
        Ok(())
    }
}
