//! Stage 10: git configuration.
//!
//! Applies the shared git defaults and records the selected role under the
//! `circus` configuration section, which later runs use as idempotency
//! evidence.

use std::fs;

use anyhow::Result;

use super::{Stage, StageContext};

/// Defaults applied for every role.
const SETTINGS: &[(&str, &str)] = &[
    ("init.defaultBranch", "main"),
    ("pull.rebase", "false"),
    ("core.excludesfile", "~/.gitignore_global"),
];

pub struct GitConfiguration;

impl Stage for GitConfiguration {
    fn ordinal(&self) -> &'static str {
        "10"
    }

    fn name(&self) -> &'static str {
        "git-configuration"
    }

    fn is_complete(&self, ctx: &StageContext) -> bool {
        fs::read_to_string(ctx.home.join(".gitconfig"))
            .map(|s| s.contains("[circus]"))
            .unwrap_or(false)
    }

    fn run(&self, ctx: &StageContext) -> Result<()> {
        ctx.log.info("Configuring git");
        for (key, value) in SETTINGS {
            ctx.effects
                .run_tool("git", &["config", "--global", key, value])?;
        }
        if let Some(role) = ctx.config.role {
            let role_name = role.to_string();
            ctx.effects
                .run_tool("git", &["config", "--global", "circus.role", &role_name])?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Config, Role};
    use crate::effects::Effects;
    use crate::exec::test_helpers::MockExecutor;
    use crate::exec::{Executor, ToolResolver};
    use crate::logging::{BufferedLog, Channel, Log};
    use std::sync::Arc;

    fn dry_ctx_parts(role: Option<Role>) -> (Config, Effects, Arc<BufferedLog>) {
        let log = Arc::new(BufferedLog::new());
        let effects = Effects::new(
            true,
            Arc::clone(&log) as Arc<dyn Log>,
            Arc::new(MockExecutor::default()) as Arc<dyn Executor>,
            ToolResolver::default(),
        );
        (
            Config {
                role,
                ..Config::default()
            },
            effects,
            log,
        )
    }

    #[test]
    fn complete_when_marker_section_present() {
        let home = tempfile::tempdir().unwrap();
        fs::write(
            home.path().join(".gitconfig"),
            "[circus]\n\trole = developer\n",
        )
        .unwrap();
        let (config, effects, log) = dry_ctx_parts(None);
        let home_path = home.path().to_path_buf();
        let ctx = StageContext {
            config: &config,
            effects: &effects,
            home: &home_path,
            log: log.as_ref(),
        };
        assert!(GitConfiguration.is_complete(&ctx));
    }

    #[test]
    fn dry_run_simulates_role_aware_settings() {
        let home = tempfile::tempdir().unwrap();
        let (config, effects, log) = dry_ctx_parts(Some(Role::Work));
        let home_path = home.path().to_path_buf();
        let ctx = StageContext {
            config: &config,
            effects: &effects,
            home: &home_path,
            log: log.as_ref(),
        };
        GitConfiguration.run(&ctx).unwrap();
        let lines = log.messages(Channel::DryRun);
        assert_eq!(lines.len(), SETTINGS.len() + 1);
        assert!(lines.last().unwrap().contains("circus.role work"));
    }

    #[test]
    fn dry_run_without_role_skips_role_setting() {
        let home = tempfile::tempdir().unwrap();
        let (config, effects, log) = dry_ctx_parts(None);
        let home_path = home.path().to_path_buf();
        let ctx = StageContext {
            config: &config,
            effects: &effects,
            home: &home_path,
            log: log.as_ref(),
        };
        GitConfiguration.run(&ctx).unwrap();
        assert_eq!(log.messages(Channel::DryRun).len(), SETTINGS.len());
    }
}
