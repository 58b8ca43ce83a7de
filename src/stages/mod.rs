//! Installation stages and the pipeline executor.
//!
//! Stages run strictly sequentially in ascending ordinal order. Each stage
//! first consults its own on-disk idempotency evidence and is skipped with an
//! "already installed" line when the evidence says it completed (unless
//! `--force` is set); otherwise it performs its work exclusively through the
//! [`Effects`] interceptor, so a dry run emits the full ordered simulation
//! without touching anything. The first stage failure aborts the remainder;
//! completed stages stay as they are.
//!
//! Stage ordinals follow the original provisioning scripts, gaps included.

pub mod cleanup;
pub mod dotfiles;
pub mod git_config;
pub mod homebrew;
pub mod oh_my_zsh;

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::effects::Effects;
use crate::error::CircusError;
use crate::logging::Log;

/// Everything a stage may consult or mutate through.
pub struct StageContext<'a> {
    pub config: &'a Config,
    pub effects: &'a Effects,
    pub home: &'a Path,
    pub log: &'a dyn Log,
}

/// One ordinal step of the installation pipeline.
pub trait Stage: Send + Sync {
    /// Two-digit ordinal identifier, e.g. `"03"`.
    fn ordinal(&self) -> &'static str;
    /// Stage name as it appears in logs, e.g. `"homebrew-installation"`.
    fn name(&self) -> &'static str;
    /// Whether on-disk evidence says this stage already completed.
    fn is_complete(&self, ctx: &StageContext) -> bool;
    /// Perform the stage's work. Mutations go through `ctx.effects` only.
    ///
    /// # Errors
    ///
    /// Returns an error when a mutation or tool invocation fails; the
    /// pipeline aborts on the first such error.
    fn run(&self, ctx: &StageContext) -> Result<()>;
}

/// The full pipeline in ordinal order.
#[must_use]
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(homebrew::HomebrewInstallation),
        Box::new(oh_my_zsh::OhMyZshInstallation),
        Box::new(dotfiles::DotfilesDeployment),
        Box::new(git_config::GitConfiguration),
        Box::new(cleanup::Cleanup),
    ]
}

/// Run the pipeline, aborting on the first stage failure.
///
/// # Errors
///
/// Returns [`CircusError::Stage`] naming the first failing stage.
pub fn run_pipeline(
    stages: &[Box<dyn Stage>],
    ctx: &StageContext,
) -> Result<(), CircusError> {
    for stage in stages {
        ctx.log
            .stage(&format!("Stage {}: {}", stage.ordinal(), stage.name()));
        if !ctx.config.force && stage.is_complete(ctx) {
            ctx.log
                .info(&format!("{} already installed/configured", stage.name()));
            continue;
        }
        stage.run(ctx).map_err(|source| CircusError::Stage {
            ordinal: stage.ordinal().to_string(),
            name: stage.name().to_string(),
            source,
        })?;
    }
    Ok(())
}
