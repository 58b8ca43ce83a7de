//! The installer driver: preflight gate, confirmation, stage pipeline,
//! state recording.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::CircusError;
use crate::exec::{Executor, SystemExecutor, ToolResolver};
use crate::logging::Log;
use crate::preflight::{self, CheckContext};
use crate::stages::{self, StageContext};
use crate::state::StateStore;

/// Run a full installation with the process environment.
///
/// The environment is snapshotted once here; no component below reads it
/// ambiently.
///
/// # Errors
///
/// Returns the first [`CircusError`] raised by the gate, the pipeline, or
/// the state store.
pub fn run(config: &Config, log: Arc<dyn Log>) -> Result<(), CircusError> {
    let env: HashMap<String, String> = std::env::vars().collect();
    run_with_env(config, log, &env)
}

/// Run a full installation with an explicit environment snapshot.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_env(
    config: &Config,
    log: Arc<dyn Log>,
    env: &HashMap<String, String>,
) -> Result<(), CircusError> {
    let resolver = ToolResolver::from_vars(env.clone());
    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    let home = env
        .get("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or_else(|| CircusError::Preflight {
            ordinal: "05".to_string(),
            message: "Required environment variable HOME is not set.".to_string(),
        })?;

    if config.dry_run {
        log.info("Dry run: no changes will be made");
    }

    let checks = preflight::default_checks();
    let check_ctx = CheckContext {
        config,
        resolver: &resolver,
        executor: executor.as_ref(),
        env,
        home: &home,
    };
    preflight::run_gate(&checks, &check_ctx, log.as_ref())?;

    if !config.dry_run && !config.non_interactive && !confirm(log.as_ref()) {
        log.info("Installation aborted.");
        return Ok(());
    }

    let store = StateStore::new(&home, config.dry_run);
    store.mark_started(config.role).map_err(CircusError::State)?;

    let effects = crate::effects::Effects::new(
        config.dry_run,
        Arc::clone(&log),
        Arc::clone(&executor),
        resolver,
    );
    let stage_ctx = StageContext {
        config,
        effects: &effects,
        home: &home,
        log: log.as_ref(),
    };
    stages::run_pipeline(&stages::default_stages(), &stage_ctx)?;

    store.mark_completed(config.role).map_err(CircusError::State)?;
    if config.dry_run {
        log.info("Dry run complete; nothing was changed");
    } else {
        log.info("Installation complete");
    }
    Ok(())
}

/// Ask for confirmation on stdin. Anything not starting with `y` declines.
fn confirm(log: &dyn Log) -> bool {
    log.info("Proceed with installation? [y/N]");
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().chars().next(), Some('y' | 'Y'))
}
