//! Preflight gate: precondition checks evaluated before any stage runs.
//!
//! Checks run exactly once each, in ascending ordinal order. A `SUCCESS` or
//! `WARNING` verdict permits continuation; the first `ERROR` stops the gate
//! immediately and nothing after it executes, neither later checks nor stages.
//! Each check judges its own platform applicability and degrades to a
//! warning when it does not apply, so an inapplicable check never blocks a
//! run.
//!
//! Check ordinals follow the numbering of the original provisioning scripts,
//! gaps included, so log output lines up with the historical install logs.

pub mod environment;
pub mod hardware;
pub mod toolchain;

use std::collections::HashMap;
use std::path::Path;

use crate::config::Config;
use crate::error::CircusError;
use crate::exec::{ExecResult, Executor, ToolResolver};
use crate::logging::Log;

/// Per-check verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Precondition holds.
    Success,
    /// Precondition could not be confirmed; the run continues.
    Warning,
    /// Precondition violated; the run aborts.
    Error,
}

/// A verdict with its human-readable message.
#[derive(Debug)]
pub struct CheckOutcome {
    pub verdict: Verdict,
    pub message: String,
}

impl CheckOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Error,
            message: message.into(),
        }
    }
}

/// Everything a check may consult.
///
/// Checks receive an explicit environment snapshot rather than reading the
/// process environment, so a check's verdict is a pure function of this
/// context.
pub struct CheckContext<'a> {
    pub config: &'a Config,
    pub resolver: &'a ToolResolver,
    pub executor: &'a dyn Executor,
    pub env: &'a HashMap<String, String>,
    pub home: &'a Path,
}

impl CheckContext<'_> {
    /// Resolve a tool and run it, tolerating failure.
    ///
    /// Returns `None` when the tool cannot be resolved or spawned at all;
    /// otherwise the result, which may still carry a non-zero exit.
    #[must_use]
    pub fn tool_output(&self, tool: &str, args: &[&str]) -> Option<ExecResult> {
        let program = self.resolver.resolve(tool).ok()?;
        self.executor.run_unchecked(&program, args).ok()
    }

    /// An environment variable from the snapshot.
    #[must_use]
    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }
}

/// A single preflight check.
pub trait Check: Send + Sync {
    /// Two-digit ordinal identifier, e.g. `"01"`.
    fn ordinal(&self) -> &'static str;
    /// Short name used in log output.
    fn name(&self) -> &'static str;
    /// Evaluate the precondition. Never panics; unexpected conditions map to
    /// a verdict.
    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome;
}

/// The full gate in ordinal order.
#[must_use]
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(environment::MacosPlatform),
        Box::new(environment::NotRoot),
        Box::new(environment::AdminRights),
        Box::new(environment::HomePermissions),
        Box::new(environment::RequiredEnvVars),
        Box::new(environment::ZshShell),
        Box::new(hardware::BatteryLevel),
        Box::new(hardware::WifiAssociation),
        Box::new(toolchain::XcodeCliTools),
        Box::new(toolchain::Homebrew),
        Box::new(toolchain::Dependencies),
        Box::new(toolchain::ExistingInstallation),
    ]
}

/// Run the gate, short-circuiting on the first `ERROR` verdict.
///
/// Successes and warnings are logged and the gate continues; an error stops
/// evaluation and is returned as [`CircusError::Preflight`].
///
/// # Errors
///
/// Returns [`CircusError::Preflight`] naming the first failing check.
pub fn run_gate(
    checks: &[Box<dyn Check>],
    ctx: &CheckContext,
    log: &dyn Log,
) -> Result<(), CircusError> {
    log.stage("Preflight checks");
    for check in checks {
        let outcome = check.evaluate(ctx);
        let line = format!("[{}] {}", check.ordinal(), outcome.message);
        match outcome.verdict {
            Verdict::Success => log.info(&line),
            Verdict::Warning => log.warn(&line),
            Verdict::Error => {
                return Err(CircusError::Preflight {
                    ordinal: check.ordinal().to_string(),
                    message: outcome.message,
                });
            }
        }
    }
    Ok(())
}
