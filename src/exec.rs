//! Subprocess execution and external tool resolution.
//!
//! [`Executor`] abstracts blocking subprocess calls so checks, stages, and
//! plugins can be unit-tested against a mock. [`ToolResolver`] maps a logical
//! tool name (`"uname"`, `"brew"`) to a concrete executable path, honoring a
//! per-tool override before falling back to the system `PATH`. The override
//! convention (`<NAME>_CMD` with `-` and `.` mapped to `_`) is a stable
//! interface and the sole supported seam for substituting mock executables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, bail};

use crate::error::CircusError;

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Blocking subprocess executor.
///
/// Every external tool invocation in the engine goes through this trait;
/// tests substitute a mock so no real process is spawned.
pub trait Executor: Send + Sync {
    /// Run a command and return its output. Fails if the command exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run(&self, program: &Path, args: &[&str]) -> Result<ExecResult>;

    /// Run a command, allowing failure (returns the result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be spawned at all.
    fn run_unchecked(&self, program: &Path, args: &[&str]) -> Result<ExecResult>;
}

/// Production [`Executor`] that spawns real subprocesses.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, program: &Path, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {}", program.display()))?;
        let result = ExecResult::from(output);
        if !result.success {
            bail!(
                "{} failed (exit {}): {}",
                program.display(),
                result.code.unwrap_or(-1),
                result.stderr.trim()
            );
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &Path, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {}", program.display()))?;
        Ok(ExecResult::from(output))
    }
}

/// Maps logical tool names to concrete executable paths.
///
/// Holds an explicit key/value snapshot (taken from the process environment
/// at startup, or supplied directly in tests) instead of doing ambient
/// environment lookups, so resolution is deterministic for a given resolver.
#[derive(Debug, Clone, Default)]
pub struct ToolResolver {
    vars: HashMap<String, String>,
}

impl ToolResolver {
    /// Snapshot the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a resolver from an explicit variable map (used by tests).
    #[must_use]
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Add a single override, keyed by [`ToolResolver::override_key`].
    #[must_use]
    pub fn with_override(mut self, tool: &str, path: impl Into<String>) -> Self {
        self.vars.insert(Self::override_key(tool), path.into());
        self
    }

    /// The override variable name for a logical tool name.
    ///
    /// `uname` → `UNAME_CMD`, `xcode-select` → `XCODE_SELECT_CMD`,
    /// `sw_vers` → `SW_VERS_CMD`.
    #[must_use]
    pub fn override_key(tool: &str) -> String {
        let mut key: String = tool
            .chars()
            .map(|c| match c {
                '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        key.push_str("_CMD");
        key
    }

    /// Resolve a logical tool name to an executable path.
    ///
    /// An override, once set, is never silently ignored: if it points to a
    /// path that is not an executable file, resolution fails rather than
    /// falling back to the system lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CircusError::ToolNotFound`] when neither the override nor
    /// the system `PATH` yields a usable executable.
    pub fn resolve(&self, tool: &str) -> Result<PathBuf, CircusError> {
        if let Some(value) = self.vars.get(&Self::override_key(tool)) {
            let path = PathBuf::from(value);
            if is_executable(&path) {
                return Ok(path);
            }
            return Err(CircusError::ToolNotFound(tool.to_string()));
        }
        which::which(tool).map_err(|_| CircusError::ToolNotFound(tool.to_string()))
    }

    /// Whether a tool resolves, without caring about the path.
    #[must_use]
    pub fn is_available(&self, tool: &str) -> bool {
        self.resolve(tool).is_ok()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
