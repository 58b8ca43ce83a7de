//! Domain-specific error types for the provisioning engine.
//!
//! Internal modules return typed errors and the binaries translate them to a
//! process exit status at the outermost boundary; exit codes are never used
//! as an in-process error channel.
//!
//! # Error hierarchy
//!
//! ```text
//! CircusError
//! ├── InvalidArgument   bad or missing flag value, reported before any check runs
//! ├── Preflight         a gate check returned an ERROR verdict
//! ├── ToolNotFound      an external dependency could not be resolved
//! ├── Stage             a mutating stage operation failed
//! └── State             run progress could not be recorded
//! ```

use thiserror::Error;

/// Top-level error type for the installer.
#[derive(Error, Debug)]
pub enum CircusError {
    /// A flag was malformed or missing its required value.
    #[error("{0}")]
    InvalidArgument(String),

    /// A preflight check failed with an ERROR verdict, aborting the run.
    #[error("Preflight check {ordinal} failed: {message}")]
    Preflight {
        /// Ordinal identifier of the failing check (e.g. `"01"`).
        ordinal: String,
        /// Human-readable failure message from the check.
        message: String,
    },

    /// A required external tool could not be resolved to an executable.
    #[error("The '{0}' command is required but not found.")]
    ToolNotFound(String),

    /// A stage's mutating operation failed; later stages are skipped.
    #[error("Stage {ordinal} ({name}) failed: {source}")]
    Stage {
        /// Ordinal identifier of the failing stage (e.g. `"05"`).
        ordinal: String,
        /// Stage name.
        name: String,
        /// Underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// The state store could not record run progress.
    #[error("State store failure: {0}")]
    State(#[source] anyhow::Error),
}

/// Errors raised by `fc` plugins.
///
/// The dispatcher prints these on stderr and mirrors them as a non-zero exit
/// status; they never abort anything beyond the plugin invocation itself.
#[derive(Error, Debug)]
pub enum PluginError {
    /// A plugin's external tool dependency is missing.
    #[error("{0}")]
    MissingTool(String),

    /// The plugin was invoked with an unusable argument.
    #[error("{0}")]
    Usage(String),

    /// The plugin's external tool ran but failed.
    #[error("{0}")]
    Failed(String),
}

impl PluginError {
    /// The uniform missing-tool message used by single-dependency plugins.
    #[must_use]
    pub fn tool_required(tool: &str) -> Self {
        Self::MissingTool(format!("The '{tool}' command is required but not found."))
    }
}
