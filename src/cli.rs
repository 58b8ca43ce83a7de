//! Installer argument parsing and validation.
//!
//! Produces a validated [`Config`] before any check or stage runs. The
//! contract is deliberately asymmetric, matching the installer's observed
//! behavior: a flag missing its required value is a hard failure (exit 1),
//! while an unrecognized flag or positional argument shows the usage text
//! and terminates successfully. `--help` wins regardless of position and
//! short-circuits all other validation.

use crate::config::{Config, LogLevel, Role};
use crate::error::CircusError;

/// Outcome of argument resolution.
#[derive(Debug)]
pub enum CliAction {
    /// Arguments validated; run the installer with this configuration.
    Run(Config),
    /// Print usage and exit successfully (`--help` or unrecognized argument).
    Usage,
}

/// The installer usage text, listing every flag and every valid role name.
#[must_use]
pub fn usage() -> String {
    let mut text = String::from("Usage: circus [options]\n\n");
    text.push_str("Provision this workstation through preflight checks and installation stages.\n\n");
    text.push_str("Options:\n");
    text.push_str("  --role <name>        Installation role: developer, personal, work\n");
    text.push_str("  --dry-run            Simulate all changes without performing them\n");
    text.push_str("  --non-interactive    Never prompt; assume defaults\n");
    text.push_str("  --force              Re-run stages that appear already complete\n");
    text.push_str("  --silent             Reduce console output (log file unaffected)\n");
    text.push_str("  --log-level <level>  One of DEBUG, INFO, WARN, ERROR, CRITICAL\n");
    text.push_str("  --log-file <path>    Duplicate all messages to this file\n");
    text.push_str("  --help               Show this message and exit\n");
    text
}

/// Take the value for a value-requiring flag.
///
/// The value must exist and must not itself look like a flag.
fn take_value<'a>(flag: &str, next: Option<&'a String>) -> Result<&'a str, CircusError> {
    match next {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => Err(CircusError::InvalidArgument(format!(
            "{flag} requires a value"
        ))),
    }
}

/// Resolve raw arguments (without the program name) into a [`CliAction`].
///
/// # Errors
///
/// Returns [`CircusError::InvalidArgument`] when a value-requiring flag is
/// missing its value or the value is not in the allowed set.
pub fn parse(args: &[String]) -> Result<CliAction, CircusError> {
    // --help short-circuits all other validation, wherever it appears.
    if args.iter().any(|a| a == "--help") {
        return Ok(CliAction::Usage);
    }

    let mut config = Config::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--role" => {
                let value = take_value("--role", args.get(i + 1))?;
                config.role = Some(value.parse::<Role>().map_err(|()| {
                    CircusError::InvalidArgument(format!(
                        "Invalid role '{value}'. Valid roles are: {}",
                        Role::ALL.join(", ")
                    ))
                })?);
                i += 2;
            }
            "--log-level" => {
                let value = take_value("--log-level", args.get(i + 1))?;
                config.log_level = value.parse::<LogLevel>().map_err(|()| {
                    CircusError::InvalidArgument(format!(
                        "Invalid log level '{value}'. Valid levels are: {}",
                        LogLevel::ALL.join(", ")
                    ))
                })?;
                i += 2;
            }
            "--log-file" => {
                let value = take_value("--log-file", args.get(i + 1))?;
                config.log_file = Some(value.into());
                i += 2;
            }
            "--dry-run" => {
                config.dry_run = true;
                i += 1;
            }
            "--non-interactive" => {
                config.non_interactive = true;
                i += 1;
            }
            "--force" => {
                config.force = true;
                i += 1;
            }
            "--silent" => {
                config.silent = true;
                i += 1;
            }
            // Unrecognized flags and positionals show usage and exit 0,
            // matching the observed installer behavior.
            _ => return Ok(CliAction::Usage),
        }
    }
    Ok(CliAction::Run(config))
}
