//! Immutable run configuration built once from command-line arguments.
//!
//! Every component receives the [`Config`] by shared reference and none of
//! them mutates it. Construction happens in [`crate::cli`]; after that the
//! values are fixed for the lifetime of the run.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Installation role selecting which role-specific configuration applies.
///
/// Role names are matched case-sensitively on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Personal,
    Work,
}

impl Role {
    /// All valid role names, in the order they appear in usage text.
    pub const ALL: &'static [&'static str] = &["developer", "personal", "work"];
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "developer" => Ok(Self::Developer),
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Developer => write!(f, "developer"),
            Self::Personal => write!(f, "personal"),
            Self::Work => write!(f, "work"),
        }
    }
}

/// Message severity threshold for console and log-file output.
///
/// Parsed case-insensitively (`debug` and `DEBUG` are equivalent) and
/// normalized to the uppercase form for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    /// All valid level names, uppercase.
    pub const ALL: &'static [&'static str] = &["DEBUG", "INFO", "WARN", "ERROR", "CRITICAL"];
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        write!(f, "{name}")
    }
}

/// Validated installer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected installation role, if any.
    pub role: Option<Role>,
    /// Simulate all mutating operations without performing them.
    pub dry_run: bool,
    /// Never prompt; assume defaults for every decision point.
    pub non_interactive: bool,
    /// Re-run stages even when idempotency evidence says they completed.
    pub force: bool,
    /// Reduce console verbosity (log file content is unaffected).
    pub silent: bool,
    /// Minimum severity for emitted messages.
    pub log_level: LogLevel,
    /// Optional file every level-filtered message is duplicated to.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            role: None,
            dry_run: false,
            non_interactive: false,
            force: false,
            silent: false,
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_names() {
        assert_eq!("developer".parse::<Role>().unwrap(), Role::Developer);
        assert_eq!("personal".parse::<Role>().unwrap(), Role::Personal);
        assert_eq!("work".parse::<Role>().unwrap(), Role::Work);
    }

    #[test]
    fn role_is_case_sensitive() {
        assert!("Developer".parse::<Role>().is_err());
        assert!("WORK".parse::<Role>().is_err());
    }

    #[test]
    fn role_rejects_unknown() {
        assert!("gamer".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn role_display_round_trips() {
        for name in Role::ALL {
            let role: Role = name.parse().unwrap();
            assert_eq!(role.to_string(), *name);
        }
    }

    #[test]
    fn log_level_is_case_insensitive() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);
    }

    #[test]
    fn log_level_rejects_unknown() {
        assert!("TRACE".parse::<LogLevel>().is_err());
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn log_level_displays_uppercase() {
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.role, None);
        assert!(!config.dry_run);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_file.is_none());
    }
}
