//! Console and file logging.
//!
//! [`Logger`] writes progress to the console (informational output on stdout,
//! failures on stderr) and duplicates every level-filtered message to the
//! `--log-file` path when one is configured. `--silent` trims the console
//! down to warnings and errors but never touches the file. The [`Log`] trait
//! lets checks, stages, and the dry-run interceptor log without knowing which
//! backend they talk to; tests capture output through [`BufferedLog`].

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::{Config, LogLevel};

/// Abstraction over logging backends.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed unless the level allows it).
    fn debug(&self, msg: &str);
    /// Log a warning. Warnings permit continuation and go to stdout.
    fn warn(&self, msg: &str);
    /// Log an error to stderr.
    fn error(&self, msg: &str);
    /// Log a fatal message to stderr (shown even at the CRITICAL level).
    fn critical(&self, msg: &str);
    /// Log a simulated mutation ("would perform X") during dry runs.
    fn dry_run(&self, msg: &str);
}

/// Strip ANSI SGR escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Production logger with level filtering and log-file duplication.
pub struct Logger {
    level: LogLevel,
    silent: bool,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Build a logger from the run configuration.
    ///
    /// When a log file is configured it is truncated and a header line is
    /// written, so each run starts a fresh log.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let logger = Self {
            level: config.log_level,
            silent: config.silent,
            log_file: config.log_file.clone(),
        };
        if let Some(ref path) = logger.log_file {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let version = option_env!("CIRCUS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            let header = format!(
                "circus {version} {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            let _ = fs::write(path, header);
        }
        logger
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Append a line to the log file, timestamped and with ANSI stripped.
    fn write_to_file(&self, tag: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(f, "{ts} {tag} {}", strip_ansi(msg));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        if !self.enabled(LogLevel::Info) {
            return;
        }
        if !self.silent {
            println!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        }
        self.write_to_file("STG", msg);
    }

    fn info(&self, msg: &str) {
        if !self.enabled(LogLevel::Info) {
            return;
        }
        if !self.silent {
            println!("  {msg}");
        }
        self.write_to_file("INF", msg);
    }

    fn debug(&self, msg: &str) {
        if !self.enabled(LogLevel::Debug) {
            return;
        }
        if !self.silent {
            println!("  \x1b[2mDEBUG {msg}\x1b[0m");
        }
        self.write_to_file("DBG", msg);
    }

    fn warn(&self, msg: &str) {
        if !self.enabled(LogLevel::Warn) {
            return;
        }
        // Warnings permit continuation, so they belong on stdout with the
        // rest of the progress output; only terminal failures use stderr.
        println!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    fn error(&self, msg: &str) {
        if !self.enabled(LogLevel::Error) {
            return;
        }
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    fn critical(&self, msg: &str) {
        eprintln!("\x1b[1;31mCRITICAL\x1b[0m {msg}");
        self.write_to_file("CRT", msg);
    }

    fn dry_run(&self, msg: &str) {
        if !self.enabled(LogLevel::Info) {
            return;
        }
        if !self.silent {
            println!("  \x1b[33m[Dry Run]\x1b[0m {msg}");
        }
        self.write_to_file("DRY", msg);
    }
}

/// In-memory logger that records every message instead of printing it.
///
/// Used by unit and integration tests to assert on the exact sequence of
/// emitted messages (dry-run determinism, stage ordering).
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<(Channel, String)>>,
}

/// Which logical channel a buffered message was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stage,
    Info,
    Debug,
    Warn,
    Error,
    DryRun,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, channel: Channel, msg: &str) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((channel, msg.to_string()));
    }

    /// All recorded messages in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Channel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded on a single channel, in emission order.
    #[must_use]
    pub fn messages(&self, channel: Channel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, m)| m)
            .collect()
    }

    /// Whether any recorded message on any channel contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Log for BufferedLog {
    fn stage(&self, msg: &str) {
        self.push(Channel::Stage, msg);
    }
    fn info(&self, msg: &str) {
        self.push(Channel::Info, msg);
    }
    fn debug(&self, msg: &str) {
        self.push(Channel::Debug, msg);
    }
    fn warn(&self, msg: &str) {
        self.push(Channel::Warn, msg);
    }
    fn error(&self, msg: &str) {
        self.push(Channel::Error, msg);
    }
    fn critical(&self, msg: &str) {
        self.push(Channel::Error, msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push(Channel::DryRun, msg);
    }
}
