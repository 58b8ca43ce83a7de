//! The `fc` plugin registry and dispatcher.
//!
//! A plugin is either built in (implements [`Plugin`]) or an external
//! executable named `fc-<command>` discovered in a search directory. The
//! dispatcher routes a command name to its plugin and mirrors the plugin's
//! exit status verbatim; it never participates in the installation pipeline
//! and shares only the tool resolver with it.

pub mod backup;
pub mod bluetooth;
pub mod info;
pub mod redis;
pub mod sync;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PluginError;
use crate::exec::{Executor, ToolResolver};

/// Output streams handed to a plugin.
pub struct PluginIo<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Read-only context shared by every plugin invocation.
pub struct PluginContext<'a> {
    pub resolver: &'a ToolResolver,
    pub executor: &'a dyn Executor,
    pub env: &'a HashMap<String, String>,
    pub home: &'a Path,
}

/// A built-in utility command.
pub trait Plugin: Send + Sync {
    /// Command name as typed after `fc`, e.g. `"info"`.
    fn name(&self) -> &'static str;
    /// One-line description for the usage listing.
    fn summary(&self) -> &'static str;
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] which the dispatcher prints on stderr and
    /// mirrors as a non-zero exit status.
    fn run(&self, args: &[String], ctx: &PluginContext, io: &mut PluginIo)
    -> Result<(), PluginError>;
}

/// Run a resolved tool and return its trimmed stdout.
///
/// Spawn failures and non-zero exits both surface as [`PluginError::Failed`]
/// carrying the tool's own diagnostics.
pub(crate) fn tool_stdout(
    ctx: &PluginContext,
    program: &Path,
    args: &[&str],
) -> Result<String, PluginError> {
    let result = ctx
        .executor
        .run_unchecked(program, args)
        .map_err(|e| PluginError::Failed(e.to_string()))?;
    if !result.success {
        let detail = if result.stderr.trim().is_empty() {
            format!("{} exited with status {}", program.display(), result.code.unwrap_or(1))
        } else {
            result.stderr.trim().to_string()
        };
        return Err(PluginError::Failed(detail));
    }
    Ok(result.stdout.trim().to_string())
}

enum Entry {
    Builtin(Box<dyn Plugin>),
    External { name: String, path: PathBuf },
}

impl Entry {
    fn name(&self) -> &str {
        match self {
            Self::Builtin(plugin) => plugin.name(),
            Self::External { name, .. } => name,
        }
    }
}

/// Ordered mapping from command name to plugin.
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// The built-in plugins, in usage-listing order.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                Entry::Builtin(Box::new(backup::Backup)),
                Entry::Builtin(Box::new(bluetooth::Bluetooth)),
                Entry::Builtin(Box::new(info::Info)),
                Entry::Builtin(Box::new(redis::Redis)),
                Entry::Builtin(Box::new(sync::Sync)),
            ],
        }
    }

    /// Add external `fc-*` executables found in `dir`.
    ///
    /// A built-in plugin is never shadowed by an external one of the same
    /// name. Discovery failures (missing directory, unreadable entries) are
    /// ignored; an empty directory simply adds nothing.
    #[must_use]
    pub fn discover(mut self, dir: &Path) -> Self {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return self;
        };
        let mut found: Vec<(String, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                let file_name = path.file_name()?.to_str()?;
                let command = file_name.strip_prefix("fc-")?;
                if command.is_empty() || !is_executable(&path) {
                    return None;
                }
                if self.entries.iter().any(|e| e.name() == command) {
                    return None;
                }
                Some((command.to_string(), path.clone()))
            })
            .collect();
        found.sort();
        for (name, path) in found {
            self.entries.push(Entry::External { name, path });
        }
        self
    }

    /// All advertised command names, in listing order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(Entry::name).collect()
    }

    /// Write the dispatcher usage text, including the command listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_usage(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Usage: fc [global options] <command> [command options]")?;
        writeln!(out)?;
        writeln!(out, "Available commands:")?;
        for entry in &self.entries {
            match entry {
                Entry::Builtin(plugin) => {
                    writeln!(out, "  {:<12} {}", plugin.name(), plugin.summary())?;
                }
                Entry::External { name, path } => {
                    writeln!(out, "  {:<12} external ({})", name, path.display())?;
                }
            }
        }
        Ok(())
    }

    /// Route a command to its plugin and return the process exit status.
    #[must_use]
    pub fn dispatch(
        &self,
        command: &str,
        args: &[String],
        ctx: &PluginContext,
        io: &mut PluginIo,
    ) -> i32 {
        let Some(entry) = self.entries.iter().find(|e| e.name() == command) else {
            let _ = writeln!(io.err, "Unknown command '{command}'");
            return 1;
        };
        match entry {
            Entry::Builtin(plugin) => match plugin.run(args, ctx, io) {
                Ok(()) => 0,
                Err(e) => {
                    let _ = writeln!(io.err, "{e}");
                    1
                }
            },
            Entry::External { path, .. } => run_external(path, args, io),
        }
    }
}

/// Hand control to an external plugin executable, passing argv, environment,
/// and standard streams through untouched, and mirror its exit status.
fn run_external(path: &Path, args: &[String], io: &mut PluginIo) -> i32 {
    match std::process::Command::new(path).args(args).status() {
        Ok(status) => status.code().unwrap_or(1),
        Err(e) => {
            let _ = writeln!(io.err, "Failed to execute {}: {e}", path.display());
            1
        }
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
