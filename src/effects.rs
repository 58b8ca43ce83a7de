//! The dry-run interceptor.
//!
//! Every state-mutating operation a stage performs goes through [`Effects`]:
//! filesystem changes, permission changes, and external tool invocations. In
//! live mode the operation is performed and its result propagated; in dry-run
//! mode the intended action is logged as a `would …` line and nothing is
//! touched. Tool names are resolved lazily and only in live mode, so a dry
//! run succeeds and produces its full simulation output even on a machine
//! where none of the tools are installed.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::exec::{Executor, ToolResolver};
use crate::logging::Log;

/// Gatekeeper for all mutating operations.
pub struct Effects {
    dry_run: bool,
    log: Arc<dyn Log>,
    executor: Arc<dyn Executor>,
    resolver: ToolResolver,
}

impl Effects {
    /// Build an interceptor for a run.
    #[must_use]
    pub fn new(
        dry_run: bool,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        resolver: ToolResolver,
    ) -> Self {
        Self {
            dry_run,
            log,
            executor,
            resolver,
        }
    }

    /// Whether this run is a simulation.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// The tool resolver shared with checks and plugins.
    #[must_use]
    pub fn resolver(&self) -> &ToolResolver {
        &self.resolver
    }

    /// Create a directory (and any missing parents).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created in live mode.
    pub fn create_dir(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            self.log
                .dry_run(&format!("would create directory: {}", path.display()));
            return Ok(());
        }
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
        self.log
            .debug(&format!("created directory: {}", path.display()));
        Ok(())
    }

    /// Create a symlink at `target` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created in live mode.
    pub fn symlink(&self, source: &Path, target: &Path) -> Result<()> {
        if self.dry_run {
            self.log.dry_run(&format!(
                "would create symlink: {} -> {}",
                target.display(),
                source.display()
            ));
            return Ok(());
        }
        #[cfg(unix)]
        std::os::unix::fs::symlink(source, target).with_context(|| {
            format!(
                "failed to create symlink: {} -> {}",
                target.display(),
                source.display()
            )
        })?;
        #[cfg(not(unix))]
        anyhow::bail!("symlinks are not supported on this platform");
        #[cfg(unix)]
        {
            self.log.debug(&format!(
                "created symlink: {} -> {}",
                target.display(),
                source.display()
            ));
            Ok(())
        }
    }

    /// Write a file, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written in live mode.
    pub fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if self.dry_run {
            self.log
                .dry_run(&format!("would write file: {}", path.display()));
            return Ok(());
        }
        fs::write(path, contents)
            .with_context(|| format!("failed to write file: {}", path.display()))?;
        self.log.debug(&format!("wrote file: {}", path.display()));
        Ok(())
    }

    /// Set the executable bits on a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the permissions cannot be changed in live mode.
    pub fn make_executable(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            self.log
                .dry_run(&format!("would make executable: {}", path.display()));
            return Ok(());
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = path
                .metadata()
                .with_context(|| format!("failed to stat: {}", path.display()))?;
            let mut permissions = metadata.permissions();
            permissions.set_mode(permissions.mode() | 0o755);
            fs::set_permissions(path, permissions)
                .with_context(|| format!("failed to set permissions: {}", path.display()))?;
            self.log
                .debug(&format!("made executable: {}", path.display()));
        }
        Ok(())
    }

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed in live mode.
    pub fn remove_file(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            self.log
                .dry_run(&format!("would remove file: {}", path.display()));
            return Ok(());
        }
        match fs::remove_file(path) {
            Ok(()) => {
                self.log.debug(&format!("removed file: {}", path.display()));
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove file: {}", path.display()))
            }
        }
    }

    /// Run an external tool by logical name.
    ///
    /// In dry-run mode the tool is not resolved at all, so simulation output
    /// is complete and deterministic even when the tool is absent. In live
    /// mode resolution failure or a non-zero exit aborts the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if, in live mode, the tool cannot be resolved or the
    /// command exits non-zero.
    pub fn run_tool(&self, tool: &str, args: &[&str]) -> Result<()> {
        if self.dry_run {
            self.log
                .dry_run(&format!("would run: {} {}", tool, args.join(" ")));
            return Ok(());
        }
        let program = self.resolver.resolve(tool)?;
        self.log
            .debug(&format!("running: {} {}", program.display(), args.join(" ")));
        self.executor.run(&program, args)?;
        Ok(())
    }
}
