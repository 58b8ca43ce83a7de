//! Installation state persistence.
//!
//! Lives under `~/.circus/` and holds at most two entries: a `role` file
//! naming the role the run was started with, and an `installed` marker (JSON)
//! written when every stage completed. Dry runs write nothing, so the
//! directory stays exactly as it was before the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Role;

/// State directory name under the user's home.
pub const STATE_DIR_NAME: &str = ".circus";

/// The completion marker written by [`StateStore::mark_completed`].
#[derive(Debug, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Role the installation was run with, if one was selected.
    pub role: Option<Role>,
    /// Completion timestamp, RFC 3339.
    pub completed_at: String,
}

/// Reads and writes the installation markers.
#[derive(Debug)]
pub struct StateStore {
    dir: PathBuf,
    dry_run: bool,
}

impl StateStore {
    /// A store rooted at `<home>/.circus`.
    #[must_use]
    pub fn new(home: &Path, dry_run: bool) -> Self {
        Self {
            dir: home.join(STATE_DIR_NAME),
            dry_run,
        }
    }

    /// The state directory path.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a previous run completed on this machine.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.dir.join("installed").is_file()
    }

    /// The role recorded by the most recent run, if any.
    #[must_use]
    pub fn recorded_role(&self) -> Option<Role> {
        let raw = fs::read_to_string(self.dir.join("role")).ok()?;
        raw.trim().parse().ok()
    }

    /// Record that a run has started: create the directory and write the
    /// role file. No-op in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or role file cannot be written.
    pub fn mark_started(&self, role: Option<Role>) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create state directory: {}", self.dir.display()))?;
        if let Some(role) = role {
            let path = self.dir.join("role");
            fs::write(&path, format!("{role}\n"))
                .with_context(|| format!("failed to write role file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Record that every stage completed. No-op in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker file cannot be written.
    pub fn mark_completed(&self, role: Option<Role>) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        let record = InstallRecord {
            role,
            completed_at: chrono::Local::now().to_rfc3339(),
        };
        let path = self.dir.join("installed");
        let json = serde_json::to_string_pretty(&record)
            .context("failed to serialize installation record")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write marker: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fresh_home_is_not_installed() {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path(), false);
        assert!(!store.is_installed());
        assert_eq!(store.recorded_role(), None);
    }

    #[test]
    fn mark_started_writes_role_file() {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path(), false);
        store.mark_started(Some(Role::Developer)).unwrap();
        assert!(store.dir().is_dir());
        assert_eq!(store.recorded_role(), Some(Role::Developer));
        assert!(!store.is_installed());
    }

    #[test]
    fn mark_completed_writes_marker() {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path(), false);
        store.mark_started(Some(Role::Work)).unwrap();
        store.mark_completed(Some(Role::Work)).unwrap();
        assert!(store.is_installed());

        let raw = fs::read_to_string(store.dir().join("installed")).unwrap();
        let record: InstallRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.role, Some(Role::Work));
        assert!(!record.completed_at.is_empty());
    }

    #[test]
    fn state_dir_stays_minimal() {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path(), false);
        store.mark_started(Some(Role::Personal)).unwrap();
        store.mark_completed(Some(Role::Personal)).unwrap();
        let entries = fs::read_dir(store.dir()).unwrap().count();
        assert!(entries <= 2, "state directory grew beyond two entries");
    }

    #[test]
    fn dry_run_writes_nothing() {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path(), true);
        store.mark_started(Some(Role::Developer)).unwrap();
        store.mark_completed(Some(Role::Developer)).unwrap();
        assert!(!store.dir().exists());
    }

    #[test]
    fn started_without_role_skips_role_file() {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path(), false);
        store.mark_started(None).unwrap();
        assert!(store.dir().is_dir());
        assert_eq!(store.recorded_role(), None);
    }
}
