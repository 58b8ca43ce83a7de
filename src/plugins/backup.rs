//! `fc backup`: mirror the home directory to a backup location with rsync.

use std::io::Write;

use crate::error::PluginError;

use super::{Plugin, PluginContext, PluginIo, tool_stdout};

pub struct Backup;

impl Plugin for Backup {
    fn name(&self) -> &'static str {
        "backup"
    }

    fn summary(&self) -> &'static str {
        "Mirror the home directory to a backup location"
    }

    fn run(
        &self,
        args: &[String],
        ctx: &PluginContext,
        io: &mut PluginIo,
    ) -> Result<(), PluginError> {
        let rsync = ctx
            .resolver
            .resolve("rsync")
            .map_err(|_| PluginError::MissingTool("This command requires 'rsync'.".to_string()))?;

        let destination = args.first().cloned().unwrap_or_else(|| {
            ctx.home.join("Backups").join("circus").display().to_string()
        });
        let source = format!("{}/", ctx.home.display());
        tool_stdout(
            ctx,
            &rsync,
            &[
                "-a",
                "--delete",
                "--exclude",
                ".circus",
                "--exclude",
                "Backups",
                &source,
                &destination,
            ],
        )?;
        writeln!(io.out, "Backup created at {destination}")
            .map_err(|e| PluginError::Failed(e.to_string()))?;
        Ok(())
    }
}
