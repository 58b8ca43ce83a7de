//! `fc redis`: manage the Redis service through `brew services`.

use std::io::Write;

use crate::error::PluginError;

use super::{Plugin, PluginContext, PluginIo, tool_stdout};

pub struct Redis;

impl Plugin for Redis {
    fn name(&self) -> &'static str {
        "redis"
    }

    fn summary(&self) -> &'static str {
        "Show or change the Redis service state"
    }

    fn run(
        &self,
        args: &[String],
        ctx: &PluginContext,
        io: &mut PluginIo,
    ) -> Result<(), PluginError> {
        let brew = ctx
            .resolver
            .resolve("brew")
            .map_err(|_| PluginError::tool_required("brew"))?;

        let action = args.first().map_or("status", String::as_str);
        match action {
            "status" => {
                let status = tool_stdout(ctx, &brew, &["services", "info", "redis"])?;
                writeln!(io.out, "{status}").map_err(|e| PluginError::Failed(e.to_string()))?;
            }
            "start" | "stop" | "restart" => {
                tool_stdout(ctx, &brew, &["services", action, "redis"])?;
                let past = match action {
                    "start" => "started",
                    "stop" => "stopped",
                    _ => "restarted",
                };
                writeln!(io.out, "Redis {past}.")
                    .map_err(|e| PluginError::Failed(e.to_string()))?;
            }
            other => {
                return Err(PluginError::Usage(format!(
                    "Unknown redis action '{other}'. Usage: fc redis [status|start|stop|restart]"
                )));
            }
        }
        Ok(())
    }
}
