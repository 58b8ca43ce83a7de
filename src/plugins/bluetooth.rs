//! `fc bluetooth`: Bluetooth power control via `blueutil`.

use std::io::Write;

use crate::error::PluginError;

use super::{Plugin, PluginContext, PluginIo, tool_stdout};

pub struct Bluetooth;

impl Plugin for Bluetooth {
    fn name(&self) -> &'static str {
        "bluetooth"
    }

    fn summary(&self) -> &'static str {
        "Show or change Bluetooth power state"
    }

    fn run(
        &self,
        args: &[String],
        ctx: &PluginContext,
        io: &mut PluginIo,
    ) -> Result<(), PluginError> {
        let blueutil = ctx
            .resolver
            .resolve("blueutil")
            .map_err(|_| PluginError::tool_required("blueutil"))?;

        let action = args.first().map_or("status", String::as_str);
        match action {
            "status" => {
                let power = tool_stdout(ctx, &blueutil, &["--power"])?;
                let state = if power == "1" { "on" } else { "off" };
                writeln!(io.out, "Bluetooth is currently {state}.")
                    .map_err(|e| PluginError::Failed(e.to_string()))?;
            }
            "on" => {
                tool_stdout(ctx, &blueutil, &["--power", "1"])?;
                writeln!(io.out, "Bluetooth turned on.")
                    .map_err(|e| PluginError::Failed(e.to_string()))?;
            }
            "off" => {
                tool_stdout(ctx, &blueutil, &["--power", "0"])?;
                writeln!(io.out, "Bluetooth turned off.")
                    .map_err(|e| PluginError::Failed(e.to_string()))?;
            }
            other => {
                return Err(PluginError::Usage(format!(
                    "Unknown bluetooth action '{other}'. Usage: fc bluetooth [status|on|off]"
                )));
            }
        }
        Ok(())
    }
}
