//! `fc info`: system information.

use std::io::Write;

use crate::error::PluginError;

use super::{Plugin, PluginContext, PluginIo, tool_stdout};

pub struct Info;

impl Plugin for Info {
    fn name(&self) -> &'static str {
        "info"
    }

    fn summary(&self) -> &'static str {
        "Show OS version, hardware model, and CPU"
    }

    fn run(
        &self,
        _args: &[String],
        ctx: &PluginContext,
        io: &mut PluginIo,
    ) -> Result<(), PluginError> {
        let sw_vers = ctx
            .resolver
            .resolve("sw_vers")
            .map_err(|_| PluginError::tool_required("sw_vers"))?;
        let sysctl = ctx
            .resolver
            .resolve("sysctl")
            .map_err(|_| PluginError::tool_required("sysctl"))?;

        let version = tool_stdout(ctx, &sw_vers, &["-productVersion"])?;
        let model = tool_stdout(ctx, &sysctl, &["-n", "hw.model"])?;
        let cpu = tool_stdout(ctx, &sysctl, &["-n", "machdep.cpu.brand_string"])?;

        writeln!(io.out, "OS: macOS {version}").map_err(|e| PluginError::Failed(e.to_string()))?;
        writeln!(io.out, "Model: {model}").map_err(|e| PluginError::Failed(e.to_string()))?;
        writeln!(io.out, "CPU: {cpu}").map_err(|e| PluginError::Failed(e.to_string()))?;
        Ok(())
    }
}
