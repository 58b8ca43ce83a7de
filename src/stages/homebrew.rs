//! Stage 03: Homebrew installation.

use anyhow::Result;

use super::{Stage, StageContext};

const INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Where the installer script is downloaded before execution.
pub const INSTALL_SCRIPT_PATH: &str = "/tmp/homebrew-install.sh";

pub struct HomebrewInstallation;

impl Stage for HomebrewInstallation {
    fn ordinal(&self) -> &'static str {
        "03"
    }

    fn name(&self) -> &'static str {
        "homebrew-installation"
    }

    fn is_complete(&self, ctx: &StageContext) -> bool {
        ctx.effects.resolver().is_available("brew")
    }

    fn run(&self, ctx: &StageContext) -> Result<()> {
        ctx.log.info("Installing Homebrew");
        ctx.effects.run_tool(
            "curl",
            &["-fsSL", INSTALL_SCRIPT_URL, "-o", INSTALL_SCRIPT_PATH],
        )?;
        ctx.effects.run_tool("bash", &[INSTALL_SCRIPT_PATH])?;
        ctx.effects.run_tool("brew", &["update"])?;
        Ok(())
    }
}
