//! Stage 14: cleanup.
//!
//! Removes the downloaded installer script and prunes Homebrew's caches.
//! Has no completion evidence of its own, so it runs on every pass.

use std::path::Path;

use anyhow::Result;

use super::homebrew::INSTALL_SCRIPT_PATH;
use super::{Stage, StageContext};

pub struct Cleanup;

impl Stage for Cleanup {
    fn ordinal(&self) -> &'static str {
        "14"
    }

    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn is_complete(&self, _: &StageContext) -> bool {
        false
    }

    fn run(&self, ctx: &StageContext) -> Result<()> {
        ctx.log.info("Cleaning up");
        let script = Path::new(INSTALL_SCRIPT_PATH);
        if script.exists() {
            ctx.effects.remove_file(script)?;
        }
        ctx.effects.run_tool("brew", &["cleanup"])?;
        Ok(())
    }
}
