//! Toolchain checks: developer tools, package manager, dependencies, and
//! evidence of a prior installation.

use super::{Check, CheckContext, CheckOutcome};
use crate::state::StateStore;

/// Check 10: the Xcode command line tools must be installed.
pub struct XcodeCliTools;

impl Check for XcodeCliTools {
    fn ordinal(&self) -> &'static str {
        "10"
    }

    fn name(&self) -> &'static str {
        "xcode-cli-tools"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        let Some(output) = ctx.tool_output("xcode-select", &["-p"]) else {
            return CheckOutcome::error("The 'xcode-select' command is required but not found.");
        };
        if output.success && !output.stdout.trim().is_empty() {
            CheckOutcome::success("Xcode command line tools found")
        } else {
            CheckOutcome::error("Xcode command line tools are not installed.")
        }
    }
}

/// Check 11: Homebrew must be present.
pub struct Homebrew;

impl Check for Homebrew {
    fn ordinal(&self) -> &'static str {
        "11"
    }

    fn name(&self) -> &'static str {
        "homebrew"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        if ctx.resolver.is_available("brew") {
            CheckOutcome::success("Homebrew found")
        } else {
            CheckOutcome::error("The 'brew' command is required but not found.")
        }
    }
}

/// Check 12: generic dependency list.
pub struct Dependencies;

/// Tools every stage assumes are on the machine.
const REQUIRED_TOOLS: &[&str] = &["git", "curl"];

impl Check for Dependencies {
    fn ordinal(&self) -> &'static str {
        "12"
    }

    fn name(&self) -> &'static str {
        "dependencies"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        for tool in REQUIRED_TOOLS {
            if !ctx.resolver.is_available(tool) {
                return CheckOutcome::error(format!(
                    "The '{tool}' command is required but not found."
                ));
            }
        }
        CheckOutcome::success("Required dependencies found")
    }
}

/// Check 15: warn when a completed installation already exists.
pub struct ExistingInstallation;

impl Check for ExistingInstallation {
    fn ordinal(&self) -> &'static str {
        "15"
    }

    fn name(&self) -> &'static str {
        "existing-installation"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        let store = StateStore::new(ctx.home, ctx.config.dry_run);
        if store.is_installed() {
            CheckOutcome::warning(
                "An existing installation was found; completed stages will be skipped (use --force to re-run them)",
            )
        } else {
            CheckOutcome::success("No previous installation found")
        }
    }
}
