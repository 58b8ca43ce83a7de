//! Hardware checks: power state and network association.
//!
//! Both checks rely on macOS-only tools and degrade to a warning when the
//! tool is absent, so a run on another platform (or a stripped test
//! environment) is never blocked by them.

use super::{Check, CheckContext, CheckOutcome};

/// Check 08: on AC power, or battery at 20% or better.
pub struct BatteryLevel;

/// Pull the first `NN%` figure out of `pmset -g batt` output.
fn parse_battery_percent(output: &str) -> Option<u32> {
    for token in output.split_whitespace() {
        if let Some(stripped) = token.trim_end_matches(';').strip_suffix('%')
            && let Ok(percent) = stripped.parse()
        {
            return Some(percent);
        }
    }
    None
}

impl Check for BatteryLevel {
    fn ordinal(&self) -> &'static str {
        "08"
    }

    fn name(&self) -> &'static str {
        "battery"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        if !ctx.resolver.is_available("pmset") {
            return CheckOutcome::warning(
                "Skipping battery check: not applicable on this platform",
            );
        }
        let Some(output) = ctx.tool_output("pmset", &["-g", "batt"]) else {
            return CheckOutcome::warning("Could not query the power state");
        };
        if output.stdout.contains("AC Power") {
            return CheckOutcome::success("Running on AC power");
        }
        match parse_battery_percent(&output.stdout) {
            Some(percent) if percent >= 20 => {
                CheckOutcome::success(format!("Battery at {percent}%"))
            }
            Some(percent) => CheckOutcome::error(format!(
                "Battery at {percent}%; connect power or charge to at least 20%."
            )),
            None => CheckOutcome::warning("Could not read the battery level"),
        }
    }
}

/// Check 09: an active WiFi association must exist.
pub struct WifiAssociation;

impl Check for WifiAssociation {
    fn ordinal(&self) -> &'static str {
        "09"
    }

    fn name(&self) -> &'static str {
        "wifi"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        if !ctx.resolver.is_available("networksetup") {
            return CheckOutcome::warning(
                "Skipping WiFi check: not applicable on this platform",
            );
        }
        let Some(output) = ctx.tool_output("networksetup", &["-getairportnetwork", "en0"])
        else {
            return CheckOutcome::warning("Could not query the WiFi state");
        };
        if output.success && output.stdout.contains("Current Wi-Fi Network") {
            CheckOutcome::success("WiFi network association found")
        } else {
            CheckOutcome::error("No active WiFi network association.")
        }
    }
}
