//! Environment checks: platform, user identity, permissions, shell.

use super::{Check, CheckContext, CheckOutcome};

/// Check 01: the platform must be macOS.
pub struct MacosPlatform;

impl Check for MacosPlatform {
    fn ordinal(&self) -> &'static str {
        "01"
    }

    fn name(&self) -> &'static str {
        "macos-platform"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        let Some(output) = ctx.tool_output("uname", &["-s"]) else {
            return CheckOutcome::error("The 'uname' command is required but not found.");
        };
        let platform = output.stdout.trim().to_string();
        if platform == "Darwin" {
            CheckOutcome::success("Platform is macOS")
        } else {
            CheckOutcome::error(format!(
                "Unsupported platform '{platform}'. This tool only supports macOS."
            ))
        }
    }
}

/// Check 02: refuse to run as the superuser.
pub struct NotRoot;

impl Check for NotRoot {
    fn ordinal(&self) -> &'static str {
        "02"
    }

    fn name(&self) -> &'static str {
        "not-root"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        let Some(output) = ctx.tool_output("id", &["-u"]) else {
            return CheckOutcome::warning("Could not determine the current user id");
        };
        if output.stdout.trim() == "0" {
            CheckOutcome::error("Do not run this installer as root.")
        } else {
            CheckOutcome::success("Not running as root")
        }
    }
}

/// Check 03: the user should belong to the admin group.
///
/// Some stages escalate through the system dialog, so a non-admin user can
/// still complete most of the run; this check only warns.
pub struct AdminRights;

impl Check for AdminRights {
    fn ordinal(&self) -> &'static str {
        "03"
    }

    fn name(&self) -> &'static str {
        "admin-rights"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        let Some(output) = ctx.tool_output("id", &["-Gn"]) else {
            return CheckOutcome::warning("Could not determine group membership");
        };
        if output.stdout.split_whitespace().any(|g| g == "admin") {
            CheckOutcome::success("User has administrator rights")
        } else {
            CheckOutcome::warning(
                "User is not in the admin group; some stages may prompt for credentials",
            )
        }
    }
}

/// Check 04: the home directory must be writable.
pub struct HomePermissions;

impl Check for HomePermissions {
    fn ordinal(&self) -> &'static str {
        "04"
    }

    fn name(&self) -> &'static str {
        "home-permissions"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        match ctx.home.metadata() {
            Ok(metadata) if !metadata.permissions().readonly() => {
                CheckOutcome::success("Home directory is writable")
            }
            Ok(_) => CheckOutcome::error(format!(
                "Home directory is not writable: {}",
                ctx.home.display()
            )),
            Err(_) => CheckOutcome::error(format!(
                "Home directory does not exist: {}",
                ctx.home.display()
            )),
        }
    }
}

/// Check 05: required environment variables must be present.
pub struct RequiredEnvVars;

/// Variables every stage assumes are set.
const REQUIRED_VARS: &[&str] = &["HOME", "USER", "SHELL"];

impl Check for RequiredEnvVars {
    fn ordinal(&self) -> &'static str {
        "05"
    }

    fn name(&self) -> &'static str {
        "environment-variables"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        for name in REQUIRED_VARS {
            if ctx.env_var(name).is_none_or(str::is_empty) {
                return CheckOutcome::error(format!(
                    "Required environment variable {name} is not set."
                ));
            }
        }
        CheckOutcome::success("Required environment variables are set")
    }
}

/// Check 06: the active shell must be zsh, version 5.0 or newer.
pub struct ZshShell;

/// Extract `major.minor` from `zsh --version` output like
/// `zsh 5.9 (x86_64-apple-darwin22.0)`.
fn parse_zsh_version(output: &str) -> Option<(u32, u32)> {
    let version = output.split_whitespace().nth(1)?;
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()
        .map(|m| {
            m.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .and_then(|m| m.parse().ok())
        .unwrap_or(0);
    Some((major, minor))
}

impl Check for ZshShell {
    fn ordinal(&self) -> &'static str {
        "06"
    }

    fn name(&self) -> &'static str {
        "shell"
    }

    fn evaluate(&self, ctx: &CheckContext) -> CheckOutcome {
        let shell = ctx.env_var("SHELL").unwrap_or_default();
        if !shell.ends_with("zsh") {
            return CheckOutcome::error(format!(
                "The active shell must be zsh (found '{shell}')."
            ));
        }
        let Some(output) = ctx.tool_output("zsh", &["--version"]) else {
            return CheckOutcome::error("The 'zsh' command is required but not found.");
        };
        match parse_zsh_version(&output.stdout) {
            Some((major, _)) if major >= 5 => {
                CheckOutcome::success("Shell is zsh 5.0 or newer")
            }
            Some((major, minor)) => CheckOutcome::error(format!(
                "zsh version {major}.{minor} is below the required 5.0."
            )),
            None => CheckOutcome::warning("Could not parse the zsh version"),
        }
    }
}
