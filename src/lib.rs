//! Workstation provisioning engine.
//!
//! Provisions a developer machine through an ordered sequence of idempotent
//! installation stages, gated by preflight checks, with a dry-run mode that
//! simulates every mutation. A sibling dispatcher (`fc`) routes utility
//! subcommands to independent plugins.
//!
//! The public API is organised into layers:
//!
//! - **[`config`] / [`cli`]**: the validated run configuration and the flag
//!   parser that produces it
//! - **[`exec`] / [`effects`]**: subprocess execution, tool resolution, and
//!   the dry-run interceptor every mutation goes through
//! - **[`preflight`]**: precondition checks and the short-circuiting gate
//! - **[`stages`]**: the sequential installation pipeline
//! - **[`plugins`]**: the `fc` command registry and dispatcher
//! - **[`commands`]**: top-level drivers wiring the above together

#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod effects;
pub mod error;
pub mod exec;
pub mod logging;
pub mod plugins;
pub mod preflight;
pub mod stages;
pub mod state;
