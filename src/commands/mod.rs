//! Top-level command drivers.

pub mod install;
