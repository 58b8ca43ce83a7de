//! Dispatcher contract of the `fc` binary.

#![cfg(unix)]

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;

use common::{FakeTools, fc};

#[test]
fn no_command_prints_usage_and_exits_zero() {
    let home = tempfile::tempdir().expect("temp home");
    let tools = FakeTools::new();
    let output = fc(home.path(), &tools, &[]).output().expect("run fc");
    assert_eq!(output.status.code(), Some(0));
    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains("Usage: fc [global options] <command> [command options]"));
    assert!(out.contains("Available commands:"));
    assert!(out.contains("info"), "got: {out}");
}

#[test]
fn unknown_command_fails_on_stderr() {
    let home = tempfile::tempdir().expect("temp home");
    let tools = FakeTools::new();
    let output = fc(home.path(), &tools, &["frobnicate"])
        .output()
        .expect("run fc");
    assert_ne!(output.status.code(), Some(0));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("Unknown command 'frobnicate'"));
}

#[test]
fn bluetooth_reports_power_state() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add("blueutil", "echo 1");
    let output = fc(home.path(), &tools, &["bluetooth", "status"])
        .output()
        .expect("run fc");
    assert_eq!(output.status.code(), Some(0));
    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains("Bluetooth is currently on."));
}

#[test]
fn bluetooth_missing_tool_uses_uniform_message() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add_broken("blueutil");
    let output = fc(home.path(), &tools, &["bluetooth"])
        .output()
        .expect("run fc");
    assert_ne!(output.status.code(), Some(0));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("The 'blueutil' command is required but not found."));
}

#[test]
fn backup_missing_rsync_produces_no_artifact() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add_broken("rsync");
    let output = fc(home.path(), &tools, &["backup"])
        .output()
        .expect("run fc");
    assert_ne!(output.status.code(), Some(0));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("This command requires 'rsync'."));
    assert!(!home.path().join("Backups").exists());
}

#[test]
fn sync_missing_tar_short_circuits() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add_broken("tar");
    let output = fc(home.path(), &tools, &["sync"])
        .output()
        .expect("run fc");
    assert_ne!(output.status.code(), Some(0));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("This command requires 'tar'."));
    assert!(!home.path().join("circus-sync.tar.gz").exists());
}

#[test]
fn sync_missing_gpg_leaves_no_partial_archive() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add("tar", "touch \"$2\"");
    tools.add_broken("gpg");
    let output = fc(home.path(), &tools, &["sync"])
        .output()
        .expect("run fc");
    assert_ne!(output.status.code(), Some(0));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("GPG is not installed."));
    // gpg was resolved before tar ever ran.
    assert!(!home.path().join("circus-sync.tar.gz").exists());
}

#[test]
fn sync_with_both_tools_reports_the_encrypted_artifact() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add("tar", "touch \"$2\"");
    // argv: --batch --yes --recipient <id> --output <path> --encrypt <in>
    tools.add("gpg", "touch \"$6\"");
    let output = fc(home.path(), &tools, &["sync"])
        .env("GPG_RECIPIENT_ID", "backup@example.com")
        .output()
        .expect("run fc");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains("Encrypted backup created at"), "got: {out}");
    assert!(home.path().join("circus-sync.tar.gz.gpg").is_file());
    // The plaintext intermediate is removed.
    assert!(!home.path().join("circus-sync.tar.gz").exists());
}

#[test]
fn sync_without_recipient_fails() {
    let home = tempfile::tempdir().expect("temp home");
    let mut tools = FakeTools::new();
    tools.add("tar", "exit 0");
    tools.add("gpg", "exit 0");
    let output = fc(home.path(), &tools, &["sync"])
        .env_remove("GPG_RECIPIENT_ID")
        .output()
        .expect("run fc");
    assert_ne!(output.status.code(), Some(0));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("GPG_RECIPIENT_ID"));
}

#[test]
fn external_plugins_are_discovered_and_delegated() {
    let home = tempfile::tempdir().expect("temp home");
    let plugin_dir = home.path().join("plugins");
    fs::create_dir_all(&plugin_dir).expect("plugin dir");
    let plugin = plugin_dir.join("fc-hello");
    fs::write(&plugin, "#!/bin/sh\necho \"hello $1\"\nexit 0\n").expect("plugin script");
    fs::set_permissions(&plugin, fs::Permissions::from_mode(0o755)).expect("chmod");

    let tools = FakeTools::new();
    let dir_arg = plugin_dir.display().to_string();

    // Advertised in the listing.
    let usage = fc(home.path(), &tools, &["--plugin-dir", &dir_arg])
        .output()
        .expect("run fc");
    assert!(String::from_utf8_lossy(&usage.stdout).contains("hello"));

    // Delegated with argv passed through.
    let output = fc(
        home.path(),
        &tools,
        &["--plugin-dir", &dir_arg, "hello", "world"],
    )
    .output()
    .expect("run fc");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("hello world"));
}

#[test]
fn external_plugin_exit_status_is_mirrored() {
    let home = tempfile::tempdir().expect("temp home");
    let plugin_dir = home.path().join("plugins");
    fs::create_dir_all(&plugin_dir).expect("plugin dir");
    let plugin = plugin_dir.join("fc-failing");
    fs::write(&plugin, "#!/bin/sh\nexit 9\n").expect("plugin script");
    fs::set_permissions(&plugin, fs::Permissions::from_mode(0o755)).expect("chmod");

    let tools = FakeTools::new();
    let dir_arg = plugin_dir.display().to_string();
    let output = fc(home.path(), &tools, &["--plugin-dir", &dir_arg, "failing"])
        .output()
        .expect("run fc");
    assert_eq!(output.status.code(), Some(9));
}
