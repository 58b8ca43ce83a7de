//! Shared helpers for integration tests: fake tool scripts and binary
//! invocation with a controlled environment.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use circus_cli::exec::ToolResolver;

/// A directory of fake shell-script tools, wired up through the
/// `<TOOL>_CMD` override convention.
pub struct FakeTools {
    dir: tempfile::TempDir,
    overrides: Vec<(String, String)>,
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fake tool dir"),
            overrides: Vec::new(),
        }
    }

    /// Install a fake tool whose body is the given shell script (without the
    /// shebang line) and register its override variable.
    pub fn add(&mut self, tool: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(tool);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake tool");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("chmod fake tool");
        }
        self.overrides.push((
            ToolResolver::override_key(tool),
            path.display().to_string(),
        ));
        path
    }

    /// Point a tool's override at a path that does not exist.
    pub fn add_broken(&mut self, tool: &str) {
        self.overrides.push((
            ToolResolver::override_key(tool),
            "/nonexistent/fake-tool".to_string(),
        ));
    }

    pub fn overrides(&self) -> &[(String, String)] {
        &self.overrides
    }
}

/// Fake tools satisfying every preflight check.
pub fn passing_tools() -> FakeTools {
    let mut tools = FakeTools::new();
    tools.add("uname", "echo Darwin");
    tools.add(
        "id",
        "case \"$1\" in\n  -u) echo 501 ;;\n  -Gn) echo 'staff admin everyone' ;;\nesac",
    );
    tools.add("zsh", "echo 'zsh 5.9 (x86_64-apple-darwin22.0)'");
    tools.add("pmset", "echo \"Now drawing from 'AC Power'\"");
    tools.add("networksetup", "echo 'Current Wi-Fi Network: TestNet'");
    tools.add("xcode-select", "echo /Library/Developer/CommandLineTools");
    tools.add("brew", "exit 0");
    tools.add("git", "exit 0");
    tools.add("curl", "exit 0");
    tools
}

/// The `circus` installer binary with a controlled home and fake tools.
pub fn circus(home: &Path, tools: &FakeTools, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_circus"));
    cmd.args(args)
        .env("HOME", home)
        .env("USER", "tester")
        .env("SHELL", "/bin/zsh");
    for (key, value) in tools.overrides() {
        cmd.env(key, value);
    }
    cmd
}

/// The `fc` dispatcher binary with a controlled home and fake tools.
pub fn fc(home: &Path, tools: &FakeTools, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fc"));
    cmd.args(args)
        .env("HOME", home)
        .env("USER", "tester")
        .env("SHELL", "/bin/zsh");
    for (key, value) in tools.overrides() {
        cmd.env(key, value);
    }
    cmd
}

/// Recursive listing of a directory tree, sorted, for before/after
/// comparisons.
pub fn snapshot(root: &Path) -> Vec<String> {
    let mut entries = Vec::new();
    collect(root, root, &mut entries);
    entries.sort();
    entries
}

fn collect(root: &Path, dir: &Path, entries: &mut Vec<String>) {
    let Ok(read) = fs::read_dir(dir) else {
        return;
    };
    for entry in read.filter_map(Result::ok) {
        let path = entry.path();
        if let Ok(relative) = path.strip_prefix(root) {
            entries.push(relative.display().to_string());
        }
        if path.is_dir() && !path.is_symlink() {
            collect(root, &path, entries);
        }
    }
}
