//! Test harness that runs the jabcolor binary in a scratch directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// A scratch directory plus helpers to run the CLI against it
pub struct TestApp {
    dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Absolute path of `name` inside the scratch directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the scratch directory and return its path
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.path(name)).expect("Failed to read output")
    }

    /// Run the binary with `args`, ignoring any config from the environment
    pub fn run(&self, args: &[&str]) -> CliOutput {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &Path)]) -> CliOutput {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_jabcolor"));
        cmd.args(args)
            .current_dir(self.dir.path())
            .env_remove("JABCOLOR_CONFIG")
            .env_remove("RUST_LOG");
        for (key, value) in env {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to run jabcolor");
        CliOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Captured result of one CLI invocation
#[derive(Debug)]
pub struct CliOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("Failed to parse stdout as JSON")
    }
}
