//! Shared helpers for funcstack CLI tests.
//!
//! `TestEnv` runs the binary in an isolated project directory with its own
//! config home, no inherited `TF_VAR_*` or `FUNCSTACK_*` variables, and
//! colors disabled.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Vars file for the orders scenario
pub const ORDERS_VARS: &str = r#"{
  "project_name": "orders",
  "direction": "finance",
  "project_id": "prj-fin-01",
  "notification_channels": ["projects/prj-fin-01/notificationChannels/42"],
  "schedule": "0 6 * * *"
}
"#;

/// Stack document path for the default stack name
pub const DEFAULT_STACK_FILE: &str = "cdktf.out/stacks/gcp-function/cdk.tf.json";

#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as a JSON event
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad event {l:?}: {e}")))
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().unwrap(),
            config_home: TempDir::new().unwrap(),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_funcstack")),
        }
    }

    /// Environment with `orders.json` written to the project
    pub fn with_orders_vars() -> Self {
        let env = Self::new();
        env.write("orders.json", ORDERS_VARS);
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("reading {relative}: {e}"))
    }

    pub fn read_json(&self, relative: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(relative)).unwrap()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env("NO_COLOR", "1")
            .env_remove("FUNCSTACK_LOG");

        for (key, _) in std::env::vars() {
            if key.starts_with("TF_VAR_") || key.starts_with("FUNCSTACK_") {
                cmd.env_remove(key);
            }
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute funcstack");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }
}
