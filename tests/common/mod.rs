//! Common test utilities for keel CLI tests.
//!
//! `TestEnv` gives each test an isolated project directory and home, and
//! runs the built `keel` binary inside it.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Manifest with one required input, one defaulted input and two nodes
pub const WEB_MANIFEST: &str = r#"
inputs:
  region:
    required: true
  name:
    default: demo
nodes:
  - name: web
    requires: [db]
  - name: db
"#;

pub const EU_INPUTS: &str = "region: eu-west-1\n";

/// Result of running a keel CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project and home directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    env: Vec<(String, String)>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
            env: Vec::new(),
        }
    }

    /// Project with `app.yaml` and `inputs.yaml` in place
    pub fn with_web_manifest() -> Self {
        let env = Self::new();
        env.write("app.yaml", WEB_MANIFEST);
        env.write("inputs.yaml", EU_INPUTS);
        env
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Path inside the default instance store
    pub fn store_path(&self, key: &str) -> PathBuf {
        self.project_path(".keel").join(key)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read_store(&self, key: &str) -> String {
        fs::read_to_string(self.store_path(key)).unwrap()
    }

    pub fn stored_json(&self, key: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_store(key)).unwrap()
    }

    /// Run keel with stdin closed
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self.command(args).output().expect("Failed to execute keel");
        TestResult::from_output(output)
    }

    /// Run keel with `input` piped to stdin
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> TestResult {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn keel");
        if let Some(mut stdin) = child.stdin.take() {
            // The process may exit before reading everything.
            let _ = stdin.write_all(input.as_bytes());
        }
        TestResult::from_output(child.wait_with_output().unwrap())
    }

    fn command(&self, args: &[&str]) -> Command {
        let home = self.home_dir.path();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_keel"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("RUST_LOG");
        for key in [
            "KEEL_INSTANCE_PATH",
            "KEEL_WORKERS",
            "KEEL_ASSUME_YES",
            "KEEL_VERBOSITY",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Every file under `dir`, relative path to content
pub fn snapshot_dir(dir: &Path) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    collect(dir, dir, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap().to_path_buf();
            files.push((relative, fs::read_to_string(&path).unwrap_or_default()));
        }
    }
}
