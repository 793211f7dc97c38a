//! Test environment builder for isolated swatch runs.
//!
//! `TestEnv` owns a temporary project directory and a temporary home so the
//! user config layer never leaks in from the machine running the tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use tempfile::TempDir;

use super::fixtures::{DESIGN_DUMP, PNG_BYTES};

/// Result of running a swatch CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_swatch")),
        }
    }

    /// Project with the reference design dump and its slice
    pub fn with_design() -> Self {
        let env = Self::new();
        env.write_project_file("design.json", DESIGN_DUMP);
        env.write_project_bytes("assets/slices/pin.png", PNG_BYTES);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Path of the user config layer inside the isolated home
    pub fn user_config_path(&self) -> PathBuf {
        let config_dir = if cfg!(target_os = "macos") {
            "Library/Application Support"
        } else {
            ".config"
        };
        self.home_dir
            .path()
            .join(config_dir)
            .join("swatch/config.toml")
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        self.write_project_bytes(relative, content.as_bytes());
    }

    pub fn write_project_bytes(&self, relative: &str, content: &[u8]) {
        write(&self.project_path(relative), content);
    }

    pub fn write_user_config(&self, content: &str) {
        write(&self.user_config_path(), content.as_bytes());
    }

    pub fn read_project_file(&self, relative: &str) -> String {
        fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Run swatch from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute swatch");
        to_result(output)
    }

    /// Start swatch without waiting for it
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn swatch")
    }

    fn command(&self, args: &[&str]) -> Command {
        let home = self.home_dir.path();
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", home)
            .env("USERPROFILE", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("SWATCH_SKIP_TOOLCHAIN_CHECK", "1")
            .env_remove("SWATCH_TARGETS")
            .env_remove("SWATCH_OUTPUT_DIR")
            .env_remove("SWATCH_HOT_ADDR")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(path, content).expect("Failed to write file");
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
