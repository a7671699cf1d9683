//! TestWorld pattern for declarative integration test setup.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use rollcall_runtime::{Config, Rollcall};
use rollcall_types::ClassId;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use rollcall_testing::TestWorld;
///
/// let world = TestWorld::new().with_demo_class("demo");
/// let result = world.run(&["roster", "show", "--class", "demo"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".rollcall");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Seed the sample class directly through the runtime, no CLI round trip.
    pub fn with_demo_class(self, class: &str) -> Self {
        let workspace = self.workspace().expect("Failed to open workspace");
        let class: ClassId = class.parse().expect("Invalid class id");
        workspace.seed_demo(&class).expect("Failed to seed demo class");
        self
    }

    /// Write config.toml into the data directory.
    pub fn with_config(self, config: &Config) -> Self {
        config
            .save_to(&Config::path_in(&self.data_dir))
            .expect("Failed to write config");
        self
    }

    /// Open the data directory the CLI under test uses
    pub fn workspace(&self) -> Result<Rollcall> {
        Ok(Rollcall::open(self.data_dir.clone())?)
    }

    /// Point a base command at this world's data directory.
    ///
    /// Ambient `ROLLCALL_*` and `RUST_LOG` variables are cleared so the
    /// developer's environment never leaks into a test.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env_remove("ROLLCALL_PATH")
            .env_remove("ROLLCALL_LOG")
            .env_remove("RUST_LOG")
            .env("USER", "tester")
            .arg("--data-dir")
            .arg(&self.data_dir);
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Base command for assert_cmd style assertions
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("rollcall").expect("Failed to find rollcall binary");
        self.configure_command(&mut cmd);
        cmd
    }

    /// Run the CLI with `args` and capture its output.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("rollcall")
            .map_err(|e| anyhow::anyhow!("Failed to find rollcall binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// `run` with `--format json` appended, parsed
    pub fn run_json(&self, args: &[&str]) -> Result<serde_json::Value> {
        let mut full = args.to_vec();
        full.extend(["--format", "json"]);
        let result = self.run(&full)?;
        if !result.success() {
            anyhow::bail!("rollcall {:?} failed: {}", args, result.stderr);
        }
        result.json()
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
