use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables the runner (or a developer shell) may have set that would leak into the binary.
const INHERITED_VARS: &[&str] = &[
    "GITHUB_TOKEN",
    "GITHUB_API_URL",
    "GITHUB_OUTPUT",
    "GITHUB_PATH",
    "RUNNER_TEMP",
    "RUNNER_DEBUG",
    "RUST_LOG",
    "INPUT_RENDER-VERSION",
    "SETUP_RENDER_OS",
    "SETUP_RENDER_ARCH",
];

// Not every test binary uses every helper.
#[allow(dead_code)]
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub runner_temp: PathBuf,
    pub output_file: PathBuf,
    pub path_file: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let runner_temp = temp_dir.path().join("runner_temp");
        fs::create_dir_all(&runner_temp).expect("Failed to create runner temp dir");
        let output_file = temp_dir.path().join("github_output");
        let path_file = temp_dir.path().join("github_path");

        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_setup-render"));

        Self {
            _temp_dir: temp_dir,
            runner_temp,
            output_file,
            path_file,
            bin_path,
        }
    }

    /// A command with no runner environment at all.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command set up like a GitHub Actions step talking to `api_url`.
    pub fn cmd(&self, api_url: &str) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.env("GITHUB_TOKEN", "t0ken");
        cmd.env("GITHUB_API_URL", api_url);
        cmd.env("RUNNER_TEMP", &self.runner_temp);
        cmd.env("GITHUB_OUTPUT", &self.output_file);
        cmd.env("GITHUB_PATH", &self.path_file);
        cmd
    }

    pub fn outputs(&self) -> Option<String> {
        fs::read_to_string(&self.output_file).ok()
    }

    pub fn paths(&self) -> Option<String> {
        fs::read_to_string(&self.path_file).ok()
    }
}

/// Release JSON with one asset per name, each downloadable from `{base_url}/dl/{name}`.
#[allow(dead_code)]
pub fn release_body(tag: &str, base_url: &str, asset_names: &[&str]) -> String {
    let assets: Vec<serde_json::Value> = asset_names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "browser_download_url": format!("{}/dl/{}", base_url, name),
            })
        })
        .collect();
    serde_json::json!({ "tag_name": tag, "assets": assets }).to_string()
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        if self.status.success() {
            panic!(
                "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
        assert_eq!(self.status.code(), Some(1), "expected exit status 1");
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
