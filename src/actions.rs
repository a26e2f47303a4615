//! Talking back to the GitHub Actions runner.
//!
//! Outputs and path entries are appended to the files named by `GITHUB_OUTPUT` and
//! `GITHUB_PATH`. Older runners without those files get the equivalent workflow
//! commands on stdout instead.

use crate::config::VERSION_OUTPUT;
use crate::types::InstallOutcome;
use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";
pub const PATH_FILE_VAR: &str = "GITHUB_PATH";
const HEREDOC_DELIMITER: &str = "ghadelimiter_setup_render";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsRuntime {
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
}

impl ActionsRuntime {
    pub fn new(output_file: Option<PathBuf>, path_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            path_file,
        }
    }

    pub fn from_env() -> Self {
        let file_var = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self::new(file_var(OUTPUT_FILE_VAR), file_var(PATH_FILE_VAR))
    }

    /// Make the install visible to later steps: path entry first, then the version output.
    ///
    /// Both entries are formatted and both runner files opened before either is written.
    pub fn publish(&self, outcome: &InstallOutcome) -> Result<()> {
        let output = self.prepare_output(VERSION_OUTPUT, &outcome.version)?;
        let path = self.prepare_path(&outcome.install_dir)?;
        path.commit()?;
        output.commit()?;
        Ok(())
    }

    /// Mark the step as failed. The caller is responsible for the exit status.
    pub fn set_failed(&self, message: &str) {
        println!("{}", workflow_command("error", &[], message));
    }

    fn prepare_output(&self, name: &str, value: &str) -> Result<Entry> {
        match &self.output_file {
            Some(file) => Entry::file(file, format_output(name, value)?),
            None => Ok(Entry::Command(workflow_command(
                "set-output",
                &[("name", name)],
                value,
            ))),
        }
    }

    fn prepare_path(&self, dir: &Path) -> Result<Entry> {
        let dir = dir.to_string_lossy();
        match &self.path_file {
            Some(file) => Entry::file(file, format!("{}\n", dir)),
            None => Ok(Entry::Command(workflow_command("add-path", &[], &dir))),
        }
    }
}

/// A runner update that is ready to go out.
enum Entry {
    File {
        path: PathBuf,
        handle: File,
        content: String,
    },
    Command(String),
}

impl Entry {
    fn file(path: &Path, content: String) -> Result<Self> {
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Could not open runner file {}", path.display()))?;
        Ok(Entry::File {
            path: path.to_path_buf(),
            handle,
            content,
        })
    }

    fn commit(self) -> Result<()> {
        match self {
            Entry::File {
                path,
                mut handle,
                content,
            } => handle
                .write_all(content.as_bytes())
                .with_context(|| format!("Could not write to runner file {}", path.display())),
            Entry::Command(line) => {
                println!("{}", line);
                Ok(())
            }
        }
    }
}

/// Format one entry of the `GITHUB_OUTPUT` file.
pub fn format_output(name: &str, value: &str) -> Result<String> {
    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{}={}\n", name, value));
    }
    if name.contains(HEREDOC_DELIMITER) || value.contains(HEREDOC_DELIMITER) {
        bail!(
            "Output '{}' contains the reserved delimiter '{}'",
            name,
            HEREDOC_DELIMITER
        );
    }
    Ok(format!(
        "{name}<<{delim}\n{value}\n{delim}\n",
        name = name,
        delim = HEREDOC_DELIMITER,
        value = value
    ))
}

/// Render `::command key=value,...::message`.
pub fn workflow_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", command);
    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape_property(v)))
            .collect();
        line.push(' ');
        line.push_str(&props.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
