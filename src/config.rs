use crate::error::{Result, SetupError};
use crate::types::PlatformInfo;
use std::path::PathBuf;

pub const APP_NAME: &str = "setup-render";
pub const REPO_OWNER: &str = "VirtusLab";
pub const REPO_NAME: &str = "render";
pub const DEFAULT_VERSION: &str = "latest";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const VERSION_OUTPUT: &str = "render-version";

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const RUNNER_TEMP_VAR: &str = "RUNNER_TEMP";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Everything the install pipeline needs, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub github_token: String,
    pub runner_temp: PathBuf,
    pub api_url: String,
    pub requested_version: String,
    /// Raw (unmapped) platform identifiers
    pub platform: PlatformInfo,
}

impl Settings {
    pub fn from_env(version: Option<&str>, platform: PlatformInfo) -> Result<Self> {
        Self::load(version, platform, |key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Fails before anything touches the network when the credential or the
    /// temporary workspace is missing.
    pub fn load<F>(version: Option<&str>, platform: PlatformInfo, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = non_empty(var(TOKEN_VAR)).ok_or_else(|| {
            SetupError::Configuration(format!(
                "{} environment variable is required to fetch releases from GitHub.",
                TOKEN_VAR
            ))
        })?;

        let runner_temp = non_empty(var(RUNNER_TEMP_VAR))
            .map(PathBuf::from)
            .ok_or_else(|| {
                SetupError::Configuration(format!(
                    "{} environment variable is required to know where to install {}.",
                    RUNNER_TEMP_VAR, REPO_NAME
                ))
            })?;
        if !runner_temp.is_dir() {
            return Err(SetupError::Configuration(format!(
                "{} points to '{}', which is not an existing directory.",
                RUNNER_TEMP_VAR,
                runner_temp.display()
            )));
        }

        let api_url = non_empty(var(API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let settings = Settings {
            github_token,
            runner_temp,
            api_url,
            requested_version: requested_version(version),
            platform,
        };
        tracing::debug!(
            "Loaded settings: api_url={}, runner_temp={}, platform={}/{}",
            settings.api_url,
            settings.runner_temp.display(),
            settings.platform.os,
            settings.platform.arch
        );
        Ok(settings)
    }
}

/// Unset or blank input means the latest release.
pub fn requested_version(input: Option<&str>) -> String {
    input
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_VERSION)
        .to_string()
}

/// Trimmed value, or `None` when unset or blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
