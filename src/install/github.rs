//! GitHub API interaction module
//!
//! Resolves a requested render version to a release record.

use crate::config::{APP_NAME, DEFAULT_VERSION, REPO_NAME, REPO_OWNER};
use crate::error::{Result, SetupError};
use crate::types::GitHubRelease;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use thiserror::Error;

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Error)]
pub enum GitHubReleaseError {
    #[error("Release tag '{version}' not found in {repo}")]
    TagNotFound { repo: String, version: String },
    #[error("No releases found for {repo}")]
    LatestNotFound { repo: String },
    #[error("GitHub API request failed: {status} - {body}")]
    RequestFailed { status: StatusCode, body: String },
    #[error("Release data is empty or malformed: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Invalid GitHub API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Build GitHub API URL for fetching release information
///
/// # Arguments
/// * `api_url` - API root, e.g. "https://api.github.com"
/// * `repo` - Repository in format "owner/repo"
/// * `version` - "latest" or an exact tag, sent as a single percent-encoded path segment
pub fn build_gh_release_url(
    api_url: &str,
    repo: &str,
    version: &str,
) -> Result<Url, GitHubReleaseError> {
    let invalid = |reason: String| GitHubReleaseError::InvalidApiUrl {
        url: api_url.to_string(),
        reason,
    };

    let mut url = Url::parse(api_url).map_err(|e| invalid(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".to_string()))?;
        segments
            .pop_if_empty()
            .push("repos")
            .extend(repo.split('/'))
            .push("releases");
        if version == DEFAULT_VERSION {
            segments.push("latest");
        } else {
            segments.push("tags").push(version);
        }
    }
    Ok(url)
}

pub struct ReleaseClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
    repo: String,
}

impl ReleaseClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SetupError::Runtime(anyhow::Error::new(e).context("Failed to build HTTP client"))
            })?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            repo: format!("{}/{}", REPO_OWNER, REPO_NAME),
        })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Fetch the release for `version` ("latest" or an exact tag).
    pub async fn get_release(&self, version: &str) -> Result<GitHubRelease> {
        self.fetch_release(version)
            .await
            .map_err(|e| SetupError::release_lookup(version, e))
    }

    async fn fetch_release(&self, version: &str) -> Result<GitHubRelease, GitHubReleaseError> {
        let url = build_gh_release_url(&self.api_url, &self.repo, version)?;
        tracing::debug!("Fetching GitHub release info from: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                if version == DEFAULT_VERSION {
                    return Err(GitHubReleaseError::LatestNotFound {
                        repo: self.repo.clone(),
                    });
                }
                return Err(GitHubReleaseError::TagNotFound {
                    repo: self.repo.clone(),
                    version: version.to_string(),
                });
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(GitHubReleaseError::RequestFailed { status, body });
        }

        let body = response.text().await?;
        let release: GitHubRelease = serde_json::from_str(&body)?;
        tracing::debug!(
            "Resolved release {} with {} asset(s)",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }
}
