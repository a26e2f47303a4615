use std::path::PathBuf;
use thiserror::Error;

/// Every way a setup run can fail. Only `main` turns one of these into a failed step.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{0}")]
    Configuration(String),

    #[error("Could not find release for version '{version}': {message}")]
    ReleaseLookup { version: String, message: String },

    #[error("Could not find asset for platform={os}, arch={arch}")]
    AssetNotFound { os: String, arch: String },

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Runtime(#[from] anyhow::Error),
}

impl SetupError {
    pub fn release_lookup(version: &str, cause: impl std::fmt::Display) -> Self {
        SetupError::ReleaseLookup {
            version: version.to_string(),
            message: cause.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SetupError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = SetupError> = std::result::Result<T, E>;
