//! Installation module
//!
//! Resolves the requested render release, picks the asset for this machine,
//! downloads it into the runner's temporary directory and makes it executable.
//! Publishing the result to the runner is left to the caller.

pub mod github;

pub use github::ReleaseClient;

use crate::config::Settings;
use crate::download::{download_file, make_executable};
use crate::error::Result;
use crate::platform::{executable_name, find_asset_for_platform, map_platform};
use crate::types::InstallOutcome;
use std::path::{Path, PathBuf};

/// Where the binary lands for a mapped OS.
pub fn destination_path(install_dir: &Path, os: &str) -> PathBuf {
    install_dir.join(executable_name(os))
}

pub async fn install_render(settings: &Settings) -> Result<InstallOutcome> {
    tracing::info!("Requested version: {}", settings.requested_version);

    let client = ReleaseClient::new(&settings.api_url, &settings.github_token)?;
    let release = client.get_release(&settings.requested_version).await?;

    let platform = map_platform(&settings.platform);
    tracing::debug!(
        "Mapped platform {}/{} to {}/{}",
        settings.platform.os,
        settings.platform.arch,
        platform.os,
        platform.arch
    );

    let asset = find_asset_for_platform(&release.assets, &platform.os, &platform.arch)?;
    tracing::info!("Found asset: {}", asset.name);

    let path = destination_path(&settings.runner_temp, &platform.os);
    tracing::info!("Downloading from URL: {}", asset.download_url);
    tracing::info!("Saving to path: {}", path.display());

    download_file(client.http(), &asset.download_url, &path).await?;
    make_executable(&path)?;

    Ok(InstallOutcome {
        version: release.tag_name.clone(),
        asset_name: asset.name.clone(),
        install_dir: settings.runner_temp.clone(),
        path,
    })
}
