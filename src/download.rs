use crate::error::{Result, SetupError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Stream `url` into `local_path`, replacing whatever is there.
///
/// A partially written file is removed again when the transfer fails.
pub async fn download_file(client: &reqwest::Client, url: &str, local_path: &Path) -> Result<()> {
    let download_error = |message: String| SetupError::Download {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_error(format!("unexpected HTTP status {}", status)));
    }

    let result = write_response(response, local_path)
        .await
        .map_err(|e| match e {
            WriteError::Stream(e) => download_error(e.to_string()),
            WriteError::Io(e) => SetupError::io(local_path, e),
        });

    if result.is_err() && local_path.exists() {
        if let Err(e) = fs::remove_file(local_path) {
            tracing::warn!(
                "Could not remove partial download {}: {}",
                local_path.display(),
                e
            );
        }
    }
    result
}

enum WriteError {
    Stream(reqwest::Error),
    Io(std::io::Error),
}

async fn write_response(
    response: reqwest::Response,
    local_path: &Path,
) -> std::result::Result<(), WriteError> {
    let total_size = response.content_length().unwrap_or(0);
    let filename = local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let pb = ProgressBar::new(total_size);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(format!("Downloading {}", filename));

    let mut file = fs::File::create(local_path).map_err(WriteError::Io)?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(WriteError::Stream)?;
        file.write_all(&chunk).map_err(WriteError::Io)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }
    file.flush().map_err(WriteError::Io)?;

    pb.finish_with_message("Download complete");
    tracing::debug!("Wrote {} bytes to {}", downloaded, local_path.display());
    Ok(())
}

/// Mark the file as `rwxr-xr-x`. Windows has no mode bits, so this is a no-op there.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .map_err(|e| SetupError::io(path, e))?
            .permissions();
        perms.set_mode(EXECUTABLE_MODE);
        fs::set_permissions(path, perms).map_err(|e| SetupError::io(path, e))?;
    }
    #[cfg(not(unix))]
    {
        tracing::trace!("Skipping chmod for {}", path.display());
    }
    Ok(())
}
