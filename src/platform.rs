use crate::error::{Result, SetupError};
use crate::types::*;

pub const BINARY_NAME: &str = "render";

/// Raw identifiers of the machine we are running on, before any mapping.
pub fn get_system_info() -> PlatformInfo {
    PlatformInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

/// Translate a raw architecture name into the one used by render's release assets.
///
/// Accepts both Node-style names (`x64`, `ia32`) and Rust target names (`x86_64`,
/// `aarch64`). Unknown values are returned unchanged.
pub fn map_arch(arch: &str) -> String {
    match arch {
        "ia32" | "x86" => "386".to_string(),
        "x64" | "x86_64" => "amd64".to_string(),
        "aarch64" => "arm64".to_string(),
        _ => arch.to_string(),
    }
}

/// Translate a raw operating system name into the one used by render's release assets.
pub fn map_os(os: &str) -> String {
    match os {
        "win32" => "windows".to_string(),
        "macos" => "darwin".to_string(),
        _ => os.to_string(),
    }
}

pub fn map_platform(raw: &PlatformInfo) -> PlatformInfo {
    PlatformInfo {
        os: map_os(&raw.os),
        arch: map_arch(&raw.arch),
    }
}

pub fn asset_suffix(os: &str, arch: &str) -> String {
    format!("{}-{}-{}", BINARY_NAME, os, arch)
}

/// Pick the release asset built for `os`/`arch` (already mapped).
///
/// The first asset in service order whose name ends with `render-{os}-{arch}` wins.
pub fn find_asset_for_platform<'a>(
    assets: &'a [GitHubAsset],
    os: &str,
    arch: &str,
) -> Result<&'a GitHubAsset> {
    let suffix = asset_suffix(os, arch);
    tracing::trace!("Looking for assets ending with '{}'", suffix);

    let mut matching = assets.iter().filter(|asset| asset.name.ends_with(&suffix));

    let asset = matching.next().ok_or_else(|| SetupError::AssetNotFound {
        os: os.to_string(),
        arch: arch.to_string(),
    })?;

    let ignored: Vec<&str> = matching.map(|a| a.name.as_str()).collect();
    if !ignored.is_empty() {
        tracing::warn!(
            "Multiple assets match '{}', using '{}' and ignoring: {}",
            suffix,
            asset.name,
            ignored.join(", ")
        );
    }

    Ok(asset)
}

/// File name the binary is saved under for a mapped OS.
pub fn executable_name(os: &str) -> String {
    if os == "windows" {
        format!("{}.exe", BINARY_NAME)
    } else {
        BINARY_NAME.to_string()
    }
}
