use crate::platform::get_system_info;
use crate::types::PlatformInfo;
use clap::Parser;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("SETUP_RENDER_GIT_TAG") {
        return tag;
    }

    // Not on a tag - include commit hash and branch (dev build)
    let commit = option_env!("SETUP_RENDER_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("SETUP_RENDER_GIT_BRANCH").unwrap_or("unknown");

    // Leaked once at startup to satisfy clap's &'static str
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser, Debug)]
#[command(name = "setup-render")]
#[command(about = "Installs a VirtusLab/render release binary in a GitHub Actions job")]
#[command(version = get_version())]
#[command(
    after_help = "Examples:\n  setup-render\n  setup-render --render-version v0.1.4\n  INPUT_RENDER-VERSION=latest setup-render -v"
)]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Release tag to install, or 'latest'
    #[arg(long, env = "INPUT_RENDER-VERSION", value_name = "VERSION")]
    pub render_version: Option<String>,

    /// Override the detected operating system (e.g. 'linux', 'win32')
    #[arg(long, env = "SETUP_RENDER_OS", value_name = "OS")]
    pub os: Option<String>,

    /// Override the detected architecture (e.g. 'x64', 'arm64')
    #[arg(long, env = "SETUP_RENDER_ARCH", value_name = "ARCH")]
    pub arch: Option<String>,
}

impl Cli {
    /// Raw platform identifiers: overrides first, then the host.
    pub fn platform(&self) -> PlatformInfo {
        let host = get_system_info();
        PlatformInfo {
            os: self.os.clone().unwrap_or(host.os),
            arch: self.arch.clone().unwrap_or(host.arch),
        }
    }
}
