mod actions;
mod cli;
mod config;
mod download;
mod error;
mod install;
mod platform;
mod types;

use actions::ActionsRuntime;
use anyhow::anyhow;
use clap::Parser;
use cli::Cli;
use config::Settings;
use error::Result;
use install::install_render;
use std::process::ExitCode;
use types::InstallOutcome;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    if let Err(e) = setup_logging(&cli) {
        eprintln!("{}", e);
    }

    let runtime = ActionsRuntime::from_env();

    match setup(&cli, &runtime).await {
        Ok(outcome) => {
            tracing::debug!(
                "Installed {} to {}",
                outcome.asset_name,
                outcome.path.display()
            );
            tracing::info!("Render version {} installed successfully.", outcome.version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("Setup failed: {:?}", e);
            runtime.set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// The whole run: nothing is published unless the install itself succeeded.
async fn setup(cli: &Cli, runtime: &ActionsRuntime) -> Result<InstallOutcome> {
    let settings = Settings::from_env(cli.render_version.as_deref(), cli.platform())?;
    let outcome = install_render(&settings).await?;
    runtime.publish(&outcome)?;
    Ok(outcome)
}

fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let level = log_level(cli.quiet, cli.verbose, runner_debug);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow!("Could not initialise logging: {}", e))?;

    Ok(())
}

/// Progress notices are `info`, so that is the floor unless asked to be quiet.
fn log_level(quiet: bool, verbose: u8, runner_debug: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose >= 2 {
        "trace"
    } else if verbose == 1 || runner_debug {
        "debug"
    } else {
        "info"
    }
}
