//! framecut
//!
//! Crop a region out of a video, or cut a time range out of it losslessly.
//!
//! # Usage
//!
//! ```bash
//! framecut crop -i video.mp4 --region 540x720+200+0
//! framecut trim -i video.mp4 --start 00:01:00 --end 00:02:00
//! framecut preview -i video.mp4 --at 50% --region 540x720+200+0
//! framecut inspect -i video.mp4 --format json
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use framecut_cli::app::DefaultAppContainer;
use framecut_cli::cli::{commands, Cli};
use framecut_cli::config_initialization::initialize_configuration;
use framecut_cli::ports::ConfigPort;
use framecut_cli::utils::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = initialize_configuration(&cli).context("Failed to load configuration")?;
    init_logging(&config.settings().logging).context("Failed to set up logging")?;

    if let Some(source) = config.source() {
        debug!("Loaded configuration from {}", source.display());
    }

    let container = DefaultAppContainer::new(Arc::new(config));
    commands::dispatch(&container, cli.command).await
}
