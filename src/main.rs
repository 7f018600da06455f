use anyhow::Context;
use clap::Parser;
use std::path::Path;

mod api;
mod cli;
mod core;
mod crypto;
mod generators;
mod logging;
mod models;

use crate::cli::Args;
use crate::core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load().context("Could not parse config, shutting down")?;
    args.apply(&mut config);

    logging::init(config.log_level);
    log::info!("Starting pwgen...");
    log::debug!("Loaded config: {:?}", config);

    api::start_server(config)
        .await
        .map_err(|e| {
            log::error!("Could not start app. Shutting down: {:#}", e);
            e
        })?;

    log::info!("pwgen gracefully shut down.");
    Ok(())
}
