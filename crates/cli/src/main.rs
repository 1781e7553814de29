use anyhow::{Context, Result};
use clap::Parser;
use client_records_cli::commands::{Cli, Command};
use client_records_cli::{config, logging};
use persistence::ClientStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load(&cli.overrides())?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!(
        "Starting client records v{} (database {})",
        env!("CARGO_PKG_VERSION"),
        config.database.name
    );

    // Create database and schema if needed, then connect to it
    let mut store = ClientStore::connect(&config.database)
        .await
        .context("Client store initialization failed")?;
    info!(database = store.database(), "Connected to client store");

    cli.command
        .unwrap_or(Command::Demo)
        .run(&mut store)
        .await?;

    store.close().await?;
    Ok(())
}
