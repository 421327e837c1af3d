use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use health_dashboard_data::{ApiClient, FileSessionStore};

mod cli;
mod commands;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    let dotenv_loaded = dotenv().is_ok();

    // Logs go to stderr so command output stays clean
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    if !dotenv_loaded {
        debug!(".env file not found, using process environment");
    }

    let cli = Cli::parse();
    let config = cli.client_config();
    debug!("Using API at {} with session file {}", config.base_url, config.session_path.display());

    let store = Arc::new(FileSessionStore::new(&config.session_path));
    let client = ApiClient::new(&config, store).context("Failed to create API client")?;

    let output = commands::run(cli.command, client).await?;
    println!("{}", output);

    Ok(())
}
