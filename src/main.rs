mod account;
mod api;
mod catalog;
mod cli;
mod commands;
mod config;
mod form;
mod models;
mod panel;
mod render;
mod session;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout is for command output
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    debug!("🏠 Estate portal against {}", config.api_url);

    commands::run(cli, config).await
}
