//! flexcharge - CLI tool for the Billercentral billing API.
//!
//! This is a thin wrapper over the `flexcharge` library, intended for
//! manual exploration and debugging against the billing API. Every
//! invocation authenticates afresh; sessions are never persisted.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{contracts, orders};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let settings = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Contracts(cmd) => contracts::handle(cmd, &settings).await,
        Commands::Orders(cmd) => orders::handle(cmd, &settings).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
