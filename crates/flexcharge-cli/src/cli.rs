//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::contracts::ContractsCommand;
use crate::commands::orders::OrdersCommand;

/// Billercentral billing API exploration tool.
#[derive(Parser, Debug)]
#[command(name = "flexcharge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Path to the credentials file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Contract operations
    Contracts(ContractsCommand),

    /// Order operations
    Orders(OrdersCommand),
}
