//! Order subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use flexcharge::{ContractId, OrderSync};

use crate::config::Settings;
use crate::output;

use super::load_customer;

#[derive(Args, Debug)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub command: OrdersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrdersSubcommand {
    /// List the orders of a contract
    List(ListArgs),

    /// Place a new order for a customer, replacing previous line-items
    Replace(ReplaceArgs),
}

pub async fn handle(cmd: OrdersCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        OrdersSubcommand::List(args) => list(args, settings).await,
        OrdersSubcommand::Replace(args) => replace(args, settings).await,
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Contract id
    pub contract_id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

async fn list(args: ListArgs, settings: &Settings) -> Result<()> {
    let orders = OrderSync::new(settings.authenticator()?);
    let page = orders
        .for_contract(&ContractId::new(&args.contract_id))
        .await
        .context("Failed to list orders")?;

    if page.items.is_empty() {
        eprintln!("{}", "No orders found.".dimmed());
        return Ok(());
    }

    output::json(&page, args.pretty)
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Path to a customer JSON file
    #[arg(long)]
    pub customer_file: PathBuf,
}

async fn replace(args: ReplaceArgs, settings: &Settings) -> Result<()> {
    let customer = load_customer(&args.customer_file)?;

    eprintln!("{}", "Replacing order...".dimmed());

    let orders = OrderSync::new(settings.authenticator()?);
    orders
        .replace_for_contract(&customer)
        .await
        .context("Failed to replace order")?;

    output::success("Order placed");
    Ok(())
}
