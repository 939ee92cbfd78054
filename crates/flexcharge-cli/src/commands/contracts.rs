//! Contract subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use flexcharge::{ContractForm, ContractId, ContractSync, Error};

use crate::config::Settings;
use crate::output;

use super::{load_customer, parse_param};

#[derive(Args, Debug)]
pub struct ContractsCommand {
    #[command(subcommand)]
    pub command: ContractsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContractsSubcommand {
    /// List contracts
    List(ListArgs),

    /// Fetch a single contract
    Get(GetArgs),

    /// Show the available list filters
    Filters(FiltersArgs),

    /// Create or update the contract for a customer
    Sync(SyncArgs),

    /// Delete a contract
    Delete(DeleteArgs),
}

pub async fn handle(cmd: ContractsCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        ContractsSubcommand::List(args) => list(args, settings).await,
        ContractsSubcommand::Get(args) => get(args, settings).await,
        ContractsSubcommand::Filters(args) => filters(args, settings).await,
        ContractsSubcommand::Sync(args) => sync(args, settings).await,
        ContractsSubcommand::Delete(args) => delete(args, settings).await,
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter parameters as key=value pairs
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

async fn list(args: ListArgs, settings: &Settings) -> Result<()> {
    let parameters = args
        .params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<Vec<_>>>()?;

    let contracts = ContractSync::new(settings.authenticator()?);
    let payload = contracts
        .list(&parameters)
        .await
        .context("Failed to list contracts")?;

    output::json(&payload, args.pretty)
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Contract id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

async fn get(args: GetArgs, settings: &Settings) -> Result<()> {
    let contracts = ContractSync::new(settings.authenticator()?);
    let payload = contracts
        .get(&ContractId::new(&args.id))
        .await
        .context("Failed to get contract")?;

    output::json(&payload, args.pretty)
}

#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

async fn filters(args: FiltersArgs, settings: &Settings) -> Result<()> {
    let contracts = ContractSync::new(settings.authenticator()?);
    let payload = contracts
        .filters()
        .await
        .context("Failed to get contract filters")?;

    output::json(&payload, args.pretty)
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to a customer JSON file
    #[arg(long)]
    pub customer_file: PathBuf,
}

async fn sync(args: SyncArgs, settings: &Settings) -> Result<()> {
    let customer = load_customer(&args.customer_file)?;

    eprintln!("{}", "Reconciling contract...".dimmed());

    let contracts = ContractSync::new(settings.authenticator()?);
    let mut form = ContractForm::new();

    match contracts.reconcile(&customer, &mut form).await {
        Ok(contract_id) => {
            output::success("Contract reconciled");
            println!();
            output::field("Contract id", contract_id.as_str());
            Ok(())
        }
        Err(Error::Api(api)) => {
            output::error(&format!("Contract rejected (HTTP {})", api.status));
            for message in form.errors() {
                output::error(message);
            }
            anyhow::bail!("Contract reconciliation failed");
        }
        Err(e) => Err(e).context("Failed to reconcile contract"),
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Contract id
    pub id: String,
}

async fn delete(args: DeleteArgs, settings: &Settings) -> Result<()> {
    let contracts = ContractSync::new(settings.authenticator()?);
    contracts
        .delete(&ContractId::new(&args.id))
        .await
        .context("Failed to delete contract")?;

    output::success("Contract deleted");
    Ok(())
}
