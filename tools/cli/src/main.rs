use anyhow::Result;
use clap::Parser;
use std::process;

mod commands;
mod config;

use commands::*;
use config::*;
use escrow_cli::invoke::LedgerCall;
use escrow_cli::utils::parse_amount;
use escrow_cli::{Cli, Commands, Config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    let decimals = config.defaults.decimals;

    match command {
        Commands::Deploy {
            network,
            owner,
            authority,
            token,
            tax_oracle,
            wasm,
            source,
        } => {
            let args = DeployArgs {
                network,
                owner,
                authority,
                token,
                tax_oracle,
                wasm,
                source,
            };
            deploy_command(args, config).await
        }
        Commands::Fund {
            target,
            employer,
            amount,
        } => {
            let amount = parse_amount(&amount, decimals)?;
            ledger_command(target, LedgerCall::Fund { employer, amount }, config).await
        }
        Commands::Process {
            target,
            caller,
            worker,
            amount,
        } => {
            let amount = parse_amount(&amount, decimals)?;
            let call = LedgerCall::Process {
                caller,
                worker,
                amount,
            };
            ledger_command(target, call, config).await
        }
        Commands::Batch {
            target,
            caller,
            payouts,
        } => {
            let payouts = load_payouts(&payouts, decimals).await?;
            ledger_command(target, LedgerCall::Batch { caller, payouts }, config).await
        }
        Commands::Withdraw {
            target,
            worker,
            amount,
        } => {
            let amount = parse_amount(&amount, decimals)?;
            ledger_command(target, LedgerCall::Withdraw { worker, amount }, config).await
        }
        Commands::MarkCompliant {
            target,
            caller,
            worker,
        } => ledger_command(target, LedgerCall::MarkCompliant { caller, worker }, config).await,
        Commands::Penalize {
            target,
            caller,
            employer,
        } => ledger_command(target, LedgerCall::Penalize { caller, employer }, config).await,
        Commands::EmployerStatus { target, employer } => {
            ledger_command(target, LedgerCall::EmployerStatus { employer }, config).await
        }
        Commands::Balance { target } => ledger_command(target, LedgerCall::Balance, config).await,
        Commands::Owner { target } => ledger_command(target, LedgerCall::Owner, config).await,
        Commands::TaxLiability { target, account } => {
            ledger_command(target, LedgerCall::TaxLiability { account }, config).await
        }
        Commands::Info { contract_id } => info_command(contract_id, config).await,
        Commands::Status => status_command(config).await,
    }
}
