use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod invoke;
pub mod utils;

/// Stellar assets carry 7 decimal places.
pub const DEFAULT_DECIMALS: u32 = 7;

/// Largest scale whose power of ten still fits in an i128.
pub const MAX_DECIMALS: u32 = 38;

#[derive(Parser)]
#[command(name = "escrow-cli")]
#[command(about = "CLI tool for compliance escrow contract management")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "~/.compliance-escrow/config.toml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Contract and signer selection shared by every ledger command.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Escrow contract ID (defaults to contract.default_contract_id)
    #[arg(long)]
    pub contract_id: Option<String>,

    /// Signing identity passed to soroban as --source-account
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy and initialize a new escrow contract
    Deploy {
        /// Network to deploy to
        #[arg(long, default_value = "testnet")]
        network: String,

        /// Owner address; the only identity allowed to process payroll
        #[arg(long)]
        owner: String,

        /// First tax authority address
        #[arg(long)]
        authority: String,

        /// Settlement token contract ID (defaults to contract.token_id)
        #[arg(long)]
        token: Option<String>,

        /// Tax oracle contract ID (defaults to contract.tax_oracle_id)
        #[arg(long)]
        tax_oracle: Option<String>,

        /// WASM file path
        #[arg(long)]
        wasm: Option<PathBuf>,

        /// Signing identity
        #[arg(long)]
        source: Option<String>,
    },

    /// Deposit into the payroll pool
    Fund {
        #[command(flatten)]
        target: TargetArgs,
        /// Funding employer
        #[arg(long)]
        employer: String,
        /// Amount in whole token units, e.g. 12.5
        #[arg(long)]
        amount: String,
    },

    /// Disburse payroll to a worker (owner only)
    Process {
        #[command(flatten)]
        target: TargetArgs,
        /// Owner address
        #[arg(long)]
        caller: String,
        #[arg(long)]
        worker: String,
        #[arg(long)]
        amount: String,
    },

    /// Disburse a batch of payouts read from a JSON file (owner only)
    Batch {
        #[command(flatten)]
        target: TargetArgs,
        /// Owner address
        #[arg(long)]
        caller: String,
        /// JSON array of {"worker": "...", "amount": "..."}
        #[arg(long)]
        payouts: PathBuf,
    },

    /// Withdraw from the pool as a certified worker
    Withdraw {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        worker: String,
        #[arg(long)]
        amount: String,
    },

    /// Certify a worker as tax compliant (authority only)
    MarkCompliant {
        #[command(flatten)]
        target: TargetArgs,
        /// Authority address
        #[arg(long)]
        caller: String,
        #[arg(long)]
        worker: String,
    },

    /// Penalize an employer (authority only)
    Penalize {
        #[command(flatten)]
        target: TargetArgs,
        /// Authority address
        #[arg(long)]
        caller: String,
        #[arg(long)]
        employer: String,
    },

    /// Show an employer's standing
    EmployerStatus {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        employer: String,
    },

    /// Show the pooled balance
    Balance {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show the contract owner
    Owner {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Query the advisory tax liability of an account
    TaxLiability {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        account: String,
    },

    /// Get contract information
    Info {
        /// Contract ID to inspect
        #[arg(long)]
        contract_id: Option<String>,
    },

    /// Show CLI status
    Status,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid decimals: {0} (at most {max})", max = MAX_DECIMALS)]
    InvalidDecimals(u32),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("No contract ID provided")]
    MissingContractId,

    #[error("No source account found. Set ESCROW_SOURCE_ACCOUNT or add auth.source_account to the config file")]
    MissingSourceAccount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub auth: AuthConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    pub default_contract_id: Option<String>,
    pub tax_oracle_id: Option<String>,
    pub token_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub source_account: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub decimals: u32,
}

/// RPC endpoint and passphrase of a well-known network.
pub fn network_settings(network: &str) -> Result<(String, String), CliError> {
    match network {
        "testnet" => Ok((
            "https://soroban-testnet.stellar.org:443".to_string(),
            "Test SDF Network ; September 2015".to_string(),
        )),
        "futurenet" => Ok((
            "https://rpc-futurenet.stellar.org:443".to_string(),
            "Test SDF Future Network ; October 2022".to_string(),
        )),
        "mainnet" => Ok((
            "https://soroban-mainnet.stellar.org:443".to_string(),
            "Public Global Stellar Network ; September 2015".to_string(),
        )),
        "local" => Ok((
            "http://localhost:8000/soroban/rpc".to_string(),
            "Standalone Network ; February 2017".to_string(),
        )),
        _ => Err(CliError::UnknownNetwork(network.to_string())),
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), CliError> {
        if self.defaults.decimals > MAX_DECIMALS {
            return Err(CliError::InvalidDecimals(self.defaults.decimals));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                rpc_url: "https://soroban-testnet.stellar.org:443".to_string(),
                network_passphrase: "Test SDF Network ; September 2015".to_string(),
            },
            contract: ContractConfig {
                default_contract_id: None,
                tax_oracle_id: None,
                token_id: None,
            },
            auth: AuthConfig {
                source_account: None,
            },
            defaults: DefaultsConfig {
                decimals: DEFAULT_DECIMALS,
            },
        }
    }
}
