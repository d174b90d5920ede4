use crate::config::{contract_id, source_account};
use anyhow::Result;
use escrow_cli::invoke::{invoke_args, InvokeTarget, LedgerCall, PayoutArg};
use escrow_cli::utils::{
    format_amount, parse_amount, truncate_address, validate_address, SorobanRpcClient,
};
use escrow_cli::{network_settings, Config, TargetArgs};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

const DEFAULT_WASM: &str = "target/wasm32v1-none/release/compliance_escrow.wasm";

pub struct DeployArgs {
    pub network: String,
    pub owner: String,
    pub authority: String,
    pub token: Option<String>,
    pub tax_oracle: Option<String>,
    pub wasm: Option<PathBuf>,
    pub source: Option<String>,
}

/// One row of a batch payout file, amount in whole token units.
#[derive(Debug, Deserialize)]
struct PayoutEntry {
    worker: String,
    amount: String,
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn run_soroban(args: &[String], message: &str) -> Result<String> {
    debug!("soroban {}", args.join(" "));

    let bar = spinner(message);
    let output = Command::new("soroban").args(args).output();
    bar.finish_and_clear();

    let output = output.map_err(|e| {
        error!("Could not run soroban CLI: {}", e);
        error!("Install with: cargo install --locked soroban-cli");
        anyhow::anyhow!("Soroban CLI not found")
    })?;

    if !output.status.success() {
        error!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        error!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        return Err(anyhow::anyhow!("soroban exited with {}", output.status));
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

pub async fn deploy_command(args: DeployArgs, config: &Config) -> Result<()> {
    info!("Deploying escrow to network: {}", args.network);

    let (rpc_url, network_passphrase) = network_settings(&args.network)?;
    validate_address(&args.owner)?;
    validate_address(&args.authority)?;

    let token = args
        .token
        .or_else(|| config.contract.token_id.clone())
        .ok_or_else(|| anyhow::anyhow!("No token contract ID provided"))?;
    validate_address(&token)?;

    let tax_oracle = args
        .tax_oracle
        .or_else(|| config.contract.tax_oracle_id.clone());
    if let Some(oracle) = &tax_oracle {
        validate_address(oracle)?;
    }

    let wasm_path = args.wasm.unwrap_or_else(|| PathBuf::from(DEFAULT_WASM));
    if !wasm_path.exists() {
        error!("WASM file not found: {:?}", wasm_path);
        return Err(anyhow::anyhow!(
            "WASM file not found. Please build the contract first."
        ));
    }

    let source = source_account(args.source, config)?;

    println!("Deploying contract with the following parameters:");
    println!("  Network: {}", args.network);
    println!("  Owner: {}", args.owner);
    println!("  Authority: {}", args.authority);
    println!("  Token: {}", token);
    println!(
        "  Tax oracle: {}",
        tax_oracle.as_deref().unwrap_or("Not set")
    );
    println!("  WASM file: {:?}", wasm_path);
    println!("  RPC URL: {}", rpc_url);
    println!();

    let wasm_str = wasm_path.to_string_lossy().into_owned();
    let deploy_args: Vec<String> = [
        "contract",
        "deploy",
        "--wasm",
        wasm_str.as_str(),
        "--source-account",
        &source,
        "--rpc-url",
        &rpc_url,
        "--network-passphrase",
        &network_passphrase,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let contract_id = run_soroban(&deploy_args, "Deploying contract...")
        .map_err(|e| anyhow::anyhow!("Contract deployment failed: {}", e))?;
    info!("Contract deployed successfully: {}", contract_id);
    println!("✅ Contract deployed successfully!");
    println!("Contract ID: {}", contract_id);

    let target = InvokeTarget {
        contract_id: contract_id.clone(),
        source,
        rpc_url,
        network_passphrase,
    };

    let initialize = LedgerCall::Initialize {
        owner: args.owner.clone(),
        authority: args.authority,
        token,
        tax_oracle: tax_oracle.clone(),
    };
    run_soroban(&invoke_args(&target, &initialize), "Initializing contract...")
        .map_err(|e| anyhow::anyhow!("Contract initialization failed: {}", e))?;
    info!("Contract initialized successfully");
    println!("✅ Contract initialized with owner: {}", args.owner);

    // Smoke check: the escrow reaches its oracle for its own liability
    if tax_oracle.is_some() {
        let smoke = LedgerCall::TaxLiability {
            account: contract_id,
        };
        match run_soroban(&invoke_args(&target, &smoke), "Querying tax oracle...") {
            Ok(raw) => println!(
                "Initial tax requirement for deployment: {}",
                render_result(&smoke, &raw, config.defaults.decimals)
            ),
            Err(e) => warn!("Tax oracle smoke check failed: {}", e),
        }
    }

    Ok(())
}

pub async fn ledger_command(target: TargetArgs, call: LedgerCall, config: &Config) -> Result<()> {
    let contract_id = contract_id(target.contract_id, config)?;
    let source = source_account(target.source, config)?;

    info!(
        "Invoking {} on {}",
        call.function(),
        truncate_address(&contract_id, 6)
    );

    let invoke_target = InvokeTarget {
        contract_id,
        source,
        rpc_url: config.network.rpc_url.clone(),
        network_passphrase: config.network.network_passphrase.clone(),
    };

    let raw = run_soroban(
        &invoke_args(&invoke_target, &call),
        &format!("Calling {}...", call.function()),
    )
    .map_err(|e| anyhow::anyhow!("Contract call {} failed: {}", call.function(), e))?;

    if call.is_read_only() {
        println!("{}", render_result(&call, &raw, config.defaults.decimals));
    } else {
        println!("✅ {} succeeded", call.function());
        if !raw.is_empty() {
            println!("Result: {}", render_result(&call, &raw, config.defaults.decimals));
        }
    }

    Ok(())
}

/// Reads a JSON payout file and converts amounts to base units.
pub async fn load_payouts(path: &Path, decimals: u32) -> Result<Vec<PayoutArg>> {
    let content = tokio::fs::read_to_string(path).await?;
    let entries: Vec<PayoutEntry> = serde_json::from_str(&content)?;
    if entries.is_empty() {
        return Err(anyhow::anyhow!("Payout file {} is empty", path.display()));
    }

    entries
        .into_iter()
        .map(|entry| {
            Ok(PayoutArg {
                amount: parse_amount(&entry.amount, decimals)?,
                worker: entry.worker,
            })
        })
        .collect()
}

fn render_result(call: &LedgerCall, raw: &str, decimals: u32) -> String {
    let unquoted = raw.trim_matches('"');
    match call {
        LedgerCall::Balance | LedgerCall::Batch { .. } | LedgerCall::TaxLiability { .. } => {
            match unquoted.parse::<i128>() {
                Ok(amount) => format_amount(amount, decimals),
                Err(_) if unquoted == "null" => "Not available (no tax oracle)".to_string(),
                Err(_) => raw.to_string(),
            }
        }
        LedgerCall::EmployerStatus { .. } => unquoted
            .trim_matches(|c| c == '[' || c == ']')
            .trim_matches('"')
            .to_string(),
        _ => unquoted.to_string(),
    }
}

pub async fn info_command(contract_id_arg: Option<String>, config: &Config) -> Result<()> {
    let contract_id = contract_id(contract_id_arg, config)?;

    info!("Getting contract information for: {}", contract_id);

    println!("Contract Information:");
    println!("  Contract ID: {}", contract_id);
    println!("  Network RPC: {}", config.network.rpc_url);
    println!("  Network Passphrase: {}", config.network.network_passphrase);
    println!(
        "  Token: {}",
        config.contract.token_id.as_deref().unwrap_or("Not set")
    );
    println!(
        "  Tax oracle: {}",
        config.contract.tax_oracle_id.as_deref().unwrap_or("Not set")
    );

    let output = Command::new("soroban")
        .args([
            "contract",
            "info",
            "interface",
            "--id",
            &contract_id,
            "--rpc-url",
            &config.network.rpc_url,
            "--network-passphrase",
            &config.network.network_passphrase,
        ])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            println!("\nContract Details:");
            println!("{}", String::from_utf8_lossy(&output.stdout));
        }
        Ok(output) => {
            warn!("Failed to get contract details:");
            warn!("{}", String::from_utf8_lossy(&output.stderr));
        }
        Err(e) => {
            warn!("Failed to get contract details: could not run soroban CLI: {}", e);
        }
    }

    Ok(())
}

pub async fn status_command(config: &Config) -> Result<()> {
    println!("Compliance Escrow CLI Status");
    println!("============================");
    println!();

    println!("Configuration:");
    println!("  Network RPC: {}", config.network.rpc_url);
    println!("  Network Passphrase: {}", config.network.network_passphrase);
    println!(
        "  Default Contract ID: {}",
        config
            .contract
            .default_contract_id
            .as_deref()
            .unwrap_or("Not set")
    );
    println!(
        "  Source Account: {}",
        source_account(None, config).unwrap_or_else(|_| "Not set".to_string())
    );
    println!();

    print!("Soroban CLI: ");
    match Command::new("soroban").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("✅ Available ({})", version.lines().next().unwrap_or("").trim());
        }
        Ok(_) => {
            println!("❌ Not working properly");
        }
        Err(_) => {
            println!("❌ Not found");
            println!("   Install with: cargo install --locked soroban-cli");
        }
    }

    print!("Contract WASM: ");
    if Path::new(DEFAULT_WASM).exists() {
        println!("✅ Built");
    } else {
        println!("❌ Not found");
        println!("   Build with: stellar contract build --package compliance_escrow");
    }

    print!("RPC endpoint: ");
    let health = match SorobanRpcClient::new(&config.network.rpc_url) {
        Ok(client) => client.get_health().await,
        Err(e) => Err(e),
    };
    match health {
        Ok(health) => match health.latest_ledger {
            Some(ledger) => println!("✅ {} (ledger {})", health.status, ledger),
            None => println!("✅ {}", health.status),
        },
        Err(e) => {
            debug!("RPC health check failed: {}", e);
            println!("❌ Unreachable");
        }
    }

    println!();
    println!("Ready to use Compliance Escrow CLI!");

    Ok(())
}
