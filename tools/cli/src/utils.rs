use crate::CliError;
use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub fn format_amount(amount: i128, decimals: u32) -> String {
    let Some(divisor) = 10_i128.checked_pow(decimals) else {
        return amount.to_string();
    };
    let sign = if amount < 0 { "-" } else { "" };
    let whole = (amount / divisor).abs();
    let fractional = (amount % divisor).abs();

    if fractional == 0 {
        format!("{}{}", sign, whole)
    } else {
        // Format with full precision, then remove trailing zeros
        let formatted = format!(
            "{}{}.{:0width$}",
            sign,
            whole,
            fractional,
            width = decimals as usize
        );
        formatted.trim_end_matches('0').to_string()
    }
}

/// Parses a positive decimal token amount into base units.
pub fn parse_amount(amount_str: &str, decimals: u32) -> Result<i128, CliError> {
    let invalid = || CliError::InvalidAmount(amount_str.to_string());
    let scale = 10_i128.checked_pow(decimals).ok_or_else(invalid)?;

    let (whole_str, fractional_str) = match amount_str.split_once('.') {
        Some((whole, fractional)) => (whole, fractional),
        None => (amount_str, ""),
    };
    if whole_str.is_empty() && fractional_str.is_empty() {
        return Err(invalid());
    }
    if fractional_str.len() > decimals as usize {
        return Err(invalid());
    }
    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !digits_only(whole_str) || !digits_only(fractional_str) {
        return Err(invalid());
    }

    let whole: i128 = if whole_str.is_empty() {
        0
    } else {
        whole_str.parse().map_err(|_| invalid())?
    };
    let fractional: i128 = if fractional_str.is_empty() {
        0
    } else {
        let raw: i128 = fractional_str.parse().map_err(|_| invalid())?;
        raw * 10_i128.pow(decimals - fractional_str.len() as u32)
    };

    let amount = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(fractional))
        .ok_or_else(invalid)?;
    if amount <= 0 {
        return Err(invalid());
    }
    Ok(amount)
}

/// Accepts account (`G...`) and contract (`C...`) strkeys.
pub fn validate_address(address: &str) -> Result<(), CliError> {
    let invalid = || CliError::InvalidAddress(address.to_string());

    if address.len() != 56 {
        return Err(invalid());
    }
    if !(address.starts_with('G') || address.starts_with('C')) {
        return Err(invalid());
    }
    if !address
        .chars()
        .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c))
    {
        return Err(invalid());
    }

    Ok(())
}

pub fn truncate_address(address: &str, chars: usize) -> String {
    let count = address.chars().count();
    if count <= chars * 2 {
        return address.to_string();
    }

    let head: String = address.chars().take(chars).collect();
    let tail: String = address.chars().skip(count - chars).collect();
    format!("{}...{}", head, tail)
}

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

/// Minimal JSON-RPC client for the Soroban RPC endpoint.
pub struct SorobanRpcClient {
    rpc_url: String,
    client: Client,
}

impl SorobanRpcClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(Self {
            rpc_url: rpc_url.to_string(),
            client,
        })
    }

    pub async fn get_health(&self) -> Result<HealthStatus> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getHealth",
        });
        let response: RpcResponse<HealthStatus> = self
            .client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        match (response.result, response.error) {
            (Some(health), _) => Ok(health),
            (None, Some(error)) => Err(anyhow::anyhow!("RPC error: {}", error)),
            (None, None) => Err(anyhow::anyhow!("Empty RPC response")),
        }
    }
}
