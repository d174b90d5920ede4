use anyhow::Result;
use escrow_cli::{CliError, Config};
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const SOURCE_ACCOUNT_ENV: &str = "ESCROW_SOURCE_ACCOUNT";

pub async fn load_config(config_path: &Path) -> Result<Config> {
    let expanded_path = expand_home(config_path)?;

    if !expanded_path.exists() {
        // Create default config if it doesn't exist
        let default_config = Config::default();
        create_config_file(&expanded_path, &default_config).await?;
        return Ok(default_config);
    }

    debug!("Loading config from {}", expanded_path.display());
    let config_content = fs::read_to_string(&expanded_path).await?;
    let config: Config = toml::from_str(&config_content)?;
    config.validate()?;

    Ok(config)
}

fn expand_home(path: &Path) -> Result<PathBuf> {
    if !path.starts_with("~") {
        return Ok(path.to_path_buf());
    }
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let path_str = path.to_string_lossy();
    let without_tilde = &path_str[1..];
    Ok(home_dir.join(without_tilde.trim_start_matches('/')))
}

async fn create_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let config_content = toml::to_string_pretty(config)?;
    fs::write(path, config_content).await?;

    println!("Created default config file at: {}", path.display());

    Ok(())
}

/// Signing identity: explicit flag, then environment, then config file.
pub fn source_account(explicit: Option<String>, config: &Config) -> Result<String, CliError> {
    if let Some(source) = explicit {
        return Ok(source);
    }
    if let Ok(source) = std::env::var(SOURCE_ACCOUNT_ENV) {
        return Ok(source);
    }
    config
        .auth
        .source_account
        .clone()
        .ok_or(CliError::MissingSourceAccount)
}

pub fn contract_id(explicit: Option<String>, config: &Config) -> Result<String, CliError> {
    explicit
        .or_else(|| config.contract.default_contract_id.clone())
        .ok_or(CliError::MissingContractId)
}
