//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set WALLET_PRIVATE_KEY environment variable");
    output::note(&format!(
        "3. Run: monadswap config validate -c {}",
        path.display()
    ));
    output::note("4. Run: monadswap");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "config": config,
            "private_key_loaded": config.wallet.private_key.is_some(),
        }));
        return Ok(());
    }

    output::section("Network");
    output::field("RPC", &config.network.rpc_url);
    output::field("Chain ID", config.network.chain_id);
    output::field("Explorer", &config.network.explorer_url);
    output::field(
        "Native",
        format!(
            "{} ({} decimals)",
            config.network.native_symbol, config.network.native_decimals
        ),
    );

    output::section("Router");
    output::field("Kind", config.router.kind);
    output::field("Address", config.router.address);
    if let Some(wrapped) = config.router.wrapped_native {
        output::field("Wrapped", wrapped);
    }
    output::field("Deadline", format!("{}s", config.router.deadline_secs));

    output::section("Tokens");
    if config.tokens.is_empty() {
        output::note("(none configured)");
    } else {
        for token in &config.tokens {
            output::note(&format!(
                "- {} {} [{} - {}]",
                token.label(),
                output::muted(token.address),
                token.min_amount,
                token.max_amount
            ));
        }
    }

    output::section("Retry");
    output::field("Attempts", config.retry.max_attempts);
    output::field("Delay", format!("{}ms", config.retry.delay_ms));

    output::section("Batch");
    output::field("Count", config.batch.count);
    output::field(
        "Delay",
        format!(
            "{}s (min {}s)",
            config.batch.delay_secs, config.batch.min_delay_secs
        ),
    );

    output::section("Wallet");
    if config.wallet.private_key.is_some() {
        output::success("Private key loaded");
    } else {
        output::warning("Private key not set");
        output::hint("set WALLET_PRIVATE_KEY or [wallet].keystore_path");
    }

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    bootstrap::router_profile(&config)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");

    if config.wallet.private_key.is_none() {
        output::warning("Private key not set; swaps will fail until WALLET_PRIVATE_KEY is provided");
    }

    output::field(
        "Next",
        format!("monadswap config show -c {}", path.display()),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn template_parses_as_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.network.chain_id, 10143);
        assert_eq!(config.tokens.len(), 2);
        assert!(bootstrap::router_profile(&config).is_ok());
    }

    #[test]
    fn init_writes_template() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        let error = execute_init(&config_path, false).unwrap_err();
        assert!(error.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(&config_path).unwrap(),
            "existing content"
        );

        execute_init(&config_path, true).unwrap();
        assert_eq!(fs::read_to_string(&config_path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn validate_reports_bad_config() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[retry]\nmax_attempts = 0\n").unwrap();

        assert!(execute_validate(&config_path).is_err());
    }

    #[test]
    fn validate_fails_for_missing_file() {
        let temp_dir = create_temp_dir();
        assert!(execute_validate(&temp_dir.path().join("absent.toml")).is_err());
    }
}
