use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Show the wallet address derived from the configured key material.
pub fn execute_address(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let address = bootstrap::wallet_address(&config)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "wallet.address",
            "address": address,
        }));
        return Ok(());
    }

    output::section("Wallet Address");
    output::field("Address", address);
    output::field("Chain ID", config.network.chain_id);
    Ok(())
}
