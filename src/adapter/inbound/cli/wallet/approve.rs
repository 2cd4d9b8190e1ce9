use std::path::Path;

use alloy_primitives::U256;
use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::{ApprovalManager, SwapContext};
use crate::domain::TokenDescriptor;
use crate::error::{Result, SwapError};
use crate::infrastructure::bootstrap;

/// Grant the router an unlimited allowance for `symbol`.
///
/// # Arguments
///
/// * `config_path` - Path to the configuration file
/// * `symbol` - Symbol of a configured ERC-20 token
pub async fn execute_approve(config_path: &Path, symbol: &str) -> Result<()> {
    let config = crate::adapter::inbound::cli::load_config(config_path)?;
    let token = config
        .token(symbol)
        .map(|token| token.descriptor())
        .ok_or_else(|| SwapError::UnknownToken(symbol.to_string()))?;
    let ctx = bootstrap::build_context(&config)?;

    let approved = approve(&ctx, &token).await?;
    if output::is_json() {
        output::json_output(json!({
            "command": "approve",
            "token": token.symbol(),
            "spender": ctx.router().address(),
            "submitted": approved,
        }));
    }
    Ok(())
}

/// Show the current allowance and raise it to unlimited when it is not.
///
/// Returns whether an approval transaction was sent.
pub async fn approve(ctx: &SwapContext, token: &TokenDescriptor) -> Result<bool> {
    let owner = ctx.wallet();
    let spender = ctx.router().address();
    let manager = ApprovalManager::new(ctx);

    output::section("Token Approval");
    output::field("Token", token);
    output::field("Wallet", owner);
    output::field("Spender", format!("{} ({})", spender, ctx.router().name()));

    let pb = output::spinner("Fetching allowance...");
    let state = match manager.state(token, owner, spender).await {
        Ok(state) => {
            output::spinner_success(&pb, "Fetched allowance");
            state
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to fetch allowance");
            return Err(e);
        }
    };

    if state.is_unlimited() {
        output::field("Allowance", "unlimited");
        output::success("Router already has an unlimited allowance");
        return Ok(false);
    }
    output::field("Allowance", token.format_units(state.current_allowance));

    let pb = output::spinner("Submitting approval...");
    match manager.ensure_approval(token, owner, spender, U256::MAX).await {
        Ok(sent) => {
            output::spinner_success(&pb, "Approval confirmed");
            Ok(sent)
        }
        Err(e) => {
            output::spinner_fail(&pb, "Approval failed");
            Err(e)
        }
    }
}
