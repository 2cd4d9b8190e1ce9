//! Handler for the `swap` command.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm};
use serde_json::json;

use crate::adapter::inbound::cli::command::SwapArgs;
use crate::adapter::inbound::cli::output;
use crate::application::{SwapContext, SwapExecutor};
use crate::domain::{SwapRequest, TransactionOutcome};
use crate::error::{ConfigError, Result, SwapError};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute `swap`.
pub async fn execute(config_path: &Path, args: &SwapArgs) -> Result<()> {
    if output::is_json() && !args.yes {
        return Err(ConfigError::InvalidValue {
            field: "yes",
            reason: "`monadswap swap --json` cannot prompt; pass --yes to confirm".to_string(),
        }
        .into());
    }

    let config = super::load_config(config_path)?;
    let request = resolve_request(&config, &args.from, &args.to, &args.amount)?;
    let ctx = bootstrap::build_context(&config)?;

    output::section("Swap");
    output::field("Router", ctx.router().name());
    output::field("Wallet", ctx.wallet());
    output::field(
        "Sell",
        format!(
            "{} {}",
            request.from().format_units(request.amount_in()),
            request.from()
        ),
    );
    output::field("Buy", request.to());

    if !args.yes {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Submit this swap?")
            .default(false)
            .interact()?;
        if !proceed {
            output::warning("Swap cancelled by user");
            return Ok(());
        }
    }

    let outcome = submit(&config, &ctx, &request).await?;
    if output::is_json() {
        output::json_output(json!({
            "command": "swap",
            "from": request.from().symbol(),
            "to": request.to().symbol(),
            "amount_in": request.amount_in().to_string(),
            "tx_hash": outcome.hash,
            "explorer": config.network.explorer_link(outcome.hash),
            "transfers": outcome.transfers().count(),
        }));
    }
    Ok(())
}

/// Build a swap from user-typed symbols and amount.
///
/// # Errors
///
/// Unknown symbols, unparseable or zero amounts, and same-asset pairs are
/// rejected before anything touches the chain.
pub fn resolve_request(
    config: &Config,
    from: &str,
    to: &str,
    amount: &str,
) -> Result<SwapRequest> {
    let from = config
        .asset(from)
        .ok_or_else(|| SwapError::UnknownToken(from.to_string()))?;
    let to = config
        .asset(to)
        .ok_or_else(|| SwapError::UnknownToken(to.to_string()))?;
    let amount_in = from.parse_amount(amount)?;
    Ok(SwapRequest::new(from, to, amount_in)?)
}

/// Perform `request` with a spinner and print the transaction link.
pub async fn submit(
    config: &Config,
    ctx: &SwapContext,
    request: &SwapRequest,
) -> Result<TransactionOutcome> {
    let pb = output::spinner(&format!("Swapping {request}..."));
    match SwapExecutor::new(ctx).perform_swap(request).await {
        Ok(outcome) => {
            output::spinner_success(&pb, &format!("Swapped {request}"));
            output::transaction(outcome.hash, &config.network.explorer_link(outcome.hash));
            if !outcome.has_transfer() {
                output::warning("No Transfer event in the receipt");
            }
            Ok(outcome)
        }
        Err(err) => {
            output::spinner_fail(&pb, &format!("Swap failed: {request}"));
            Err(err)
        }
    }
}
