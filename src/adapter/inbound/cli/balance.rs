//! Handler for the `balance` command.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::{balance_report, BalanceReport, SwapContext};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct BalanceTableRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Address")]
    address: String,
}

/// Execute `balance`.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let ctx = bootstrap::build_context(&config)?;
    show(&config, &ctx).await
}

/// Read and print the wallet's balances.
pub async fn show(config: &Config, ctx: &SwapContext) -> Result<()> {
    let pb = output::spinner("Reading balances...");
    let report = balance_report(ctx, &config.native(), &bootstrap::token_descriptors(config)).await;
    let failures = report.failures().count();
    if failures == 0 {
        output::spinner_success(&pb, "Balances read");
    } else {
        output::spinner_fail(&pb, &format!("{failures} balance(s) unavailable"));
    }

    if output::is_json() {
        output::json_output(report_json(&report));
        return Ok(());
    }
    render(&report);
    Ok(())
}

/// Print `report` as a table followed by per-asset read failures.
pub fn render(report: &BalanceReport) {
    if output::is_json() {
        return;
    }

    output::section("Balances");
    output::field("Wallet", report.wallet);
    let rows: Vec<BalanceTableRow> = report
        .rows
        .iter()
        .map(|row| BalanceTableRow {
            asset: row.asset.symbol().to_string(),
            balance: row
                .formatted()
                .unwrap_or_else(|| output::muted("unavailable")),
            address: if row.asset.is_native() {
                output::muted("native")
            } else {
                row.asset.address().to_string()
            },
        })
        .collect();
    println!();
    output::lines(&Table::new(rows).to_string());

    for row in report.failures() {
        if let Err(error) = &row.balance {
            output::warning(&format!("{}: {error}", row.asset.symbol()));
        }
    }
}

fn report_json(report: &BalanceReport) -> serde_json::Value {
    let rows: Vec<_> = report
        .rows
        .iter()
        .map(|row| match &row.balance {
            Ok(raw) => json!({
                "symbol": row.asset.symbol(),
                "address": row.asset.address(),
                "balance": row.asset.format_units(*raw),
                "raw": raw.to_string(),
            }),
            Err(error) => json!({
                "symbol": row.asset.symbol(),
                "address": row.asset.address(),
                "error": error,
            }),
        })
        .collect();

    json!({
        "command": "balance",
        "wallet": report.wallet,
        "balances": rows,
    })
}
