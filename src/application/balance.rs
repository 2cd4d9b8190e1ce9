//! Wallet balance report and token availability probe.

use alloy_primitives::{Address, U256};
use tracing::warn;

use super::context::SwapContext;
use crate::domain::TokenDescriptor;

/// One asset's balance, or why it could not be read.
#[derive(Debug, Clone)]
pub struct BalanceRow {
    pub asset: TokenDescriptor,
    pub balance: Result<U256, String>,
}

impl BalanceRow {
    /// Balance in human units, or `None` when the read failed.
    #[must_use]
    pub fn formatted(&self) -> Option<String> {
        self.balance
            .as_ref()
            .ok()
            .map(|value| self.asset.format_units(*value))
    }
}

/// Balances of the native currency and every configured token.
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub wallet: Address,
    pub rows: Vec<BalanceRow>,
}

impl BalanceReport {
    /// Rows whose balance could not be read.
    pub fn failures(&self) -> impl Iterator<Item = &BalanceRow> {
        self.rows.iter().filter(|row| row.balance.is_err())
    }
}

/// Read `native` and each of `tokens` for the context's wallet.
///
/// A failing read is recorded on its row and does not stop the report.
pub async fn balance_report(
    ctx: &SwapContext,
    native: &TokenDescriptor,
    tokens: &[TokenDescriptor],
) -> BalanceReport {
    let wallet = ctx.wallet();
    let mut rows = Vec::with_capacity(tokens.len() + 1);

    for asset in std::iter::once(native).chain(tokens) {
        let balance = ctx
            .balance_of(asset, wallet)
            .await
            .map_err(|err| err.to_string());
        if let Err(error) = &balance {
            warn!(token = %asset, error = %error, "Balance read failed");
        }
        rows.push(BalanceRow {
            asset: asset.clone(),
            balance,
        });
    }

    BalanceReport { wallet, rows }
}

/// Keep the tokens that answer `balanceOf` for the context's wallet.
pub async fn probe_available(
    ctx: &SwapContext,
    tokens: &[TokenDescriptor],
) -> Vec<TokenDescriptor> {
    let wallet = ctx.wallet();
    let mut available = Vec::with_capacity(tokens.len());

    for token in tokens {
        match ctx.balance_of(token, wallet).await {
            Ok(_) => available.push(token.clone()),
            Err(err) => warn!(token = %token, error = %err, "Token not accessible, skipping"),
        }
    }
    available
}
