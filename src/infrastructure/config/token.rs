//! Token list configuration.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::TokenDescriptor;

/// A configured ERC-20 token and its random-swap amount range.
///
/// Addresses are taken as configured; different deployments of the same
/// symbol are common on testnets, so none is treated as canonical.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    pub symbol: String,
    /// Display name, e.g. "USD Coin".
    #[serde(default)]
    pub name: Option<String>,
    pub address: Address,
    pub decimals: u8,
    /// Lower bound for random swap amounts (whole units).
    pub min_amount: Decimal,
    /// Upper bound for random swap amounts (whole units).
    pub max_amount: Decimal,
}

impl TokenConfig {
    #[must_use]
    pub fn descriptor(&self) -> TokenDescriptor {
        TokenDescriptor::new(self.symbol.clone(), self.address, self.decimals)
    }

    /// Human label for menus: `USD Coin (USDC)` or just the symbol.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.symbol),
            None => self.symbol.clone(),
        }
    }
}
