//! Network configuration for the JSON-RPC node and native currency.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Node endpoint, chain identity and native-currency settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// HTTP JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Chain ID used when signing.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Prefix for transaction links; the hash is appended.
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
    /// Symbol shown for the native currency.
    #[serde(default = "default_native_symbol")]
    pub native_symbol: String,
    /// Native currency decimals.
    #[serde(default = "default_native_decimals")]
    pub native_decimals: u8,
    /// Lower bound for random native swap amounts.
    #[serde(default = "default_native_min_amount")]
    pub native_min_amount: Decimal,
    /// Upper bound for random native swap amounts.
    #[serde(default = "default_native_max_amount")]
    pub native_max_amount: Decimal,
    /// Interval between receipt polls (milliseconds).
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
}

fn default_rpc_url() -> String {
    "https://testnet-rpc.monad.xyz/".into()
}

fn default_chain_id() -> u64 {
    10143
}

fn default_explorer_url() -> String {
    "https://testnet.monadexplorer.com/tx/".into()
}

fn default_native_symbol() -> String {
    "MON".into()
}

fn default_native_decimals() -> u8 {
    18
}

fn default_native_min_amount() -> Decimal {
    dec!(0.001)
}

fn default_native_max_amount() -> Decimal {
    dec!(0.01)
}

fn default_receipt_poll_ms() -> u64 {
    1000
}

impl NetworkConfig {
    /// Explorer link for a transaction hash.
    #[must_use]
    pub fn explorer_link(&self, tx_hash: impl std::fmt::Display) -> String {
        format!("{}{tx_hash}", self.explorer_url)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            explorer_url: default_explorer_url(),
            native_symbol: default_native_symbol(),
            native_decimals: default_native_decimals(),
            native_min_amount: default_native_min_amount(),
            native_max_amount: default_native_max_amount(),
            receipt_poll_ms: default_receipt_poll_ms(),
        }
    }
}
