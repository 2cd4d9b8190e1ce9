//! Router selection and per-route transaction parameters.

use std::fmt;

use alloy_primitives::{address, Address};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::Leg;

/// Supported router contract families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterKind {
    /// Bean DEX, a Uniswap-V2 style router routing through wrapped native.
    #[default]
    Bean,
    /// Ambient DEX (CrocSwap).
    Ambient,
    /// Fixed-rate MonadSwap contract, token to token only.
    MonadSwap,
}

impl RouterKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bean => "bean",
            Self::Ambient => "ambient",
            Self::MonadSwap => "monadswap",
        }
    }

    /// Gas ceiling used when the config does not override it.
    ///
    /// Chosen above observed cost for each route.
    #[must_use]
    pub const fn default_gas(self, leg: Leg) -> u64 {
        match (self, leg) {
            (Self::Bean | Self::Ambient, Leg::NativeToToken) => 250_000,
            (Self::Bean | Self::Ambient, Leg::TokenToNative) => 350_000,
            (Self::Bean, Leg::TokenToToken) => 350_000,
            (Self::Ambient, Leg::TokenToToken) => 500_000,
            (Self::MonadSwap, _) => 500_000,
        }
    }
}

impl fmt::Display for RouterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional gas-limit overrides per leg.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GasConfig {
    #[serde(default)]
    pub native_to_token: Option<u64>,
    #[serde(default)]
    pub token_to_native: Option<u64>,
    #[serde(default)]
    pub token_to_token: Option<u64>,
}

impl GasConfig {
    fn get(&self, leg: Leg) -> Option<u64> {
        match leg {
            Leg::NativeToToken => self.native_to_token,
            Leg::TokenToNative => self.token_to_native,
            Leg::TokenToToken => self.token_to_token,
        }
    }
}

/// Ambient `userCmd` swap parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AmbientConfig {
    /// Pool type index.
    #[serde(default = "default_pool_idx")]
    pub pool_idx: u32,
    /// Limit price in whole units; scaled by 1e18 when encoded.
    #[serde(default = "default_limit_price")]
    pub limit_price: Decimal,
}

fn default_pool_idx() -> u32 {
    36000
}

fn default_limit_price() -> Decimal {
    dec!(100000)
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            pool_idx: default_pool_idx(),
            limit_price: default_limit_price(),
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Router family; selects the calldata layout.
    #[serde(default)]
    pub kind: RouterKind,
    /// Router contract address (also the approval spender).
    #[serde(default = "default_router_address")]
    pub address: Address,
    /// Wrapped native token used in Bean swap paths.
    #[serde(default)]
    pub wrapped_native: Option<Address>,
    /// Seconds added to the current time for the swap deadline.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Gas-limit overrides.
    #[serde(default)]
    pub gas: GasConfig,
    /// Ambient-specific settings.
    #[serde(default)]
    pub ambient: AmbientConfig,
}

fn default_router_address() -> Address {
    address!("ca810d095e90daae6e867c19df6d9a8c56db2c89")
}

fn default_deadline_secs() -> u64 {
    1200
}

impl RouterConfig {
    /// Gas ceiling for a leg, honoring overrides.
    #[must_use]
    pub fn gas_limit(&self, leg: Leg) -> u64 {
        self.gas.get(leg).unwrap_or_else(|| self.kind.default_gas(leg))
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            kind: RouterKind::Bean,
            address: default_router_address(),
            wrapped_native: Some(address!("760afe86e5de5fa0ee542fc7b7b713e1c5425701")),
            deadline_secs: default_deadline_secs(),
            gas: GasConfig::default(),
            ambient: AmbientConfig::default(),
        }
    }
}
