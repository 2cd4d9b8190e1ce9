//! Builders for domain primitives used across tests.
//!
//! Fixed addresses and token descriptors so tests focus on assertions
//! rather than construction boilerplate.

use alloy_primitives::{address, Address};

use crate::domain::TokenDescriptor;

/// Wallet the mock chain signs for.
pub const WALLET: Address = address!("00000000000000000000000000000000000000aa");

/// Router contract used by test contexts.
pub const ROUTER: Address = address!("ca810d095e90daae6e867c19df6d9a8c56db2c89");

/// Wrapped native token used in Bean paths.
pub const WMON: Address = address!("760afe86e5de5fa0ee542fc7b7b713e1c5425701");

/// Native currency, 18 decimals.
pub fn mon() -> TokenDescriptor {
    TokenDescriptor::native("MON", 18)
}

/// 6-decimal stablecoin.
pub fn usdc() -> TokenDescriptor {
    TokenDescriptor::new(
        "USDC",
        address!("f817257fed379853cde0fa4f97ab987181b1e5ea"),
        6,
    )
}

/// 18-decimal token.
pub fn weth() -> TokenDescriptor {
    TokenDescriptor::new(
        "WETH",
        address!("b5a30b0fdc5ea94a52fdc42e3e9760cb8449fb37"),
        18,
    )
}
