#![allow(dead_code)]

use alloy_primitives::U256;
use monadswap::testkit::{self, MockChainClient};

/// `n` whole units of an 18-decimal asset.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// `n` whole units of a 6-decimal asset.
pub fn micros(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000u64)
}

/// Chain with 10 MON, 1000 USDC and 1 WETH in the test wallet.
pub fn funded_chain() -> MockChainClient {
    let chain = MockChainClient::new();
    chain.set_native_balance(ether(10));
    chain.set_token_balance(testkit::usdc().address(), micros(1_000));
    chain.set_token_balance(testkit::weth().address(), ether(1));
    chain
}
