//! Canonical test configurations and contexts.
//!
//! Single source of truth for router and retry settings used across tests.

use std::sync::Arc;
use std::time::Duration;

use super::chain::MockChainClient;
use super::domain::{ROUTER, WMON};
use crate::application::{RetryPolicy, RouterProfile, SwapContext};
use crate::infrastructure::config::router::{RouterConfig, RouterKind};

/// Three attempts, one second apart. Run under a paused clock to skip waits.
pub fn retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_secs(1))
}

/// Router config pointing at [`ROUTER`] with default gas and deadline.
pub fn router(kind: RouterKind) -> RouterConfig {
    RouterConfig {
        kind,
        address: ROUTER,
        wrapped_native: Some(WMON),
        ..RouterConfig::default()
    }
}

/// Context over `chain` using the Bean router.
pub fn context(chain: MockChainClient) -> SwapContext {
    context_with_router(chain, RouterKind::Bean)
}

/// Context over `chain` using the given router family.
pub fn context_with_router(chain: MockChainClient, kind: RouterKind) -> SwapContext {
    let profile = match RouterProfile::from_config(&router(kind)) {
        Ok(profile) => profile,
        Err(err) => panic!("test router config is invalid: {err}"),
    };
    SwapContext::new(Arc::new(chain), profile, retry())
}

/// Minimal TOML config with one token, for loader and CLI tests.
pub const CONFIG_TOML: &str = r#"
[network]
rpc_url = "http://127.0.0.1:8545"

[router]
kind = "bean"
address = "0xca810d095e90daae6e867c19df6d9a8c56db2c89"
wrapped_native = "0x760afe86e5de5fa0ee542fc7b7b713e1c5425701"

[[tokens]]
symbol = "USDC"
name = "USD Coin"
address = "0xf817257fed379853cde0fa4f97ab987181b1e5ea"
decimals = 6
min_amount = "0.01"
max_amount = "1"
"#;
