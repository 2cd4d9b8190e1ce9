//! Composition root: configuration to signer, chain client and context.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use tracing::info;

use crate::adapter::outbound::rpc::RpcChainClient;
use crate::application::{PlanAsset, RouterProfile, SwapContext, SwapPlanner};
use crate::domain::{Leg, TokenDescriptor};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Build the local signer from `WALLET_PRIVATE_KEY` (or the decrypted keystore).
///
/// # Errors
///
/// Returns an error if no key is configured or the key is malformed.
pub fn signer(config: &Config) -> Result<PrivateKeySigner> {
    let key = config
        .wallet
        .private_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingField {
            field: "WALLET_PRIVATE_KEY",
        })?;

    let signer = PrivateKeySigner::from_str(key.trim())
        .map_err(|e| ConfigError::InvalidValue {
            field: "WALLET_PRIVATE_KEY",
            reason: e.to_string(),
        })?
        .with_chain_id(Some(config.network.chain_id));
    Ok(signer)
}

/// Address derived from the configured key.
pub fn wallet_address(config: &Config) -> Result<Address> {
    Ok(signer(config)?.address())
}

/// Router profile selected by `[router]`.
pub fn router_profile(config: &Config) -> Result<RouterProfile> {
    Ok(RouterProfile::from_config(&config.router)?)
}

/// Wire an RPC-backed swap context.
///
/// # Errors
///
/// Returns an error for a missing or invalid key, an unparseable RPC URL,
/// or an invalid router section.
pub fn build_context(config: &Config) -> Result<SwapContext> {
    let signer = signer(config)?;
    let rpc_url: url::Url =
        config
            .network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                field: "rpc_url",
                reason: e.to_string(),
            })?;
    let router = router_profile(config)?;

    info!(
        wallet = %signer.address(),
        rpc_url = %rpc_url,
        chain_id = config.network.chain_id,
        router = router.name(),
        "Connecting to chain"
    );

    let chain = RpcChainClient::new(
        rpc_url,
        signer,
        Duration::from_millis(config.network.receipt_poll_ms),
    );
    Ok(SwapContext::new(
        Arc::new(chain),
        router,
        config.retry.policy(),
    ))
}

/// Configured ERC-20 tokens as descriptors.
pub fn token_descriptors(config: &Config) -> Vec<TokenDescriptor> {
    config.tokens.iter().map(|token| token.descriptor()).collect()
}

/// Planner over the native currency and the `available` tokens.
///
/// Tokens not in `available` (e.g. failed the availability probe) are left
/// out; only legs the router supports are planned.
pub fn planner(
    config: &Config,
    router: &RouterProfile,
    available: &[TokenDescriptor],
) -> SwapPlanner {
    let native = PlanAsset {
        asset: config.native(),
        min_amount: config.network.native_min_amount,
        max_amount: config.network.native_max_amount,
    };
    let tokens = config
        .tokens
        .iter()
        .filter(|token| available.iter().any(|a| a.address() == token.address))
        .map(|token| PlanAsset {
            asset: token.descriptor(),
            min_amount: token.min_amount,
            max_amount: token.max_amount,
        });

    let assets = std::iter::once(native).chain(tokens).collect();
    let legs = Leg::ALL.into_iter().filter(|leg| router.supports(*leg));
    SwapPlanner::new(assets, legs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::router::RouterKind;
    use crate::testkit;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn config() -> Config {
        let mut config: Config = toml::from_str(testkit::CONFIG_TOML).unwrap();
        config.wallet.private_key = Some(KEY.to_string());
        config
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let mut config = config();
        config.wallet.private_key = None;
        let err = signer(&config).unwrap_err();
        assert!(err.to_string().contains("WALLET_PRIVATE_KEY"));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let mut config = config();
        config.wallet.private_key = Some("not-a-key".to_string());
        assert!(signer(&config).is_err());
    }

    #[test]
    fn signer_carries_chain_id() {
        let signer = signer(&config()).unwrap();
        assert_eq!(signer.chain_id(), Some(10143));
    }

    #[test]
    fn context_uses_configured_router() {
        let ctx = build_context(&config()).unwrap();
        assert_eq!(ctx.router().kind(), RouterKind::Bean);
        assert_eq!(ctx.wallet(), wallet_address(&config()).unwrap());
    }

    #[test]
    fn planner_excludes_unavailable_tokens() {
        let config = config();
        let router = router_profile(&config).unwrap();

        let all = planner(&config, &router, &token_descriptors(&config));
        assert_eq!(all.assets().len(), 2);

        let native_only = planner(&config, &router, &[]);
        assert_eq!(native_only.assets().len(), 1);
    }
}
