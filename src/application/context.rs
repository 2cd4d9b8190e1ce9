//! Explicit swap context passed to every operation.

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use super::contracts;
use super::retry::RetryPolicy;
use super::router::RouterProfile;
use crate::domain::TokenDescriptor;
use crate::error::Result;
use crate::port::ChainClient;

/// Chain connection, router selection and retry policy for one wallet.
///
/// Cheap to clone; the chain client is shared.
#[derive(Clone)]
pub struct SwapContext {
    chain: Arc<dyn ChainClient>,
    router: RouterProfile,
    retry: RetryPolicy,
}

impl SwapContext {
    pub fn new(chain: Arc<dyn ChainClient>, router: RouterProfile, retry: RetryPolicy) -> Self {
        Self {
            chain,
            router,
            retry,
        }
    }

    #[must_use]
    pub fn chain(&self) -> &dyn ChainClient {
        self.chain.as_ref()
    }

    #[must_use]
    pub const fn router(&self) -> &RouterProfile {
        &self.router
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Address of the signing wallet.
    #[must_use]
    pub fn wallet(&self) -> Address {
        self.chain.sender()
    }

    /// Balance of `asset` held by `owner`, read through the retry policy.
    ///
    /// # Errors
    ///
    /// Returns the chain error, [`RetriesExhausted`] after repeated node
    /// failures, or an ABI error when the token returns malformed data.
    ///
    /// [`RetriesExhausted`]: crate::error::SwapError::RetriesExhausted
    pub async fn balance_of(&self, asset: &TokenDescriptor, owner: Address) -> Result<U256> {
        if asset.is_native() {
            return self
                .retry
                .execute("get_balance", || self.chain.get_balance(owner))
                .await;
        }

        let data = contracts::balance_of(owner);
        let raw = self
            .retry
            .execute("balance_of", || {
                self.chain.call(asset.address(), data.clone())
            })
            .await?;
        contracts::decode_uint(&raw)
    }

    /// Current allowance of `token` from `owner` to `spender`.
    ///
    /// Always read fresh from the chain.
    pub async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        let data = contracts::allowance(owner, spender);
        let raw = self
            .retry
            .execute("allowance", || self.chain.call(token, data.clone()))
            .await?;
        contracts::decode_uint(&raw)
    }
}

impl std::fmt::Debug for SwapContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapContext")
            .field("wallet", &self.wallet())
            .field("router", &self.router)
            .field("retry", &self.retry)
            .finish()
    }
}
