//! ERC-20 approval management.
//!
//! Ensures the router holds enough allowance before a swap. Uses the
//! infinite-approval pattern so a token is approved at most once per
//! spender.

use alloy_primitives::{Address, U256};
use tracing::{debug, info};

use super::context::SwapContext;
use super::contracts;
use crate::domain::{ApprovalState, TokenDescriptor, TxRequest};
use crate::error::{Result, SwapError};

/// Gas ceiling for `approve`; well above the usual ~46k.
pub const APPROVAL_GAS_LIMIT: u64 = 100_000;

/// Closes allowance gaps for the context's wallet.
pub struct ApprovalManager<'a> {
    ctx: &'a SwapContext,
}

impl<'a> ApprovalManager<'a> {
    #[must_use]
    pub const fn new(ctx: &'a SwapContext) -> Self {
        Self { ctx }
    }

    /// Read the current allowance snapshot.
    pub async fn state(
        &self,
        token: &TokenDescriptor,
        owner: Address,
        spender: Address,
    ) -> Result<ApprovalState> {
        let current_allowance = self.ctx.allowance(token.address(), owner, spender).await?;
        Ok(ApprovalState {
            owner,
            spender,
            current_allowance,
        })
    }

    /// Make sure `spender` may move `required` of `token` from `owner`.
    ///
    /// Returns `true` when an approval transaction was submitted and
    /// confirmed, `false` when nothing had to be done. The native currency
    /// never needs approval.
    ///
    /// # Errors
    ///
    /// Chain errors from submission or confirmation are returned unchanged.
    /// A reverted approval yields [`SwapError::ApprovalFailed`]; an allowance
    /// still short after confirmation yields
    /// [`SwapError::InsufficientAllowance`].
    pub async fn ensure_approval(
        &self,
        token: &TokenDescriptor,
        owner: Address,
        spender: Address,
        required: U256,
    ) -> Result<bool> {
        if token.is_native() {
            return Ok(false);
        }

        let state = self.state(token, owner, spender).await?;
        if state.covers(required) {
            debug!(
                token = %token,
                allowance = %state.current_allowance,
                "Allowance sufficient, skipping approval"
            );
            return Ok(false);
        }

        info!(
            token = %token,
            spender = %spender,
            allowance = %state.current_allowance,
            required = %required,
            "Approving token"
        );
        let tx = TxRequest {
            to: token.address(),
            data: contracts::approve(spender, U256::MAX),
            value: U256::ZERO,
            gas_limit: APPROVAL_GAS_LIMIT,
        };
        let chain = self.ctx.chain();
        let hash = chain.send_transaction(tx).await?;
        debug!(tx_hash = %hash, "Approval submitted");

        let outcome = chain.wait_for_receipt(hash).await?;
        if !outcome.is_success() {
            return Err(SwapError::ApprovalFailed {
                token: token.symbol().to_string(),
                reason: format!("approval transaction {hash} reverted"),
            }
            .into());
        }

        let after = self.state(token, owner, spender).await?;
        if !after.covers(required) {
            return Err(SwapError::InsufficientAllowance {
                token: token.symbol().to_string(),
                required,
                current: after.current_allowance,
            }
            .into());
        }

        info!(token = %token, tx_hash = %hash, "Token approved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChainError, Error};
    use crate::testkit::{self, MockChainClient};

    fn usdc() -> TokenDescriptor {
        testkit::usdc()
    }

    // --- Skips ---

    #[tokio::test]
    async fn native_token_needs_no_approval() {
        let chain = MockChainClient::new();
        let ctx = testkit::context(chain.clone());

        let approved = ApprovalManager::new(&ctx)
            .ensure_approval(
                &testkit::mon(),
                ctx.wallet(),
                testkit::ROUTER,
                U256::from(1u64),
            )
            .await
            .unwrap();

        assert!(!approved);
        assert_eq!(chain.call_count(), 0);
        assert!(chain.sent().is_empty());
    }

    #[tokio::test]
    async fn sufficient_allowance_sends_nothing() {
        let chain = MockChainClient::new();
        let ctx = testkit::context(chain.clone());
        chain.set_allowance(usdc().address(), testkit::ROUTER, U256::from(500u64));

        let approved = ApprovalManager::new(&ctx)
            .ensure_approval(&usdc(), ctx.wallet(), testkit::ROUTER, U256::from(500u64))
            .await
            .unwrap();

        assert!(!approved);
        assert!(chain.sent().is_empty());
    }

    // --- Approvals ---

    #[tokio::test]
    async fn short_allowance_sends_one_max_approval() {
        let chain = MockChainClient::new();
        let ctx = testkit::context(chain.clone());
        chain.set_allowance(usdc().address(), testkit::ROUTER, U256::from(10u64));

        let approved = ApprovalManager::new(&ctx)
            .ensure_approval(&usdc(), ctx.wallet(), testkit::ROUTER, U256::from(500u64))
            .await
            .unwrap();

        assert!(approved);
        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, usdc().address());
        assert_eq!(sent[0].gas_limit, APPROVAL_GAS_LIMIT);
        assert_eq!(
            chain.allowance_of(usdc().address(), testkit::ROUTER),
            U256::MAX
        );
    }

    #[tokio::test]
    async fn reverted_approval_is_approval_failed() {
        let chain = MockChainClient::new();
        let ctx = testkit::context(chain.clone());
        chain.revert_next_receipt();

        let err = ApprovalManager::new(&ctx)
            .ensure_approval(&usdc(), ctx.wallet(), testkit::ROUTER, U256::from(1u64))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::ApprovalFailed { .. })));
    }

    #[tokio::test]
    async fn ineffective_approval_is_insufficient_allowance() {
        let chain = MockChainClient::new();
        let ctx = testkit::context(chain.clone());
        chain.ignore_approvals();

        let err = ApprovalManager::new(&ctx)
            .ensure_approval(&usdc(), ctx.wallet(), testkit::ROUTER, U256::from(9u64))
            .await
            .unwrap_err();

        match err {
            Error::Swap(SwapError::InsufficientAllowance {
                required, current, ..
            }) => {
                assert_eq!(required, U256::from(9u64));
                assert_eq!(current, U256::ZERO);
            }
            other => panic!("expected InsufficientAllowance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn submission_error_propagates_unchanged() {
        let chain = MockChainClient::new();
        let ctx = testkit::context(chain.clone());
        chain.fail_next_send(ChainError::Rpc("insufficient funds for gas".into()));

        let err = ApprovalManager::new(&ctx)
            .ensure_approval(&usdc(), ctx.wallet(), testkit::ROUTER, U256::from(1u64))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Chain(ChainError::Rpc(_))));
    }
}
