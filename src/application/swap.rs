//! Swap execution.
//!
//! Linear sequence per request: pre-flight balance check, approval,
//! submission, confirmation, receipt interpretation. Nothing runs
//! concurrently and nothing is rolled back; each on-chain step either
//! happened or did not.

use chrono::Utc;
use tracing::{info, warn};

use super::approval::ApprovalManager;
use super::context::SwapContext;
use crate::domain::{SwapRequest, TransactionOutcome};
use crate::error::{Error, Result, SwapError};

/// Performs swaps through the context's router.
pub struct SwapExecutor<'a> {
    ctx: &'a SwapContext,
}

impl<'a> SwapExecutor<'a> {
    #[must_use]
    pub const fn new(ctx: &'a SwapContext) -> Self {
        Self { ctx }
    }

    /// Execute `request` and wait for it to be mined.
    ///
    /// # Errors
    ///
    /// - [`SwapError::UnsupportedRoute`] when the router has no method for the leg
    /// - [`SwapError::InsufficientBalance`] when the wallet cannot cover `amount_in`
    /// - [`SwapError::ApprovalFailed`] / [`SwapError::InsufficientAllowance`]
    /// - [`SwapError::SubmissionFailed`] when the node rejects the transaction
    /// - [`SwapError::TransactionReverted`] when the receipt status is failure
    /// - [`SwapError::RetriesExhausted`] when pre-submission reads keep failing
    pub async fn perform_swap(&self, request: &SwapRequest) -> Result<TransactionOutcome> {
        let router = self.ctx.router();
        let leg = request.leg();
        if !router.supports(leg) {
            return Err(SwapError::UnsupportedRoute {
                router: router.name(),
                from: request.from().symbol().to_string(),
                to: request.to().symbol().to_string(),
            }
            .into());
        }

        let wallet = self.ctx.wallet();
        let from = request.from();
        let amount_in = request.amount_in();

        let available = self.ctx.balance_of(from, wallet).await?;
        if available < amount_in {
            return Err(SwapError::InsufficientBalance {
                token: from.symbol().to_string(),
                required: amount_in,
                available,
            }
            .into());
        }

        ApprovalManager::new(self.ctx)
            .ensure_approval(from, wallet, router.address(), amount_in)
            .await
            .map_err(|err| approval_failure(from.symbol(), err))?;

        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        let tx = router.encode(request, wallet, router.deadline(now))?;

        info!(
            swap = %request,
            router = router.name(),
            leg = %leg,
            gas_limit = tx.gas_limit,
            "Submitting swap"
        );
        let chain = self.ctx.chain();
        let hash = chain
            .send_transaction(tx)
            .await
            .map_err(|err| SwapError::SubmissionFailed(err.to_string()))?;
        info!(tx_hash = %hash, "Swap submitted, waiting for confirmation");

        let outcome = chain.wait_for_receipt(hash).await?;
        if !outcome.is_success() {
            return Err(SwapError::TransactionReverted {
                tx_hash: hash.to_string(),
            }
            .into());
        }

        let transfers = outcome.transfers().count();
        if transfers > 0 {
            info!(tx_hash = %hash, transfers, "Swap confirmed, tokens transferred");
        } else {
            warn!(tx_hash = %hash, "Swap confirmed without a Transfer event");
        }
        Ok(outcome)
    }
}

/// Chain errors during approval become `ApprovalFailed`; workflow errors
/// (exhausted retries, short allowance) keep their own kind.
fn approval_failure(symbol: &str, err: Error) -> Error {
    match err {
        Error::Chain(chain) => SwapError::ApprovalFailed {
            token: symbol.to_string(),
            reason: chain.to_string(),
        }
        .into(),
        Error::Abi(abi) => SwapError::ApprovalFailed {
            token: symbol.to_string(),
            reason: abi.to_string(),
        }
        .into(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::contracts::IUniswapV2Router;
    use crate::domain::TxStatus;
    use crate::error::ChainError;
    use crate::testkit::{self, MockChainClient};
    use alloy_primitives::U256;
    use alloy_sol_types::SolCall;

    fn usdc_to_mon(amount: u64) -> SwapRequest {
        SwapRequest::new(testkit::usdc(), testkit::mon(), U256::from(amount)).unwrap()
    }

    fn funded() -> MockChainClient {
        let chain = MockChainClient::new();
        chain.set_native_balance(U256::from(10u64).pow(U256::from(18u64)));
        chain.set_token_balance(testkit::usdc().address(), U256::from(1_000_000_000u64));
        chain
    }

    #[tokio::test]
    async fn token_swap_approves_then_submits() {
        let chain = funded();
        let ctx = testkit::context(chain.clone());

        let outcome = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(100_000_000))
            .await
            .unwrap();

        assert_eq!(outcome.status, TxStatus::Success);
        assert!(outcome.has_transfer());

        let sent = chain.sent();
        assert_eq!(sent.len(), 2, "approval then swap");
        assert_eq!(sent[0].to, testkit::usdc().address());
        assert_eq!(sent[1].to, testkit::ROUTER);
        assert_eq!(
            &sent[1].data[..4],
            &IUniswapV2Router::swapExactTokensForETHCall::SELECTOR
        );
        assert_eq!(
            &sent[1].data[4..36],
            &U256::from(100_000_000u64).to_be_bytes::<32>()
        );
    }

    #[tokio::test]
    async fn existing_allowance_skips_approval() {
        let chain = funded();
        chain.set_allowance(testkit::usdc().address(), testkit::ROUTER, U256::MAX);
        let ctx = testkit::context(chain.clone());

        SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap();

        assert_eq!(chain.sent().len(), 1);
    }

    #[tokio::test]
    async fn native_swap_attaches_value_without_approval() {
        let chain = funded();
        let ctx = testkit::context(chain.clone());
        let request =
            SwapRequest::new(testkit::mon(), testkit::usdc(), U256::from(1_000u64)).unwrap();

        SwapExecutor::new(&ctx).perform_swap(&request).await.unwrap();

        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].value, U256::from(1_000u64));
    }

    #[tokio::test]
    async fn confirmed_swap_without_transfer_log_still_succeeds() {
        let chain = funded();
        chain.without_transfer_logs();
        let ctx = testkit::context(chain.clone());
        let request =
            SwapRequest::new(testkit::mon(), testkit::usdc(), U256::from(1_000u64)).unwrap();

        let outcome = SwapExecutor::new(&ctx).perform_swap(&request).await.unwrap();

        assert!(outcome.is_success());
        assert!(!outcome.has_transfer());
        assert_eq!(chain.sent().len(), 1);
    }

    #[tokio::test]
    async fn reverted_receipt_is_reverted_even_with_transfer_logs() {
        let chain = funded();
        chain.set_allowance(testkit::usdc().address(), testkit::ROUTER, U256::MAX);
        chain.revert_next_receipt();
        let ctx = testkit::context(chain.clone());

        let err = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::TransactionReverted { .. })));
    }

    #[tokio::test]
    async fn short_balance_fails_before_any_transaction() {
        let chain = funded();
        let ctx = testkit::context(chain.clone());

        let err = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(2_000_000_000))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::InsufficientBalance { .. })));
        assert!(chain.sent().is_empty());
    }

    #[tokio::test]
    async fn rejected_submission_is_submission_failed() {
        let chain = funded();
        chain.set_allowance(testkit::usdc().address(), testkit::ROUTER, U256::MAX);
        chain.fail_next_send(ChainError::Rpc("nonce too low".into()));
        let ctx = testkit::context(chain.clone());

        let err = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::SubmissionFailed(ref m)) if m.contains("nonce")));
    }

    #[tokio::test]
    async fn failed_approval_submission_is_approval_failed() {
        let chain = funded();
        chain.fail_next_send(ChainError::Rpc("insufficient funds for gas".into()));
        let ctx = testkit::context(chain.clone());

        let err = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::ApprovalFailed { ref token, .. }) if token == "USDC"));
    }

    #[tokio::test]
    async fn unsupported_leg_fails_without_touching_chain() {
        let chain = funded();
        let ctx = testkit::context_with_router(
            chain.clone(),
            crate::infrastructure::config::router::RouterKind::MonadSwap,
        );

        let err = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::UnsupportedRoute { .. })));
        assert_eq!(chain.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn flaky_balance_read_is_retried() {
        let chain = funded();
        chain.set_allowance(testkit::usdc().address(), testkit::ROUTER, U256::MAX);
        chain.fail_next_calls(2, ChainError::Server("502 Bad Gateway".into()));
        let ctx = testkit::context(chain.clone());

        SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap();

        assert_eq!(chain.sent().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_node_failure_exhausts_retries() {
        let chain = funded();
        chain.fail_next_calls(10, ChainError::BadResponse("empty body".into()));
        let ctx = testkit::context(chain.clone());

        let err = SwapExecutor::new(&ctx)
            .perform_swap(&usdc_to_mon(5))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Swap(SwapError::RetriesExhausted { attempts: 3, .. })));
        assert!(chain.sent().is_empty());
    }
}
