//! Sequential random swap batches.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use super::balance::{balance_report, BalanceReport};
use super::context::SwapContext;
use super::planner::SwapPlanner;
use super::swap::SwapExecutor;
use crate::domain::{SwapRequest, TokenDescriptor, TransactionOutcome};
use crate::error::Error;

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
}

/// Progress notifications emitted while a batch runs.
///
/// `index` is 1-based.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Planned {
        index: u32,
        request: &'a SwapRequest,
    },
    Succeeded {
        index: u32,
        outcome: &'a TransactionOutcome,
    },
    Failed {
        index: u32,
        error: &'a Error,
    },
    /// Wallet balances read right after a confirmed swap.
    Balances {
        index: u32,
        report: &'a BalanceReport,
    },
    Waiting {
        index: u32,
        delay: Duration,
    },
}

/// Runs planned swaps one after another with a fixed pause.
pub struct BatchRunner<'a> {
    ctx: &'a SwapContext,
    planner: &'a SwapPlanner,
    balances: Option<(&'a TokenDescriptor, &'a [TokenDescriptor])>,
}

impl<'a> BatchRunner<'a> {
    #[must_use]
    pub const fn new(ctx: &'a SwapContext, planner: &'a SwapPlanner) -> Self {
        Self {
            ctx,
            planner,
            balances: None,
        }
    }

    /// Read `native` and `tokens` balances after every confirmed swap.
    #[must_use]
    pub fn with_balances(
        mut self,
        native: &'a TokenDescriptor,
        tokens: &'a [TokenDescriptor],
    ) -> Self {
        self.balances = Some((native, tokens));
        self
    }

    /// Run `count` swaps, sleeping `delay` between them.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: u32,
        delay: Duration,
    ) -> BatchSummary {
        self.run_with(rng, count, delay, |_| {}).await
    }

    /// Like [`run`](Self::run), reporting progress to `observer`.
    ///
    /// A failed swap (including a planning failure) is counted and the
    /// batch moves on. There is no pause after the last swap.
    pub async fn run_with<R, F>(
        &self,
        rng: &mut R,
        count: u32,
        delay: Duration,
        mut observer: F,
    ) -> BatchSummary
    where
        R: Rng + ?Sized,
        F: FnMut(BatchEvent<'_>),
    {
        let mut summary = BatchSummary::default();
        let executor = SwapExecutor::new(self.ctx);

        for index in 1..=count {
            summary.attempted += 1;

            let result = match self.planner.plan(rng) {
                Ok(request) => {
                    info!(index, count, swap = %request, "Batch swap");
                    observer(BatchEvent::Planned {
                        index,
                        request: &request,
                    });
                    executor.perform_swap(&request).await
                }
                Err(err) => Err(err),
            };

            match result {
                Ok(outcome) => {
                    summary.succeeded += 1;
                    observer(BatchEvent::Succeeded {
                        index,
                        outcome: &outcome,
                    });
                    if let Some((native, tokens)) = self.balances {
                        let report = balance_report(self.ctx, native, tokens).await;
                        observer(BatchEvent::Balances {
                            index,
                            report: &report,
                        });
                    }
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(index, count, error = %err, "Batch swap failed");
                    observer(BatchEvent::Failed { index, error: &err });
                }
            }

            if index < count {
                observer(BatchEvent::Waiting { index, delay });
                sleep(delay).await;
            }
        }

        info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::planner::PlanAsset;
    use crate::domain::Leg;
    use crate::error::ChainError;
    use crate::testkit::{self, MockChainClient};
    use alloy_primitives::U256;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_secs(20);

    fn planner() -> SwapPlanner {
        SwapPlanner::new(
            vec![
                PlanAsset {
                    asset: testkit::mon(),
                    min_amount: dec!(0.001),
                    max_amount: dec!(0.01),
                },
                PlanAsset {
                    asset: testkit::usdc(),
                    min_amount: dec!(0.1),
                    max_amount: dec!(1),
                },
            ],
            Leg::ALL,
        )
    }

    fn funded() -> MockChainClient {
        let chain = MockChainClient::new();
        chain.set_native_balance(U256::from(10u64).pow(U256::from(18u64)));
        chain.set_token_balance(testkit::usdc().address(), U256::from(1_000_000_000u64));
        chain
    }

    #[tokio::test(start_paused = true)]
    async fn runs_sequentially_with_delay_between_swaps() {
        let chain = funded();
        let ctx = testkit::context(chain.clone());
        let planner = planner();
        let start = Instant::now();

        let summary = BatchRunner::new(&ctx, &planner)
            .run(&mut StdRng::seed_from_u64(5), 3, DELAY)
            .await;

        assert_eq!(
            summary,
            BatchSummary {
                attempted: 3,
                succeeded: 3,
                failed: 0
            }
        );
        // two pauses for three swaps
        assert_eq!(start.elapsed(), DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_counted_and_batch_continues() {
        let chain = funded();
        chain.set_allowance(testkit::usdc().address(), testkit::ROUTER, U256::MAX);
        chain.revert_next_receipt();
        let ctx = testkit::context(chain.clone());
        let planner = planner();

        let mut failed_indexes = Vec::new();
        let summary = BatchRunner::new(&ctx, &planner)
            .run_with(&mut StdRng::seed_from_u64(11), 3, DELAY, |event| {
                if let BatchEvent::Failed { index, .. } = event {
                    failed_indexes.push(index);
                }
            })
            .await;

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(failed_indexes, vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_node_errors_fail_every_swap() {
        let chain = funded();
        chain.fail_next_calls(1_000, ChainError::Server("503".into()));
        let ctx = testkit::context(chain.clone());
        let planner = planner();

        let summary = BatchRunner::new(&ctx, &planner)
            .run(&mut StdRng::seed_from_u64(2), 2, DELAY)
            .await;

        assert_eq!(summary.failed, 2);
        assert!(chain.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn balances_follow_each_confirmed_swap() {
        let chain = funded();
        chain.set_allowance(testkit::usdc().address(), testkit::ROUTER, U256::MAX);
        chain.revert_next_receipt();
        let ctx = testkit::context(chain.clone());
        let planner = planner();
        let native = testkit::mon();
        let tokens = [testkit::usdc()];

        let mut reported = Vec::new();
        let summary = BatchRunner::new(&ctx, &planner)
            .with_balances(&native, &tokens)
            .run_with(&mut StdRng::seed_from_u64(11), 3, DELAY, |event| {
                if let BatchEvent::Balances { index, report } = event {
                    assert_eq!(report.rows.len(), 2);
                    assert_eq!(report.failures().count(), 0);
                    reported.push(index);
                }
            })
            .await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(reported, vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn single_swap_does_not_wait() {
        let chain = funded();
        let ctx = testkit::context(chain);
        let planner = planner();
        let start = Instant::now();

        let summary = BatchRunner::new(&ctx, &planner)
            .run(&mut StdRng::seed_from_u64(8), 1, DELAY)
            .await;

        assert_eq!(summary.attempted, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
