//! Application services (use cases).
//!
//! These services orchestrate domain logic and drive the chain port
//! to implement swaps, approvals, balance reports and random batches.

pub mod approval;
pub mod balance;
pub mod batch;
pub mod contracts;
pub mod context;
pub mod planner;
pub mod retry;
pub mod router;
pub mod swap;

pub use approval::ApprovalManager;
pub use balance::{balance_report, probe_available, BalanceReport, BalanceRow};
pub use batch::{BatchEvent, BatchRunner, BatchSummary};
pub use context::SwapContext;
pub use planner::{PlanAsset, SwapPlanner};
pub use retry::{execute_with_retry, RetryPolicy};
pub use router::{RouteEncoding, RouterProfile};
pub use swap::SwapExecutor;
