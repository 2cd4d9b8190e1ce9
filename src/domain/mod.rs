//! Chain-agnostic swap domain types.

mod approval;
mod swap;
mod token;
mod transaction;

pub mod error;

pub use approval::ApprovalState;
pub use swap::{Leg, SwapRequest};
pub use token::{format_units, parse_units, TokenDescriptor};
pub use transaction::{LogRecord, TransactionOutcome, TxRequest, TxStatus, TRANSFER_TOPIC};
