//! Transaction requests, receipts and event logs.

use alloy_primitives::{b256, Address, Bytes, TxHash, B256, U256};
use serde::Serialize;

/// `keccak256("Transfer(address,address,uint256)")`, the ERC-20 transfer topic.
pub const TRANSFER_TOPIC: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// An outgoing transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    /// Target contract.
    pub to: Address,
    /// ABI-encoded calldata including the 4-byte selector.
    pub data: Bytes,
    /// Native value attached to the call.
    pub value: U256,
    /// Gas ceiling; never estimated.
    pub gas_limit: u64,
}

/// Mined status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failure,
}

/// An event record emitted by a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics; the first is the event signature.
    pub topics: Vec<B256>,
    /// Non-indexed payload.
    pub data: Bytes,
}

impl LogRecord {
    /// True when the log is an ERC-20 `Transfer` event.
    #[must_use]
    pub fn is_transfer(&self) -> bool {
        self.topics.first() == Some(&TRANSFER_TOPIC)
    }
}

/// Confirmation record of a submitted transaction. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub hash: TxHash,
    pub status: TxStatus,
    pub logs: Vec<LogRecord>,
}

impl TransactionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == TxStatus::Success
    }

    /// Transfer events emitted by the transaction.
    pub fn transfers(&self) -> impl Iterator<Item = &LogRecord> {
        self.logs.iter().filter(|log| log.is_transfer())
    }

    /// Whether any transfer event corroborates that tokens moved.
    #[must_use]
    pub fn has_transfer(&self) -> bool {
        self.transfers().next().is_some()
    }
}
