//! Chain client port for JSON-RPC nodes.
//!
//! Defines the contract the swap core needs from a remote blockchain node:
//! native balance reads, read-only contract calls, transaction submission
//! and receipt retrieval. Signing is the implementation's concern.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::domain::{TransactionOutcome, TxRequest};
use crate::error::ChainError;

/// Port for reading from and writing to a blockchain node.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Errors
///
/// Methods return [`ChainError`]. Transient node failures are reported as
/// [`ChainError::Server`] or [`ChainError::BadResponse`] so callers can
/// decide whether to retry.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the signing wallet.
    fn sender(&self) -> Address;

    /// Native-currency balance of `address`.
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError>;

    /// Execute a read-only call and return the raw return data.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError>;

    /// Sign and broadcast a transaction, returning its hash.
    async fn send_transaction(&self, tx: TxRequest) -> Result<TxHash, ChainError>;

    /// Block until the transaction is mined and return its outcome.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome, ChainError>;
}
