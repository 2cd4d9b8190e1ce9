//! Alloy-backed [`ChainClient`].

use std::time::Duration;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::network::{EthereumWallet, TransactionBuilder};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::classify;
use crate::domain::{LogRecord, TransactionOutcome, TxRequest, TxStatus};
use crate::error::ChainError;
use crate::port::ChainClient;

/// HTTP JSON-RPC client with a local signer.
///
/// Nonce, chain ID and fee fields are filled by the provider; the gas limit
/// always comes from the request.
pub struct RpcChainClient {
    provider: DynProvider,
    sender: Address,
    poll_interval: Duration,
}

impl RpcChainClient {
    /// Connect to `rpc_url`, signing with `signer`.
    ///
    /// No request is made until the first call.
    pub fn new(rpc_url: url::Url, signer: PrivateKeySigner, poll_interval: Duration) -> Self {
        let sender = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(rpc_url)
            .erased();

        Self {
            provider,
            sender,
            poll_interval,
        }
    }
}

fn outcome(receipt: &TransactionReceipt) -> TransactionOutcome {
    let status = if receipt.status() {
        TxStatus::Success
    } else {
        TxStatus::Failure
    };
    let logs = receipt
        .logs()
        .iter()
        .map(|log| LogRecord {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
        })
        .collect();

    TransactionOutcome {
        hash: receipt.transaction_hash,
        status,
        logs,
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ChainError> {
        self.provider.get_balance(address).await.map_err(classify)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let request = TransactionRequest::default()
            .with_from(self.sender)
            .with_to(to)
            .with_input(data);
        self.provider.call(request).await.map_err(classify)
    }

    async fn send_transaction(&self, tx: TxRequest) -> Result<TxHash, ChainError> {
        let request = TransactionRequest::default()
            .with_from(self.sender)
            .with_to(tx.to)
            .with_input(tx.data)
            .with_value(tx.value)
            .with_gas_limit(tx.gas_limit);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(classify)?;
        let hash = *pending.tx_hash();
        debug!(tx_hash = %hash, "Transaction broadcast");
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome, ChainError> {
        // No timeout: poll until mined or the node fails permanently.
        loop {
            match self.provider.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) => return Ok(outcome(&receipt)),
                Ok(None) => {}
                Err(err) => {
                    let err = classify(err);
                    if !err.is_transient() {
                        return Err(err);
                    }
                    warn!(tx_hash = %hash, error = %err, "Receipt poll failed, polling again");
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
