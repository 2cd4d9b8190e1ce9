//! In-memory [`ChainClient`] for testing.
//!
//! [`MockChainClient`] answers `balanceOf` / `allowance` from its own state,
//! records every submitted transaction, and applies `approve` calls when
//! their receipt is fetched. Failures are scripted per call kind.
//!
//! Clones share state, so a test keeps one handle for assertions and hands
//! another to the code under test.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash, B256, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use parking_lot::Mutex;

use super::domain::WALLET;
use crate::application::contracts::IERC20;
use crate::domain::{LogRecord, TransactionOutcome, TxRequest, TxStatus, TRANSFER_TOPIC};
use crate::error::ChainError;
use crate::port::ChainClient;

struct MockState {
    sender: Address,
    native_balance: U256,
    token_balances: HashMap<Address, U256>,
    /// Keyed by (token, spender); the owner is always the sender.
    allowances: HashMap<(Address, Address), U256>,
    unavailable: HashSet<Address>,
    call_errors: VecDeque<ChainError>,
    send_errors: VecDeque<ChainError>,
    reverts: u32,
    ignore_approvals: bool,
    emit_transfers: bool,
    reads: u32,
    nonce: u64,
    sent: Vec<TxRequest>,
    pending: HashMap<TxHash, TxRequest>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            sender: WALLET,
            native_balance: U256::ZERO,
            token_balances: HashMap::new(),
            allowances: HashMap::new(),
            unavailable: HashSet::new(),
            call_errors: VecDeque::new(),
            send_errors: VecDeque::new(),
            reverts: 0,
            ignore_approvals: false,
            emit_transfers: true,
            reads: 0,
            nonce: 0,
            sent: Vec::new(),
            pending: HashMap::new(),
        }
    }
}

/// Scriptable chain client backed by shared in-memory state.
#[derive(Clone, Default)]
pub struct MockChainClient {
    state: Arc<Mutex<MockState>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    // --- State ---

    pub fn set_native_balance(&self, balance: U256) {
        self.state.lock().native_balance = balance;
    }

    pub fn set_token_balance(&self, token: Address, balance: U256) {
        self.state.lock().token_balances.insert(token, balance);
    }

    pub fn set_allowance(&self, token: Address, spender: Address, amount: U256) {
        self.state.lock().allowances.insert((token, spender), amount);
    }

    pub fn allowance_of(&self, token: Address, spender: Address) -> U256 {
        self.state
            .lock()
            .allowances
            .get(&(token, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Make every call to `token` revert, as for a missing contract.
    pub fn set_unavailable(&self, token: Address) {
        self.state.lock().unavailable.insert(token);
    }

    // --- Failure scripting ---

    /// Fail the next `n` reads (`get_balance` or `call`) with `error`.
    pub fn fail_next_calls(&self, n: usize, error: ChainError) {
        let mut state = self.state.lock();
        state
            .call_errors
            .extend(std::iter::repeat(error).take(n));
    }

    /// Fail the next `send_transaction` with `error`.
    pub fn fail_next_send(&self, error: ChainError) {
        self.state.lock().send_errors.push_back(error);
    }

    /// Mine the next fetched receipt with failure status.
    pub fn revert_next_receipt(&self) {
        self.state.lock().reverts += 1;
    }

    /// Confirm approvals without changing the allowance.
    pub fn ignore_approvals(&self) {
        self.state.lock().ignore_approvals = true;
    }

    /// Stop attaching Transfer logs to receipts.
    pub fn without_transfer_logs(&self) {
        self.state.lock().emit_transfers = false;
    }

    // --- Assertions ---

    /// Number of reads served or failed so far.
    pub fn call_count(&self) -> u32 {
        self.state.lock().reads
    }

    /// Transactions submitted so far, in order.
    pub fn sent(&self) -> Vec<TxRequest> {
        self.state.lock().sent.clone()
    }
}

fn word(value: U256) -> Bytes {
    Bytes::copy_from_slice(&value.to_be_bytes::<32>())
}

fn topic(address: Address) -> B256 {
    B256::left_padding_from(address.as_slice())
}

fn answer(state: &MockState, to: Address, data: &[u8]) -> Result<Bytes, ChainError> {
    if state.unavailable.contains(&to) {
        return Err(ChainError::Rpc("execution reverted".into()));
    }
    if let Ok(_call) = IERC20::balanceOfCall::abi_decode(data) {
        let balance = state.token_balances.get(&to).copied().unwrap_or_default();
        return Ok(word(balance));
    }
    if let Ok(call) = IERC20::allowanceCall::abi_decode(data) {
        let allowance = state
            .allowances
            .get(&(to, call.spender))
            .copied()
            .unwrap_or_default();
        return Ok(word(allowance));
    }
    Err(ChainError::Rpc("execution reverted: unknown selector".into()))
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn sender(&self) -> Address {
        self.state.lock().sender
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, ChainError> {
        let mut state = self.state.lock();
        state.reads += 1;
        if let Some(err) = state.call_errors.pop_front() {
            return Err(err);
        }
        Ok(state.native_balance)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let mut state = self.state.lock();
        state.reads += 1;
        if let Some(err) = state.call_errors.pop_front() {
            return Err(err);
        }
        answer(&state, to, &data)
    }

    async fn send_transaction(&self, tx: TxRequest) -> Result<TxHash, ChainError> {
        let mut state = self.state.lock();
        if let Some(err) = state.send_errors.pop_front() {
            return Err(err);
        }
        state.nonce += 1;
        let hash = TxHash::left_padding_from(&state.nonce.to_be_bytes());
        state.sent.push(tx.clone());
        state.pending.insert(hash, tx);
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionOutcome, ChainError> {
        let mut state = self.state.lock();
        let tx = state
            .pending
            .remove(&hash)
            .ok_or_else(|| ChainError::Rpc(format!("unknown transaction {hash}")))?;

        let status = if state.reverts > 0 {
            state.reverts -= 1;
            TxStatus::Failure
        } else {
            TxStatus::Success
        };

        if status == TxStatus::Success && !state.ignore_approvals {
            if let Ok(approve) = IERC20::approveCall::abi_decode(&tx.data) {
                state
                    .allowances
                    .insert((tx.to, approve.spender), approve.amount);
            }
        }

        // Transfer logs are attached regardless of status.
        let logs = if state.emit_transfers {
            vec![LogRecord {
                address: tx.to,
                topics: vec![TRANSFER_TOPIC, topic(state.sender), topic(tx.to)],
                data: word(tx.value),
            }]
        } else {
            Vec::new()
        };

        Ok(TransactionOutcome { hash, status, logs })
    }
}
