//! Allowance snapshots.

use alloy_primitives::{Address, U256};

/// Allowance granted by `owner` to `spender`, read fresh from the chain.
///
/// Never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalState {
    pub owner: Address,
    pub spender: Address,
    pub current_allowance: U256,
}

impl ApprovalState {
    /// Whether the allowance already covers `required`.
    #[must_use]
    pub fn covers(&self, required: U256) -> bool {
        self.current_allowance >= required
    }

    /// Whether the allowance is the infinite-approval sentinel.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.current_allowance == U256::MAX
    }
}
