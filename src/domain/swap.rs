//! Swap requests and route legs.

use std::fmt;

use alloy_primitives::U256;

use super::error::DomainError;
use super::token::TokenDescriptor;

/// Which side of a swap, if any, is the native currency.
///
/// Routers use a distinct method and parameter layout per leg kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leg {
    /// Pay native currency, receive a token.
    NativeToToken,
    /// Pay a token, receive native currency.
    TokenToNative,
    /// Token on both sides.
    TokenToToken,
}

impl Leg {
    /// Classify a pair of assets. Returns `None` when both are native.
    #[must_use]
    pub fn classify(from: &TokenDescriptor, to: &TokenDescriptor) -> Option<Self> {
        match (from.is_native(), to.is_native()) {
            (true, false) => Some(Self::NativeToToken),
            (false, true) => Some(Self::TokenToNative),
            (false, false) => Some(Self::TokenToToken),
            (true, true) => None,
        }
    }

    /// All leg kinds, in menu order.
    pub const ALL: [Leg; 3] = [Leg::NativeToToken, Leg::TokenToNative, Leg::TokenToToken];
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeToToken => write!(f, "native->token"),
            Self::TokenToNative => write!(f, "token->native"),
            Self::TokenToToken => write!(f, "token->token"),
        }
    }
}

/// A single swap attempt. Constructed per attempt, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    from: TokenDescriptor,
    to: TokenDescriptor,
    amount_in: U256,
    leg: Leg,
}

impl SwapRequest {
    /// Build a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SameToken`] when both legs are the same asset
    /// (or both are native) and [`DomainError::ZeroAmount`] for a zero amount.
    pub fn new(
        from: TokenDescriptor,
        to: TokenDescriptor,
        amount_in: U256,
    ) -> Result<Self, DomainError> {
        if from.symbol() == to.symbol() || from.address() == to.address() {
            return Err(DomainError::SameToken {
                symbol: from.symbol().to_string(),
            });
        }
        if amount_in.is_zero() {
            return Err(DomainError::ZeroAmount);
        }
        // Distinct addresses rule out the native/native pair.
        let leg = Leg::classify(&from, &to).ok_or_else(|| DomainError::SameToken {
            symbol: from.symbol().to_string(),
        })?;

        Ok(Self {
            from,
            to,
            amount_in,
            leg,
        })
    }

    #[must_use]
    pub fn from(&self) -> &TokenDescriptor {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &TokenDescriptor {
        &self.to
    }

    /// Amount in the from-token's smallest unit.
    #[must_use]
    pub const fn amount_in(&self) -> U256 {
        self.amount_in
    }

    #[must_use]
    pub const fn leg(&self) -> Leg {
        self.leg
    }
}

impl fmt::Display for SwapRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.from.format_units(self.amount_in),
            self.from.symbol(),
            self.to.symbol()
        )
    }
}
