//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors and conversions that validate
//! swap inputs before anything touches the chain.
//!
//! # Examples
//!
//! ```
//! use monadswap::domain::error::DomainError;
//! use monadswap::domain::TokenDescriptor;
//! use rust_decimal_macros::dec;
//!
//! let mon = TokenDescriptor::native("MON", 18);
//! let result = mon.to_base_units(dec!(-1));
//!
//! assert!(matches!(result, Err(DomainError::NegativeAmount { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A swap needs two different assets.
    #[error("cannot swap {symbol} for itself")]
    SameToken {
        /// Symbol used on both legs.
        symbol: String,
    },

    /// Swapping nothing is never submitted.
    #[error("swap amount must be greater than zero")]
    ZeroAmount,

    /// Human amounts are never negative.
    #[error("amount must not be negative, got {amount}")]
    NegativeAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Amount does not fit the token's smallest unit representation.
    #[error("amount {amount} is out of range for {decimals} decimals")]
    AmountOutOfRange {
        /// The rejected amount.
        amount: String,
        /// Token decimals.
        decimals: u8,
    },

    /// Amount has more fractional digits than the token can represent.
    #[error("amount {amount} has more than {decimals} decimal places")]
    ExcessPrecision {
        /// The rejected amount.
        amount: Decimal,
        /// Token decimals.
        decimals: u8,
    },

    /// Amount could not be parsed as a decimal number.
    #[error("invalid amount '{input}'")]
    InvalidAmount {
        /// The raw input.
        input: String,
    },

    /// Random amount range that is inverted, non-positive, or narrower
    /// than the amount precision.
    #[error("invalid amount range for {symbol}: [{min}, {max}]")]
    InvalidRange {
        /// Asset symbol.
        symbol: String,
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },
}
