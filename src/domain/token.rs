//! Token descriptors and unit conversion.
//!
//! Amounts travel through the core as [`U256`] in the token's smallest
//! unit. Human amounts are [`Decimal`] and only exist at the edges
//! (config, prompts, display).

use std::fmt;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Immutable description of a swappable asset.
///
/// The native currency is represented by the zero address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    symbol: String,
    address: Address,
    decimals: u8,
}

impl TokenDescriptor {
    /// Create a descriptor for an ERC-20 token.
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }

    /// Create the descriptor of the chain's native currency.
    pub fn native(symbol: impl Into<String>, decimals: u8) -> Self {
        Self::new(symbol, Address::ZERO, decimals)
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// True for the native-currency sentinel.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.address == Address::ZERO
    }

    /// Convert a human amount into the token's smallest unit.
    ///
    /// Digits beyond the token's decimals are rejected rather than rounded.
    pub fn to_base_units(&self, amount: Decimal) -> Result<U256, DomainError> {
        parse_units(amount, self.decimals)
    }

    /// Parse a user-typed amount into base units.
    pub fn parse_amount(&self, input: &str) -> Result<U256, DomainError> {
        let amount: Decimal =
            input
                .trim()
                .parse()
                .map_err(|_| DomainError::InvalidAmount {
                    input: input.to_string(),
                })?;
        self.to_base_units(amount)
    }

    /// Render base units as a human amount without trailing zeros.
    #[must_use]
    pub fn format_units(&self, value: U256) -> String {
        format_units(value, self.decimals)
    }
}

impl fmt::Display for TokenDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Scale a human amount up by `decimals` places.
///
/// # Errors
///
/// Fails for negative amounts, amounts with more than `decimals`
/// fractional digits, and results that do not fit in 256 bits.
pub fn parse_units(amount: Decimal, decimals: u8) -> Result<U256, DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::NegativeAmount { amount });
    }

    let amount = amount.normalize();
    let mantissa = amount.mantissa().unsigned_abs();
    let scale = amount.scale();
    let places = u32::from(decimals);

    if scale > places {
        return Err(DomainError::ExcessPrecision { amount, decimals });
    }

    U256::from(10u64)
        .checked_pow(U256::from(places - scale))
        .and_then(|factor| U256::from(mantissa).checked_mul(factor))
        .ok_or_else(|| DomainError::AmountOutOfRange {
            amount: amount.to_string(),
            decimals,
        })
}

/// Render `value` scaled down by `decimals` places.
#[must_use]
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let places = usize::from(decimals);
    if places == 0 {
        return digits;
    }

    let padded = if digits.len() <= places {
        format!("{}{digits}", "0".repeat(places - digits.len() + 1))
    } else {
        digits
    };
    let (int, frac) = padded.split_at(padded.len() - places);
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    }
}
