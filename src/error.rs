use alloy_primitives::U256;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Message fragments that mark a node failure as transient.
///
/// Matched case-insensitively against the rendered error message.
pub const TRANSIENT_SIGNATURES: &[&str] = &["server_error", "bad response"];

/// Return true when an error message carries a known transient signature.
#[must_use]
pub fn is_transient_message(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    TRANSIENT_SIGNATURES.iter().any(|sig| lower.contains(sig))
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures reported by the chain client.
///
/// `Server` and `BadResponse` are transient: the node misbehaved and the
/// same request may succeed later. `Rpc` covers everything the node
/// answered deliberately (reverts, insufficient funds, nonce problems).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("SERVER_ERROR: {0}")]
    Server(String),

    #[error("bad response from node: {0}")]
    BadResponse(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("signer error: {0}")]
    Signer(String),
}

impl ChainError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Server(_) | Self::BadResponse(_) => true,
            Self::Rpc(message) => is_transient_message(message),
            Self::Signer(_) => false,
        }
    }
}

/// Swap workflow errors surfaced to the caller.
#[derive(Error, Debug)]
pub enum SwapError {
    #[error("approval of {token} failed: {reason}")]
    ApprovalFailed { token: String, reason: String },

    #[error("node rejected transaction: {0}")]
    SubmissionFailed(String),

    #[error("transaction {tx_hash} reverted")]
    TransactionReverted { tx_hash: String },

    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("insufficient {token} balance: required {required}, available {available}")]
    InsufficientBalance {
        token: String,
        required: U256,
        available: U256,
    },

    #[error("insufficient {token} allowance: required {required}, current {current}")]
    InsufficientAllowance {
        token: String,
        required: U256,
        current: U256,
    },

    #[error("router {router} does not support {from} -> {to}")]
    UnsupportedRoute {
        router: &'static str,
        from: String,
        to: String,
    },

    #[error("unknown token symbol: {0}")]
    UnknownToken(String),

    #[error("no swappable pair among {available} available assets")]
    NoSwappablePair { available: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Swap(#[from] SwapError),

    #[error("ABI error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Whether the error belongs to the transient RPC class.
    ///
    /// Only chain errors can be transient; workflow errors never are.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Chain(err) => err.is_transient(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_and_bad_response_are_transient() {
        assert!(ChainError::Server("503".into()).is_transient());
        assert!(ChainError::BadResponse("truncated body".into()).is_transient());
    }

    #[test]
    fn rpc_error_is_classified_by_message() {
        assert!(ChainError::Rpc("missing response: SERVER_ERROR".into()).is_transient());
        assert!(ChainError::Rpc("Bad Response from upstream".into()).is_transient());
        assert!(!ChainError::Rpc("execution reverted".into()).is_transient());
        assert!(!ChainError::Rpc("insufficient funds for gas".into()).is_transient());
    }

    #[test]
    fn signer_errors_are_permanent() {
        assert!(!ChainError::Signer("bad key".into()).is_transient());
    }

    #[test]
    fn only_chain_errors_are_transient_at_crate_level() {
        let transient: Error = ChainError::Server("down".into()).into();
        assert!(transient.is_transient());

        let exhausted: Error = SwapError::RetriesExhausted {
            attempts: 3,
            last_error: "SERVER_ERROR".into(),
        }
        .into();
        assert!(!exhausted.is_transient());

        let config: Error = ConfigError::Other("SERVER_ERROR".into()).into();
        assert!(!config.is_transient());
    }

    #[test]
    fn swap_error_messages_name_the_token() {
        let err = SwapError::InsufficientBalance {
            token: "USDC".into(),
            required: U256::from(100u64),
            available: U256::from(5u64),
        };
        assert_eq!(
            err.to_string(),
            "insufficient USDC balance: required 100, available 5"
        );
    }
}
