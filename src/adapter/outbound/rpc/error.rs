//! Mapping of alloy transport errors onto [`ChainError`].

use alloy_transport::{RpcError, TransportError};

use crate::error::ChainError;

/// Classify a transport error.
///
/// Transport failures (HTTP status, dropped connections) become
/// [`ChainError::Server`]; empty or undecodable responses become
/// [`ChainError::BadResponse`]. JSON-RPC error objects keep their message
/// as [`ChainError::Rpc`] so message signatures still decide transience.
pub fn classify(err: TransportError) -> ChainError {
    match err {
        RpcError::ErrorResp(payload) => ChainError::Rpc(payload.to_string()),
        RpcError::NullResp => ChainError::BadResponse("null response".to_string()),
        RpcError::DeserError { err, text } => {
            ChainError::BadResponse(format!("{err} (body: {text})"))
        }
        RpcError::Transport(kind) => ChainError::Server(kind.to_string()),
        RpcError::LocalUsageError(err) => ChainError::Signer(err.to_string()),
        other => ChainError::Rpc(other.to_string()),
    }
}
