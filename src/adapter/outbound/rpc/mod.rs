//! JSON-RPC chain client.
//!
//! Implements [`ChainClient`](crate::port::ChainClient) over HTTP with
//! alloy, signing locally with a private-key wallet.

mod client;
mod error;

pub use client::RpcChainClient;
pub use error::classify;
