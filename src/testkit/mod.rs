//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`chain`]: [`MockChainClient`], an in-memory [`ChainClient`](crate::port::ChainClient).
//! - [`domain`]: Fixed addresses and token descriptors.
//! - [`config`]: Canonical router/retry settings and ready-made contexts.

pub mod chain;
pub mod config;
pub mod domain;

pub use chain::MockChainClient;
pub use config::{context, context_with_router, CONFIG_TOML};
pub use domain::{mon, usdc, weth, ROUTER, WALLET, WMON};
