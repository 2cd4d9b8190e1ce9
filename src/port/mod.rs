//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The swap core talks to the outside world through these traits so that
//! the alloy RPC adapter can be swapped for an in-memory double in tests.

pub mod outbound;

pub use outbound::chain::ChainClient;
