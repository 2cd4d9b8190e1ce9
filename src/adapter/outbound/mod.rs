//! Outbound adapters (driven side).

pub mod rpc;
