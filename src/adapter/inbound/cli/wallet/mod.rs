//! Wallet operations CLI handlers.
//!
//! Command handlers are split by subcommand to keep each file focused.

pub mod address;
pub mod approve;
