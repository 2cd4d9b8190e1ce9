//! Monadswap - token swaps against DEX routers on Monad testnet.
//!
//! The crate wraps the mechanics every swap needs: reading balances and
//! allowances with retries on flaky nodes, granting the router an allowance
//! when one is missing, encoding router calldata, and confirming the mined
//! receipt. On top of that it plans and runs batches of random swaps.
//!
//! # Architecture
//!
//! - **`domain`** - Tokens, swap requests, transactions and unit conversion
//! - **`port`** - The [`port::ChainClient`] trait the core talks through
//! - **`application`** - Retry wrapper, approval manager, router calldata,
//!   swap executor, balance report, random planner and batch runner
//! - **`adapter::outbound::rpc`** - alloy HTTP client with a local signer
//! - **`adapter::inbound::cli`** - clap commands and the interactive shell
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Features
//!
//! - `testkit` - In-memory chain client and fixtures for integration tests
//!
//! # Example
//!
//! ```no_run
//! use monadswap::infrastructure::{bootstrap, config::settings::Config};
//! use monadswap::application::SwapExecutor;
//! use monadswap::domain::SwapRequest;
//!
//! # async fn run() -> monadswap::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let ctx = bootstrap::build_context(&config)?;
//!
//! let mon = config.native();
//! let usdc = config.asset("USDC").expect("USDC configured");
//! let amount = mon.parse_amount("0.01")?;
//! let request = SwapRequest::new(mon, usdc, amount)?;
//! let outcome = SwapExecutor::new(&ctx).perform_swap(&request).await?;
//! println!("{}", outcome.hash);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
