//! Infrastructure configuration modules.

pub mod batch;
pub mod logging;
pub mod network;
pub mod retry;
pub mod router;
pub mod settings;
pub mod token;
pub mod wallet;

pub use settings::Config;
