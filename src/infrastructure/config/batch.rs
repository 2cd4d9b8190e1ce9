//! Random batch defaults.

use serde::{Deserialize, Serialize};

/// Defaults for sequential random swap batches.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Swaps per batch.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Pause between swaps (seconds).
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    /// Smallest pause accepted from the user (seconds).
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: u64,
}

fn default_count() -> u32 {
    5
}

fn default_delay_secs() -> u64 {
    20
}

fn default_min_delay_secs() -> u64 {
    15
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            delay_secs: default_delay_secs(),
            min_delay_secs: default_min_delay_secs(),
        }
    }
}
