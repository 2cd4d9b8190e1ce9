//! Path utilities for monadswap.
//!
//! All data lives under `~/.monadswap/`:
//! - `~/.monadswap/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the monadswap home directory (`~/.monadswap/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".monadswap")
}

/// Returns the default config file path (`~/.monadswap/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_monadswap_home() {
        assert!(home_dir().ends_with(".monadswap"));
        assert!(default_config().to_string_lossy().contains(".monadswap"));
    }
}
