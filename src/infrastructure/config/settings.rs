//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `WALLET_PRIVATE_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use monadswap::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::batch::BatchConfig;
use super::logging::LoggingConfig;
use super::network::NetworkConfig;
use super::retry::RetryConfig;
use super::router::{RouterConfig, RouterKind};
use super::token::TokenConfig;
use super::wallet::WalletConfig;
use crate::domain::TokenDescriptor;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Node endpoint and native currency.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Router contract and calldata layout.
    #[serde(default)]
    pub router: RouterConfig,

    /// Tradable ERC-20 tokens.
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,

    /// Retry behavior for RPC reads.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Random batch defaults.
    #[serde(default)]
    pub batch: BatchConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Wallet configuration for transaction signing.
    ///
    /// Private key is loaded from `WALLET_PRIVATE_KEY` environment variable.
    #[serde(default)]
    pub wallet: WalletConfig,
}

fn read_keystore_password() -> Result<String> {
    if let Ok(password) = std::env::var("MONADSWAP_KEYSTORE_PASSWORD") {
        return Ok(password);
    }
    if let Ok(path) = std::env::var("MONADSWAP_KEYSTORE_PASSWORD_FILE") {
        let contents = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let password = contents.trim().to_string();
        if password.is_empty() {
            return Err(ConfigError::MissingField {
                field: "MONADSWAP_KEYSTORE_PASSWORD_FILE",
            }
            .into());
        }
        return Ok(password);
    }

    Err(ConfigError::MissingField {
        field: "MONADSWAP_KEYSTORE_PASSWORD",
    }
    .into())
}

fn decrypt_keystore_private_key(path: &str, password: &str) -> Result<String> {
    use alloy_signer_local::PrivateKeySigner;

    let signer = PrivateKeySigner::decrypt_keystore(path, password).map_err(|e| {
        ConfigError::InvalidValue {
            field: "keystore_path",
            reason: e.to_string(),
        }
    })?;
    Ok(format!("{:x}", signer.to_bytes()))
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the private key from the `WALLET_PRIVATE_KEY` environment variable
    /// or decrypts it from a keystore file if `keystore_path` is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., duplicate token symbols)
    /// - Keystore decryption fails when using keystore authentication
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Load private key from environment variable (never from config file for security)
        config.wallet.private_key = std::env::var("WALLET_PRIVATE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if config.wallet.private_key.is_none() {
            if let Some(ref keystore_path) = config.wallet.keystore_path {
                let password = read_keystore_password()?;
                config.wallet.private_key =
                    Some(decrypt_keystore_private_key(keystore_path, &password)?);
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.network.rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "rpc_url" }.into());
        }
        url::Url::parse(&self.network.rpc_url).map_err(|e| ConfigError::InvalidValue {
            field: "rpc_url",
            reason: e.to_string(),
        })?;
        if self.network.native_symbol.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "native_symbol",
            }
            .into());
        }
        if self.network.native_min_amount <= Decimal::ZERO
            || self.network.native_min_amount > self.network.native_max_amount
        {
            return Err(ConfigError::InvalidValue {
                field: "native_min_amount",
                reason: "must be positive and <= native_max_amount".to_string(),
            }
            .into());
        }
        if self.network.receipt_poll_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "receipt_poll_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.router.address == Address::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "router.address",
                reason: "must not be the zero address".to_string(),
            }
            .into());
        }
        if self.router.kind == RouterKind::Bean && self.router.wrapped_native.is_none() {
            return Err(ConfigError::MissingField {
                field: "router.wrapped_native",
            }
            .into());
        }
        if self.router.deadline_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "router.deadline_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let gas = &self.router.gas;
        if [gas.native_to_token, gas.token_to_native, gas.token_to_token]
            .iter()
            .any(|limit| *limit == Some(0))
        {
            return Err(ConfigError::InvalidValue {
                field: "router.gas",
                reason: "gas limits must be greater than 0".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        seen.insert(self.network.native_symbol.to_ascii_uppercase());
        for token in &self.tokens {
            if !seen.insert(token.symbol.to_ascii_uppercase()) {
                return Err(ConfigError::InvalidValue {
                    field: "tokens.symbol",
                    reason: format!("duplicate symbol {}", token.symbol),
                }
                .into());
            }
            if token.address == Address::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "tokens.address",
                    reason: format!("{} uses the native sentinel address", token.symbol),
                }
                .into());
            }
            if token.min_amount <= Decimal::ZERO
                || token.min_amount > token.max_amount
            {
                return Err(ConfigError::InvalidValue {
                    field: "tokens.min_amount",
                    reason: format!("{}: must be positive and <= max_amount", token.symbol),
                }
                .into());
            }
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.batch.delay_secs < self.batch.min_delay_secs {
            return Err(ConfigError::InvalidValue {
                field: "batch.delay_secs",
                reason: format!("must be >= min_delay_secs ({})", self.batch.min_delay_secs),
            }
            .into());
        }
        Ok(())
    }

    /// Descriptor of the native currency.
    #[must_use]
    pub fn native(&self) -> TokenDescriptor {
        TokenDescriptor::native(
            self.network.native_symbol.clone(),
            self.network.native_decimals,
        )
    }

    /// Find a configured token by symbol (case-insensitive).
    #[must_use]
    pub fn token(&self, symbol: &str) -> Option<&TokenConfig> {
        self.tokens
            .iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Resolve a symbol to an asset, including the native currency.
    #[must_use]
    pub fn asset(&self, symbol: &str) -> Option<TokenDescriptor> {
        if self.network.native_symbol.eq_ignore_ascii_case(symbol) {
            return Some(self.native());
        }
        self.token(symbol).map(TokenConfig::descriptor)
    }

    /// Configured `[min, max]` amount of an asset, native currency included.
    #[must_use]
    pub fn amount_range(&self, symbol: &str) -> Option<(Decimal, Decimal)> {
        if self.network.native_symbol.eq_ignore_ascii_case(symbol) {
            return Some((self.network.native_min_amount, self.network.native_max_amount));
        }
        self.token(symbol)
            .map(|token| (token.min_amount, token.max_amount))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Other(format!("failed to render config: {e}")).into())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
