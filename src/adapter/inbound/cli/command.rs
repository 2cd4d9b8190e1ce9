//! Command-line interface definitions.
//!
//! Defines the CLI structure for monadswap using `clap`. Running without a
//! subcommand opens the interactive shell; the subcommands expose the same
//! operations for scripting.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Token swaps on Monad testnet DEX routers
#[derive(Parser, Debug)]
#[command(name = "monadswap")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive menu (default)
    Shell,

    /// Show native and token balances of the wallet
    Balance,

    /// Swap a fixed amount of one asset for another
    Swap(SwapArgs),

    /// Run a batch of random swaps
    Batch(BatchArgs),

    /// Grant the router an unlimited allowance for a token
    Approve(ApproveArgs),

    /// Wallet utilities
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `monadswap wallet`.
#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Display the wallet address derived from the private key.
    Address,
}

/// Subcommands for `monadswap config`.
///
/// Provides configuration management utilities including generation,
/// display, and validation of configuration files.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `swap` subcommand.
#[derive(Parser, Debug)]
pub struct SwapArgs {
    /// Symbol of the asset to pay with (e.g. MON, USDC).
    #[arg(long)]
    pub from: String,

    /// Symbol of the asset to receive.
    #[arg(long)]
    pub to: String,

    /// Amount of the from-asset in whole units (e.g. 0.5).
    #[arg(long)]
    pub amount: String,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `batch` subcommand.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Number of swaps (defaults to `[batch].count`).
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Seconds between swaps (defaults to `[batch].delay_secs`).
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Seed for the random source, for reproducible batches.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `approve` subcommand.
#[derive(Parser, Debug)]
pub struct ApproveArgs {
    /// Symbol of the token to approve.
    #[arg(long)]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["monadswap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["monadswap", "balance", "--config", "/tmp/x.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/x.toml"));
        assert!(matches!(cli.command, Some(Commands::Balance)));
    }

    #[test]
    fn default_config_lives_under_home() {
        let cli = Cli::try_parse_from(["monadswap", "balance"]).unwrap();
        assert!(cli.config.ends_with(".monadswap/config.toml"));
    }

    #[test]
    fn parses_swap_args() {
        let cli = Cli::try_parse_from([
            "monadswap", "swap", "--from", "USDC", "--to", "MON", "--amount", "1.5", "-y",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Swap(args)) => {
                assert_eq!(args.from, "USDC");
                assert_eq!(args.to, "MON");
                assert_eq!(args.amount, "1.5");
                assert!(args.yes);
            }
            other => panic!("expected swap, got {other:?}"),
        }
    }

    #[test]
    fn swap_requires_amount() {
        assert!(Cli::try_parse_from(["monadswap", "swap", "--from", "USDC", "--to", "MON"]).is_err());
    }

    #[test]
    fn batch_args_are_optional() {
        let cli = Cli::try_parse_from(["monadswap", "batch", "-n", "3"]).unwrap();
        match cli.command {
            Some(Commands::Batch(args)) => {
                assert_eq!(args.count, Some(3));
                assert_eq!(args.delay, None);
            }
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_subcommands() {
        let cli = Cli::try_parse_from(["monadswap", "--json", "wallet", "address"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Wallet(WalletCommand::Address))));

        let cli = Cli::try_parse_from(["monadswap", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommand::Init(ConfigInitArgs { force: true })))
        ));
    }

    #[test]
    fn parses_color_and_verbosity() {
        let cli = Cli::try_parse_from(["monadswap", "--color", "never", "-vv", "shell"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
        assert_eq!(cli.verbose, 2);
    }
}
