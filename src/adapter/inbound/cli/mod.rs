//! CLI module graph and command dispatch.

pub mod balance;
pub mod batch;
pub mod command;
pub mod config;
pub mod output;
pub mod paths;
pub mod shell;
pub mod swap;
pub mod wallet;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{Cli, ColorChoice, Commands, ConfigCommand, WalletCommand};

impl ColorChoice {
    /// Force or release colored output for the whole process.
    pub fn apply(&self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// Load the configuration and start logging.
///
/// `-q` lowers the configured level to warn, `-v` raises it to debug and
/// `-vv` to trace. `RUST_LOG` still wins.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load(path)?;
    match (output::is_quiet(), output::verbosity()) {
        (true, _) => config.logging.level = "warn".to_string(),
        (false, 0) => {}
        (false, 1) => config.logging.level = "debug".to_string(),
        (false, _) => config.logging.level = "trace".to_string(),
    }
    config.init_logging();
    Ok(config)
}

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    cli.color.apply();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let path = cli.config.as_path();
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::execute(path).await,
        Commands::Balance => balance::execute(path).await,
        Commands::Swap(args) => swap::execute(path, &args).await,
        Commands::Batch(args) => batch::execute(path, &args).await,
        Commands::Approve(args) => wallet::approve::execute_approve(path, &args.token).await,
        Commands::Wallet(WalletCommand::Address) => wallet::address::execute_address(path),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(path, args.force),
        Commands::Config(ConfigCommand::Show) => config::execute_show(path),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(path),
    }
}
