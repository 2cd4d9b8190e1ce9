//! Interactive menu driving the swap core.
//!
//! The shell keeps one context for its lifetime. A failed action is
//! reported and the menu comes back; only "Exit" (or a prompt error such as
//! a closed terminal) ends the loop.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Input, Select};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use crate::adapter::inbound::cli::batch::{self, BatchPlan};
use crate::adapter::inbound::cli::wallet::approve;
use crate::adapter::inbound::cli::{balance, output, swap};
use crate::application::SwapContext;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    RandomBatch,
    ManualSwap,
    Balances,
    Approve,
    Exit,
}

impl MenuItem {
    const ALL: [MenuItem; 5] = [
        MenuItem::RandomBatch,
        MenuItem::ManualSwap,
        MenuItem::Balances,
        MenuItem::Approve,
        MenuItem::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::RandomBatch => "Run random swaps",
            Self::ManualSwap => "Manual swap",
            Self::Balances => "Check balances",
            Self::Approve => "Approve token",
            Self::Exit => "Exit",
        }
    }
}

/// Run the interactive shell.
pub async fn execute(config_path: &Path) -> Result<()> {
    if output::is_json() {
        return Err(ConfigError::InvalidValue {
            field: "json",
            reason: "the shell is interactive; use the subcommands for scripted runs".to_string(),
        }
        .into());
    }

    let config = super::load_config(config_path)?;
    let ctx = bootstrap::build_context(&config)?;
    let theme = ColorfulTheme::default();
    let mut rng = StdRng::from_entropy();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Wallet", ctx.wallet());
    output::field("Router", format!("{} {}", ctx.router().name(), ctx.router().address()));

    loop {
        println!();
        let labels: Vec<&str> = MenuItem::ALL.iter().map(|item| item.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let item = MenuItem::ALL[choice];
        let result = match item {
            MenuItem::RandomBatch => random_batch(&config, &ctx, &theme, &mut rng).await,
            MenuItem::ManualSwap => manual_swap(&config, &ctx, &theme).await,
            MenuItem::Balances => balance::show(&config, &ctx).await,
            MenuItem::Approve => approve_token(&config, &ctx, &theme).await,
            MenuItem::Exit => break,
        };

        if let Err(err) = result {
            output::error(&err.to_string());
        }
    }

    output::note("Bye");
    Ok(())
}

async fn random_batch(
    config: &Config,
    ctx: &SwapContext,
    theme: &ColorfulTheme,
    rng: &mut StdRng,
) -> Result<()> {
    let count: u32 = Input::with_theme(theme)
        .with_prompt("Number of swaps")
        .default(config.batch.count)
        .interact()?;

    let min_delay = config.batch.min_delay_secs;
    let delay: u64 = Input::with_theme(theme)
        .with_prompt(format!("Seconds between swaps (min {min_delay})"))
        .default(config.batch.delay_secs)
        .validate_with(|secs: &u64| -> std::result::Result<(), String> {
            if *secs < min_delay {
                Err(format!("must be at least {min_delay} seconds"))
            } else {
                Ok(())
            }
        })
        .interact()?;

    let plan = BatchPlan::resolve(config, Some(count), Some(delay))?;
    batch::run(config, ctx, plan, rng).await?;
    Ok(())
}

async fn manual_swap(config: &Config, ctx: &SwapContext, theme: &ColorfulTheme) -> Result<()> {
    let symbols: Vec<String> = std::iter::once(config.network.native_symbol.clone())
        .chain(config.tokens.iter().map(|token| token.symbol.clone()))
        .collect();

    let from = Select::with_theme(theme)
        .with_prompt("Swap from")
        .items(&symbols)
        .default(0)
        .interact()?;

    let targets: Vec<&String> = symbols
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != from)
        .map(|(_, symbol)| symbol)
        .collect();
    if targets.is_empty() {
        output::warning("Configure at least one token to swap");
        return Ok(());
    }
    let to = Select::with_theme(theme)
        .with_prompt("Swap to")
        .items(&targets)
        .default(0)
        .interact()?;

    let range = config.amount_range(&symbols[from]);
    let prompt = match range {
        Some((min, max)) => format!("Amount of {} ({min} - {max})", symbols[from]),
        None => format!("Amount of {}", symbols[from]),
    };
    let amount: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            match range {
                Some((min, max)) => check_amount(input, min, max),
                None => Ok(()),
            }
        })
        .interact()?;

    let request = swap::resolve_request(config, &symbols[from], targets[to], &amount)?;
    swap::submit(config, ctx, &request).await?;
    balance::show(config, ctx).await
}

/// Accept `input` only when it parses to an amount within `[min, max]`.
fn check_amount(input: &str, min: Decimal, max: Decimal) -> std::result::Result<(), String> {
    let amount: Decimal = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", input.trim()))?;
    if amount < min || amount > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

async fn approve_token(config: &Config, ctx: &SwapContext, theme: &ColorfulTheme) -> Result<()> {
    if config.tokens.is_empty() {
        output::warning("No tokens configured");
        return Ok(());
    }

    let labels: Vec<String> = config.tokens.iter().map(|token| token.label()).collect();
    let choice = Select::with_theme(theme)
        .with_prompt("Token to approve")
        .items(&labels)
        .default(0)
        .interact()?;

    approve::approve(ctx, &config.tokens[choice].descriptor()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn manual_amount_must_be_within_range() {
        assert!(check_amount("0.5", dec!(0.01), dec!(1)).is_ok());
        assert!(check_amount(" 1 ", dec!(0.01), dec!(1)).is_ok());
        assert!(check_amount("0.01", dec!(0.01), dec!(1)).is_ok());

        let err = check_amount("1.5", dec!(0.01), dec!(1)).unwrap_err();
        assert_eq!(err, "must be between 0.01 and 1");
        assert!(check_amount("0.001", dec!(0.01), dec!(1)).is_err());
        assert!(check_amount("lots", dec!(0.01), dec!(1)).is_err());
    }

    #[test]
    fn menu_ends_with_exit() {
        assert_eq!(MenuItem::ALL.last(), Some(&MenuItem::Exit));
        assert_eq!(MenuItem::ALL[0].label(), "Run random swaps");
    }
}
