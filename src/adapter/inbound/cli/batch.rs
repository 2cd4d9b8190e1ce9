//! Handler for the `batch` command.

use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::adapter::inbound::cli::command::BatchArgs;
use crate::adapter::inbound::cli::{balance, output};
use crate::application::{probe_available, BatchEvent, BatchRunner, BatchSummary, SwapContext};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Resolved batch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub count: u32,
    pub delay: Duration,
}

impl BatchPlan {
    /// Apply `[batch]` defaults to the overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Rejects a zero count and a delay below `[batch].min_delay_secs`.
    pub fn resolve(config: &Config, count: Option<u32>, delay_secs: Option<u64>) -> Result<Self> {
        let count = count.unwrap_or(config.batch.count);
        let delay_secs = delay_secs.unwrap_or(config.batch.delay_secs);

        if count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "count",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if delay_secs < config.batch.min_delay_secs {
            return Err(ConfigError::InvalidValue {
                field: "delay",
                reason: format!("must be at least {} seconds", config.batch.min_delay_secs),
            }
            .into());
        }

        Ok(Self {
            count,
            delay: Duration::from_secs(delay_secs),
        })
    }
}

/// Execute `batch`.
pub async fn execute(config_path: &Path, args: &BatchArgs) -> Result<()> {
    let config = super::load_config(config_path)?;
    let plan = BatchPlan::resolve(&config, args.count, args.delay)?;
    let ctx = bootstrap::build_context(&config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let summary = run(&config, &ctx, plan, &mut rng).await?;
    if output::is_json() {
        output::json_output(json!({
            "command": "batch",
            "summary": summary,
        }));
    }
    Ok(())
}

/// Probe tokens, then run the batch with progress output.
pub async fn run(
    config: &Config,
    ctx: &SwapContext,
    plan: BatchPlan,
    rng: &mut StdRng,
) -> Result<BatchSummary> {
    output::section("Random Swaps");
    output::field("Router", ctx.router().name());
    output::field("Wallet", ctx.wallet());
    output::field("Swaps", plan.count);
    output::field("Delay", format!("{}s", plan.delay.as_secs()));

    let pb = output::spinner("Checking token availability...");
    let tokens = bootstrap::token_descriptors(config);
    let available = probe_available(ctx, &tokens).await;
    output::spinner_success(
        &pb,
        &format!("{} of {} tokens available", available.len(), tokens.len()),
    );

    let planner = bootstrap::planner(config, ctx.router(), &available);
    let native = config.native();
    let summary = BatchRunner::new(ctx, &planner)
        .with_balances(&native, &available)
        .run_with(rng, plan.count, plan.delay, |event| {
            report(config, plan.count, &event);
        })
        .await;

    output::section("Summary");
    output::field("Attempted", summary.attempted);
    output::field("Succeeded", summary.succeeded);
    output::field("Failed", summary.failed);
    if summary.failed == 0 {
        output::success("Batch complete");
    } else {
        output::warning(&format!("{} swap(s) failed", summary.failed));
    }
    Ok(summary)
}

fn report(config: &Config, count: u32, event: &BatchEvent<'_>) {
    match event {
        BatchEvent::Planned { index, request } => {
            output::section(&format!("Swap {index}/{count}"));
            output::note(&request.to_string());
        }
        BatchEvent::Succeeded { outcome, .. } => {
            output::success("Confirmed");
            output::transaction(outcome.hash, &config.network.explorer_link(outcome.hash));
        }
        BatchEvent::Failed { error, .. } => {
            output::error(&error.to_string());
        }
        BatchEvent::Balances { report, .. } => {
            balance::render(report);
        }
        BatchEvent::Waiting { delay, .. } => {
            output::note(&format!("Waiting {}s...", delay.as_secs()));
        }
    }
}
