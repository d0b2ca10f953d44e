//! Batch orchestration.
//!
//! Runs the per-address pipeline over a validated batch, concurrently and
//! bounded by a semaphore. Per-address pipelines are independent; one
//! timing out or panicking yields a failed slot for that address while the
//! rest of the batch completes. Output order always equals input order.

use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::config::{Config, LOOKUP_TIMEOUT};
use crate::dns::HickoryDns;
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::initialization::{init_resolver, init_semaphore};
use crate::lookup::{lookup_address, LookupContext};
use crate::models::LookupOutcome;
use crate::validation::{parse_address_tokens, validate_batch};

/// Summary of a completed batch run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Number of addresses in the batch.
    pub total: usize,
    /// Addresses whose pipeline completed (including all-negative results).
    pub successful: usize,
    /// Addresses whose pipeline failed (timeout or panic).
    pub failed: usize,
    /// Wall-clock batch duration in seconds.
    pub elapsed_seconds: f64,
}

/// Looks up every address in the batch concurrently.
///
/// Each address gets its own task, bounded by a semaphore of
/// `max_concurrency` permits and an overall per-address deadline. Outcomes
/// are returned in input order regardless of completion order.
pub async fn run_batch(
    addresses: &[Ipv4Addr],
    ctx: Arc<LookupContext>,
    max_concurrency: usize,
) -> Vec<LookupOutcome> {
    let semaphore = init_semaphore(max_concurrency.max(1));

    let handles: Vec<_> = addresses
        .iter()
        .copied()
        .map(|ip| {
            let ctx = Arc::clone(&ctx);
            let semaphore = Arc::clone(&semaphore);
            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        // The semaphore lives as long as this task and is
                        // never closed; treat a closed semaphore as fatal
                        // for this address only.
                        return LookupOutcome::Failed {
                            ip: ip.to_string(),
                            error: "lookup scheduling failed".to_string(),
                        };
                    }
                };

                match tokio::time::timeout(LOOKUP_TIMEOUT, lookup_address(ip, &ctx)).await {
                    Ok(result) => LookupOutcome::Completed(result),
                    Err(_) => {
                        log::warn!("Lookup for {ip} timed out");
                        ctx.stats.increment_error(ErrorType::LookupTimeout);
                        LookupOutcome::Failed {
                            ip: ip.to_string(),
                            error: format!(
                                "lookup timed out after {}s",
                                LOOKUP_TIMEOUT.as_secs()
                            ),
                        }
                    }
                }
            })
        })
        .collect();

    // Joining handles in submission order keeps output aligned with input;
    // the tasks themselves still run concurrently.
    let mut outcomes = Vec::with_capacity(addresses.len());
    for (ip, handle) in addresses.iter().zip(handles) {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(join_error) => {
                log::warn!("Lookup task for {ip} panicked: {join_error:?}");
                ctx.stats.increment_error(ErrorType::TaskPanic);
                outcomes.push(LookupOutcome::Failed {
                    ip: ip.to_string(),
                    error: "lookup task panicked".to_string(),
                });
            }
        }
    }
    outcomes
}

/// Runs a one-shot batch check from the configured input source.
///
/// Reads free-form text from a file (or stdin when the input path is `-`),
/// tokenizes and validates it as a whole batch, runs the lookups, and
/// optionally exports the results as CSV. This is the entry point behind
/// the `check` subcommand.
pub async fn run_check(config: &Config) -> Result<(Vec<LookupOutcome>, CheckReport)> {
    let text = read_input(&config.input).await?;
    let candidates = parse_address_tokens(&text);
    let addresses = validate_batch(&candidates)?;
    info!("Checking {} address(es)", addresses.len());

    let stats = Arc::new(ProcessingStats::new());
    let resolver = init_resolver();
    let ctx = Arc::new(LookupContext::new(
        Arc::new(HickoryDns::new(resolver, Arc::clone(&stats))),
        config.dnsbl_zone.clone(),
        Arc::clone(&stats),
    ));

    let start_time = std::time::Instant::now();
    let outcomes = run_batch(&addresses, ctx, config.max_concurrency).await;
    let elapsed_seconds = start_time.elapsed().as_secs_f64();

    if let Some(csv_path) = &config.csv_output {
        let exported = crate::export::export_csv_to_path(&outcomes, csv_path)
            .context("Failed to export CSV")?;
        info!("Exported {} result(s) to {}", exported, csv_path.display());
    }

    stats.log_summary();

    let successful = outcomes.iter().filter(|o| o.is_completed()).count();
    let report = CheckReport {
        total: outcomes.len(),
        successful,
        failed: outcomes.len() - successful,
        elapsed_seconds,
    };
    Ok((outcomes, report))
}

async fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        use tokio::io::AsyncReadExt;
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read addresses from stdin")?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read input file {}", input.display()))
    }
}
