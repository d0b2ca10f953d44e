//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `ip_reputation` library:
//! - command-line argument parsing (check / serve subcommands)
//! - logger initialization
//! - user-facing output formatting
//!
//! All lookup functionality lives in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use ip_reputation::config::{
    DEFAULT_BIND_HOST, DEFAULT_DNSBL_ZONE, DEFAULT_MAX_CONCURRENCY, DEFAULT_PORT,
};
use ip_reputation::initialization::init_logger_with;
use ip_reputation::{run_check, start_server, Config, LogFormat, LogLevel, LookupOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "ip_reputation",
    version,
    about = "Batch IPv4 reputation lookups: reverse-DNS compliance and DNSBL classification"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Check a batch of addresses from a file (or stdin with `-`)
    Check(CheckArgs),
    /// Serve the batch lookup JSON API
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// File of address candidates; comma/whitespace/newline separated, `#` comments
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// Maximum concurrent per-address lookups
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// DNS blocklist zone to query
    #[arg(long, default_value = DEFAULT_DNSBL_ZONE)]
    dnsbl_zone: String,

    /// Also write results to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// Maximum concurrent per-address lookups per batch
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// DNS blocklist zone to query
    #[arg(long, default_value = DEFAULT_DNSBL_ZONE)]
    dnsbl_zone: String,

    /// Bind host
    #[arg(long, default_value = DEFAULT_BIND_HOST)]
    host: String,

    /// Bind port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        CliCommand::Check(args) => {
            init_logger_with(args.log_level.clone().into(), args.log_format.clone())
                .context("Failed to initialize logger")?;

            let config = Config {
                input: args.input,
                log_level: args.log_level,
                log_format: args.log_format,
                max_concurrency: args.max_concurrency,
                dnsbl_zone: args.dnsbl_zone,
                csv_output: args.csv,
                ..Default::default()
            };

            match run_check(&config).await {
                Ok((outcomes, report)) => {
                    print_outcomes(&outcomes);
                    println!(
                        "Checked {} address{} ({} completed, {} failed) in {:.1}s",
                        report.total,
                        if report.total == 1 { "" } else { "es" },
                        report.successful,
                        report.failed,
                        report.elapsed_seconds
                    );
                    Ok(())
                }
                Err(e) => {
                    eprintln!("ip_reputation error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        CliCommand::Serve(args) => {
            init_logger_with(args.log_level.clone().into(), args.log_format.clone())
                .context("Failed to initialize logger")?;

            let config = Config {
                log_level: args.log_level,
                log_format: args.log_format,
                max_concurrency: args.max_concurrency,
                dnsbl_zone: args.dnsbl_zone,
                host: args.host,
                port: args.port,
                ..Default::default()
            };

            if let Err(e) = start_server(&config).await {
                eprintln!("ip_reputation error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
    }
}

fn print_outcomes(outcomes: &[LookupOutcome]) {
    for outcome in outcomes {
        match outcome {
            LookupOutcome::Completed(result) => {
                let lists = result
                    .list_statuses
                    .iter()
                    .map(|s| format!("{}: {}", s.list, s.status))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{}  reverse hostname: {}  naming convention: {}  [{}]",
                    result.ip,
                    result.standards_compliance.reverse_hostname,
                    result.standards_compliance.naming_convention,
                    lists
                );
            }
            LookupOutcome::Failed { ip, error } => {
                println!("{}  FAILED: {} (retry this address individually)", ip, error);
            }
        }
    }
}
