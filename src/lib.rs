//! ip_reputation library: batch IPv4 reputation lookups.
//!
//! For each address the pipeline runs three DNS-based checks:
//!
//! - reverse hostname: does the address have a usable PTR record?
//! - naming convention: does a PTR hostname forward-resolve back to the
//!   address (forward-confirmed reverse DNS)?
//! - blocklist classification: a DNSBL-style query whose answer codes map
//!   onto four fixed list categories.
//!
//! Batches are validated all-or-nothing up front, then executed
//! concurrently with per-address failure tolerance. Results come back in
//! input order, one [`LookupOutcome`] per address.
//!
//! # Example
//!
//! ```no_run
//! use ip_reputation::{run_check, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: PathBuf::from("addresses.txt"),
//!     ..Default::default()
//! };
//!
//! let (outcomes, report) = run_check(&config).await?;
//! println!("{} checked, {} failed", report.total, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod batch;
pub mod config;
mod dns;
mod error_handling;
pub mod export;
pub mod initialization;
mod lookup;
mod models;
mod server;
mod validation;

pub use batch::{run_batch, run_check, CheckReport};
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{DnsLookup, HickoryDns};
pub use error_handling::{BatchError, ErrorType, InfoType, InitializationError, ProcessingStats};
pub use lookup::{lookup_address, LookupContext};
pub use models::{
    CheckStatus, ListCategory, ListMembership, ListStatus, LookupOutcome, LookupResult,
    StandardsCompliance,
};
pub use server::{api_router, start_server, ApiState, LookupRequest};
pub use validation::{parse_address, parse_address_tokens, validate_batch};
