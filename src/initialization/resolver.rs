//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT_SECS;

/// Initializes the shared DNS resolver.
///
/// The same resolver serves all three query kinds in the pipeline: PTR
/// reverse lookups, A-record forward verification, and blocklist queries.
/// Timeouts are kept tight so a slow DNS server degrades one sub-check
/// instead of stalling a concurrent batch.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // Blocklist query names look like hostnames with many labels; ndots = 0
    // stops the resolver from appending search domains to them.
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
