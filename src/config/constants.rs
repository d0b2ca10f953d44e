//! Configuration constants.
//!
//! Operational defaults for timeouts, concurrency, and the blocklist zone.

use std::time::Duration;

/// Maximum concurrent per-address lookups (semaphore limit).
/// Each address costs at most a handful of DNS queries, so a modest cap
/// keeps resolver load predictable without serializing the batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Per-address pipeline timeout.
/// Upper bound: reverse lookup + forward verification of a few hostnames +
/// blocklist query, each bounded by the resolver timeout below.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

/// DNS query timeout in seconds.
/// Most queries complete in well under a second; 3s fails fast on slow or
/// unresponsive DNS servers so one address cannot stall a concurrent batch.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// DNS blocklist zone queried for reputation classification.
///
/// Query names are built by reversing an address's octets and appending this
/// suffix. The code-to-category bindings in [`crate::models::ListCategory`]
/// are specific to this zone's response conventions.
pub const DEFAULT_DNSBL_ZONE: &str = "dnsbl.reputation.example";

/// Default bind address for the API server.
pub const DEFAULT_BIND_HOST: &str = "127.0.0.1";

/// Default port for the API server.
pub const DEFAULT_PORT: u16 = 8053;
