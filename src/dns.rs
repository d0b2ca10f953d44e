//! DNS query plumbing.
//!
//! The lookup pipeline talks to DNS through the [`DnsLookup`] trait so the
//! per-address logic can be exercised against a scripted resolver in tests.
//! The production implementation wraps a hickory `TokioAsyncResolver`.
//!
//! Failure policy: every method degrades to an empty answer set. A missing
//! PTR record, an NXDOMAIN from the blocklist zone, or a query timeout all
//! read the same to callers; they are logged (and counted, where
//! interesting) here.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::{ErrorType, ProcessingStats};

/// DNS operations the lookup pipeline depends on.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// PTR hostnames for an address, in resolver-returned order.
    /// Empty on NXDOMAIN, timeout, or any other failure.
    async fn ptr_records(&self, ip: Ipv4Addr) -> Vec<String>;

    /// IPv4 A records for a hostname. Empty on any failure.
    async fn a_records(&self, name: &str) -> Vec<Ipv4Addr>;

    /// A records for a blocklist query name. Empty when the address is not
    /// listed (the common NXDOMAIN answer) or on any other failure.
    async fn blocklist_records(&self, query: &str) -> Vec<Ipv4Addr>;
}

/// Production [`DnsLookup`] backed by hickory-resolver.
pub struct HickoryDns {
    resolver: Arc<TokioAsyncResolver>,
    stats: Arc<ProcessingStats>,
}

impl HickoryDns {
    /// Wraps a configured resolver. The stats tracker records unexpected
    /// blocklist resolution failures (anything other than "no records").
    pub fn new(resolver: Arc<TokioAsyncResolver>, stats: Arc<ProcessingStats>) -> Self {
        Self { resolver, stats }
    }

    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let lookup = self.resolver.lookup(name, RecordType::A).await?;
        Ok(lookup
            .iter()
            .filter_map(|rdata| {
                if let RData::A(a) = rdata {
                    Some(a.0)
                } else {
                    None
                }
            })
            .collect())
    }
}

/// Scripted [`DnsLookup`] for unit tests: fixed answers, no network.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Mock resolver returning pre-seeded answers; anything unseeded
    /// resolves to an empty set, matching the production failure policy.
    #[derive(Default)]
    pub struct MockDns {
        ptr: HashMap<Ipv4Addr, Vec<String>>,
        a: HashMap<String, Vec<Ipv4Addr>>,
        blocklist: HashMap<String, Vec<Ipv4Addr>>,
    }

    impl MockDns {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_ptr(mut self, ip: Ipv4Addr, hostnames: Vec<&str>) -> Self {
            self.ptr
                .insert(ip, hostnames.into_iter().map(String::from).collect());
            self
        }

        pub fn with_a(mut self, name: &str, addresses: Vec<Ipv4Addr>) -> Self {
            self.a.insert(name.to_string(), addresses);
            self
        }

        pub fn with_blocklist(mut self, query: &str, addresses: Vec<Ipv4Addr>) -> Self {
            self.blocklist.insert(query.to_string(), addresses);
            self
        }
    }

    #[async_trait]
    impl DnsLookup for MockDns {
        async fn ptr_records(&self, ip: Ipv4Addr) -> Vec<String> {
            self.ptr.get(&ip).cloned().unwrap_or_default()
        }

        async fn a_records(&self, name: &str) -> Vec<Ipv4Addr> {
            self.a.get(name).cloned().unwrap_or_default()
        }

        async fn blocklist_records(&self, query: &str) -> Vec<Ipv4Addr> {
            self.blocklist.get(query).cloned().unwrap_or_default()
        }
    }
}

#[async_trait]
impl DnsLookup for HickoryDns {
    async fn ptr_records(&self, ip: Ipv4Addr) -> Vec<String> {
        match self.resolver.reverse_lookup(IpAddr::V4(ip)).await {
            Ok(response) => response.iter().map(|name| name.to_utf8()).collect(),
            Err(e) => {
                log::debug!("Reverse DNS lookup for {ip} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn a_records(&self, name: &str) -> Vec<Ipv4Addr> {
        match self.lookup_a(name).await {
            Ok(addresses) => addresses,
            Err(e) => {
                log::debug!("A-record lookup for {name} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn blocklist_records(&self, query: &str) -> Vec<Ipv4Addr> {
        match self.lookup_a(query).await {
            Ok(addresses) => addresses,
            Err(e) => {
                // NXDOMAIN is the normal "not listed" answer; anything else
                // is worth a warning and a counter.
                if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    log::debug!("Blocklist query {query}: not listed");
                } else {
                    log::warn!("Blocklist query {query} failed: {e}");
                    self.stats.increment_error(ErrorType::BlocklistLookupFailed);
                }
                Vec::new()
            }
        }
    }
}
