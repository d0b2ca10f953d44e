//! Per-address lookup pipeline.
//!
//! One [`lookup_address`] call runs the standards-compliance checks and the
//! blocklist classification for a single address and assembles the result.
//! The pipeline is infallible by construction: every DNS failure degrades
//! to a negative status, so unexpected errors can only surface as timeouts
//! or panics, which batch orchestration turns into per-address failures.

use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::dns::DnsLookup;
use crate::error_handling::ProcessingStats;
use crate::models::LookupResult;

mod blocklist;
mod compliance;

pub use blocklist::{check_blocklists, query_name, statuses_from_codes};
pub use compliance::check_standards_compliance;

/// Shared, read-only context for lookup pipelines.
///
/// One context serves an entire batch (or a whole server); per-address
/// pipelines hold no mutable state of their own.
pub struct LookupContext {
    /// DNS backend (production resolver or a test double).
    pub dns: Arc<dyn DnsLookup>,
    /// Blocklist zone suffix for reputation queries.
    pub zone: String,
    /// Shared counters for failures and notable events.
    pub stats: Arc<ProcessingStats>,
}

impl LookupContext {
    /// Bundles a DNS backend, blocklist zone, and stats tracker.
    pub fn new(dns: Arc<dyn DnsLookup>, zone: impl Into<String>, stats: Arc<ProcessingStats>) -> Self {
        Self {
            dns,
            zone: zone.into(),
            stats,
        }
    }
}

/// Runs the full lookup pipeline for one address.
///
/// The compliance checks and the blocklist query are independent and run
/// concurrently.
pub async fn lookup_address(ip: Ipv4Addr, ctx: &LookupContext) -> LookupResult {
    let (standards_compliance, list_statuses) = tokio::join!(
        check_standards_compliance(ip, ctx.dns.as_ref(), &ctx.stats),
        check_blocklists(ip, ctx.dns.as_ref(), &ctx.zone, &ctx.stats),
    );

    LookupResult {
        ip: ip.to_string(),
        standards_compliance,
        list_statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::testing::MockDns;
    use crate::models::{CheckStatus, ListMembership};

    #[tokio::test]
    async fn test_lookup_address_assembles_full_result() {
        let ip = Ipv4Addr::new(192, 0, 2, 33);
        let dns = MockDns::new()
            .with_ptr(ip, vec!["mail.example.org."])
            .with_a("mail.example.org.", vec![ip])
            .with_blocklist("33.2.0.192.dnsbl.test", vec![Ipv4Addr::new(127, 0, 0, 2)]);
        let ctx = LookupContext::new(
            Arc::new(dns),
            "dnsbl.test",
            Arc::new(ProcessingStats::new()),
        );

        let result = lookup_address(ip, &ctx).await;
        assert_eq!(result.ip, "192.0.2.33");
        assert_eq!(
            result.standards_compliance.reverse_hostname,
            CheckStatus::Passed
        );
        assert_eq!(
            result.standards_compliance.naming_convention,
            CheckStatus::Passed
        );
        assert_eq!(result.list_statuses.len(), 4);
        assert_eq!(result.list_statuses[0].list, "Spam");
        assert_eq!(result.list_statuses[0].status, ListMembership::OnList);
    }

    #[tokio::test]
    async fn test_lookup_address_with_no_dns_data_completes_negatively() {
        let ip = Ipv4Addr::new(198, 51, 100, 200);
        let ctx = LookupContext::new(
            Arc::new(MockDns::new()),
            "dnsbl.test",
            Arc::new(ProcessingStats::new()),
        );

        let result = lookup_address(ip, &ctx).await;
        assert_eq!(
            result.standards_compliance.reverse_hostname,
            CheckStatus::Failed
        );
        assert_eq!(
            result.standards_compliance.naming_convention,
            CheckStatus::Failed
        );
        assert!(result
            .list_statuses
            .iter()
            .all(|s| s.status == ListMembership::NotOnList));
    }

    #[tokio::test]
    async fn test_lookup_is_idempotent_against_unchanged_dns() {
        let ip = Ipv4Addr::new(192, 0, 2, 33);
        let dns = MockDns::new()
            .with_ptr(ip, vec!["mail.example.org."])
            .with_a("mail.example.org.", vec![ip]);
        let ctx = LookupContext::new(
            Arc::new(dns),
            "dnsbl.test",
            Arc::new(ProcessingStats::new()),
        );

        let first = lookup_address(ip, &ctx).await;
        let second = lookup_address(ip, &ctx).await;
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
