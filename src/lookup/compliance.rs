//! Reverse/forward DNS standards-compliance checks.
//!
//! Two informational checks per address, run regardless of blocklist
//! outcome:
//!
//! 1. reverse hostname: does the address have any usable PTR record?
//! 2. naming convention: does one of those hostnames forward-resolve back
//!    to the address (forward-confirmed reverse DNS)?

use std::net::Ipv4Addr;

use crate::dns::DnsLookup;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::models::{CheckStatus, StandardsCompliance};

/// Runs both compliance checks for one address.
///
/// DNS failures are never escalated: a failed reverse lookup reads as zero
/// hostnames, and a hostname whose forward lookup fails is skipped. The
/// first hostname whose A records contain the original address settles the
/// naming-convention check; later hostnames are not queried.
pub async fn check_standards_compliance(
    ip: Ipv4Addr,
    dns: &dyn DnsLookup,
    stats: &ProcessingStats,
) -> StandardsCompliance {
    let hostnames = dns.ptr_records(ip).await;

    if hostnames.is_empty() {
        stats.increment_error(ErrorType::ReverseLookupFailed);
        return StandardsCompliance {
            reverse_hostname: CheckStatus::Failed,
            naming_convention: CheckStatus::Failed,
        };
    }

    let mut naming_convention = CheckStatus::Failed;
    for hostname in &hostnames {
        let addresses = dns.a_records(hostname).await;
        if addresses.is_empty() {
            stats.increment_error(ErrorType::ForwardVerifyFailed);
            continue;
        }
        if addresses.contains(&ip) {
            naming_convention = CheckStatus::Passed;
            stats.increment_info(InfoType::NamingConventionMatch);
            break;
        }
    }

    StandardsCompliance {
        reverse_hostname: CheckStatus::Passed,
        naming_convention,
    }
}
