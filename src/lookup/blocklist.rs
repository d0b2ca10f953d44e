//! DNSBL-style blocklist classification.
//!
//! The query name is the address with its octets reversed, under the
//! configured blocklist zone: checking `1.2.3.4` against `dnsbl.example`
//! resolves `4.3.2.1.dnsbl.example`. Each A record in the answer carries a
//! response code in its final octet; the codes map onto [`ListCategory`]
//! via the static bindings in `models.rs`.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use strum::IntoEnumIterator;

use crate::dns::DnsLookup;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::models::{ListCategory, ListMembership, ListStatus};

/// Builds the blocklist query name for an address.
pub fn query_name(ip: Ipv4Addr, zone: &str) -> String {
    let octets = ip.octets();
    format!(
        "{}.{}.{}.{}.{}",
        octets[3], octets[2], octets[1], octets[0], zone
    )
}

/// Maps a set of response codes onto the full fixed category sequence.
///
/// Every category appears exactly once, in declaration order; categories
/// whose code is absent are explicitly `NotOnList`. Codes that match no
/// category are ignored.
pub fn statuses_from_codes(codes: &HashSet<u8>) -> Vec<ListStatus> {
    ListCategory::iter()
        .map(|category| ListStatus {
            list: category.display_name(),
            status: if codes.contains(&category.code()) {
                ListMembership::OnList
            } else {
                ListMembership::NotOnList
            },
        })
        .collect()
}

/// Queries the blocklist zone and classifies the address.
///
/// Resolution failure reads as "not listed": the common NXDOMAIN answer and
/// genuine lookup errors both yield an empty code set (the distinction is
/// logged and counted at the DNS layer).
pub async fn check_blocklists(
    ip: Ipv4Addr,
    dns: &dyn DnsLookup,
    zone: &str,
    stats: &ProcessingStats,
) -> Vec<ListStatus> {
    let query = query_name(ip, zone);
    let records = dns.blocklist_records(&query).await;

    let codes: HashSet<u8> = records.iter().map(|addr| addr.octets()[3]).collect();
    if !codes.is_empty() {
        log::debug!("{ip} blocklist response codes: {codes:?}");
    }

    let statuses = statuses_from_codes(&codes);
    if statuses.iter().any(|s| s.status == ListMembership::OnList) {
        stats.increment_info(InfoType::AddressListed);
    }
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::testing::MockDns;

    #[test]
    fn test_query_name_reverses_octets() {
        assert_eq!(
            query_name(Ipv4Addr::new(1, 2, 3, 4), "dnsbl.reputation.example"),
            "4.3.2.1.dnsbl.reputation.example"
        );
    }

    #[test]
    fn test_statuses_cover_all_categories_in_fixed_order() {
        let statuses = statuses_from_codes(&HashSet::new());
        let names: Vec<&str> = statuses.iter().map(|s| s.list).collect();
        assert_eq!(names, vec!["Spam", "Phishing", "Malware", "Botnet"]);
        assert!(statuses
            .iter()
            .all(|s| s.status == ListMembership::NotOnList));
    }

    #[test]
    fn test_single_code_marks_only_its_category() {
        let codes: HashSet<u8> = [ListCategory::Spam.code()].into_iter().collect();
        let statuses = statuses_from_codes(&codes);
        for status in &statuses {
            let expected = if status.list == "Spam" {
                ListMembership::OnList
            } else {
                ListMembership::NotOnList
            };
            assert_eq!(status.status, expected, "category {}", status.list);
        }
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let codes: HashSet<u8> = [9, 127].into_iter().collect();
        let statuses = statuses_from_codes(&codes);
        assert!(statuses
            .iter()
            .all(|s| s.status == ListMembership::NotOnList));
    }

    #[tokio::test]
    async fn test_check_blocklists_listed_address() {
        let ip = Ipv4Addr::new(192, 0, 2, 7);
        let stats = ProcessingStats::new();
        let dns = MockDns::new().with_blocklist(
            "7.2.0.192.dnsbl.test",
            vec![
                Ipv4Addr::new(127, 0, 0, ListCategory::Spam.code()),
                Ipv4Addr::new(127, 0, 0, ListCategory::Botnet.code()),
            ],
        );

        let statuses = check_blocklists(ip, &dns, "dnsbl.test", &stats).await;
        assert_eq!(statuses.len(), 4);
        assert_eq!(statuses[0].status, ListMembership::OnList); // Spam
        assert_eq!(statuses[1].status, ListMembership::NotOnList); // Phishing
        assert_eq!(statuses[2].status, ListMembership::NotOnList); // Malware
        assert_eq!(statuses[3].status, ListMembership::OnList); // Botnet
        assert_eq!(stats.get_info_count(InfoType::AddressListed), 1);
    }

    #[tokio::test]
    async fn test_check_blocklists_unlisted_address() {
        let ip = Ipv4Addr::new(192, 0, 2, 8);
        let stats = ProcessingStats::new();
        let dns = MockDns::new();

        let statuses = check_blocklists(ip, &dns, "dnsbl.test", &stats).await;
        assert_eq!(statuses.len(), 4);
        assert!(statuses
            .iter()
            .all(|s| s.status == ListMembership::NotOnList));
        assert_eq!(stats.get_info_count(InfoType::AddressListed), 0);
    }
}
