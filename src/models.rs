//! Core result types for IP reputation lookups.
//!
//! These types serialize directly to the JSON shapes returned by the batch
//! API, so the serde renames here are part of the wire contract.

use serde::Serialize;
use strum_macros::EnumIter;

/// Outcome of a single yes/no DNS check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    /// The check succeeded.
    #[serde(rename = "Passed!")]
    Passed,
    /// The check failed or could not be completed.
    #[serde(rename = "Failed!")]
    Failed,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Passed => f.write_str("Passed!"),
            CheckStatus::Failed => f.write_str("Failed!"),
        }
    }
}

/// Whether an address appears on a given blocklist category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListMembership {
    /// The blocklist response contained this category's code.
    #[serde(rename = "On the list")]
    OnList,
    /// The category's code was absent (or the address is not listed at all).
    #[serde(rename = "Not on the list")]
    NotOnList,
}

impl std::fmt::Display for ListMembership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListMembership::OnList => f.write_str("On the list"),
            ListMembership::NotOnList => f.write_str("Not on the list"),
        }
    }
}

/// The four reputation categories the blocklist zone reports.
///
/// Each category is bound to a single-digit response code carried in the
/// final octet of the blocklist answer. The code and name bindings are
/// static configuration: `list_statuses` output always covers all four
/// categories in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ListCategory {
    /// Sources of unsolicited bulk mail.
    Spam,
    /// Hosts serving credential-phishing content.
    Phishing,
    /// Hosts distributing malware.
    Malware,
    /// Members of known botnets.
    Botnet,
}

impl ListCategory {
    /// The response code bound to this category.
    pub const fn code(self) -> u8 {
        match self {
            ListCategory::Spam => 2,
            ListCategory::Phishing => 3,
            ListCategory::Malware => 4,
            ListCategory::Botnet => 5,
        }
    }

    /// Human-readable category name used in API responses and CSV export.
    pub const fn display_name(self) -> &'static str {
        match self {
            ListCategory::Spam => "Spam",
            ListCategory::Phishing => "Phishing",
            ListCategory::Malware => "Malware",
            ListCategory::Botnet => "Botnet",
        }
    }
}

/// Reverse-DNS standards compliance for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardsCompliance {
    /// Whether the address has any usable PTR record.
    #[serde(rename = "reverseHostname")]
    pub reverse_hostname: CheckStatus,
    /// Whether a PTR hostname forward-resolves back to the address.
    #[serde(rename = "namingConvention")]
    pub naming_convention: CheckStatus,
}

/// Membership status for one blocklist category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListStatus {
    /// Category name.
    pub list: &'static str,
    /// Whether the address is on that category's list.
    pub status: ListMembership,
}

/// Full lookup result for one address.
///
/// Immutable after construction. `list_statuses` always contains exactly one
/// entry per [`ListCategory`], in category declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult {
    /// The address that was looked up, in dotted-quad form.
    pub ip: String,
    /// Reverse/forward DNS compliance checks.
    #[serde(rename = "standardsCompliance")]
    pub standards_compliance: StandardsCompliance,
    /// Per-category blocklist membership, fixed order, all categories present.
    #[serde(rename = "listStatuses")]
    pub list_statuses: Vec<ListStatus>,
}

/// Per-address slot in a batch response.
///
/// A failed slot marks an address whose pipeline hit an unexpected error
/// (timeout, task panic); the rest of the batch is unaffected and the
/// address can be resubmitted on its own.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    /// The lookup pipeline completed (even if every sub-check failed).
    Completed(LookupResult),
    /// The lookup pipeline itself failed for this address.
    Failed {
        /// The address whose lookup failed.
        ip: String,
        /// Human-readable failure description.
        error: String,
    },
}

impl LookupOutcome {
    /// The address this outcome belongs to.
    pub fn ip(&self) -> &str {
        match self {
            LookupOutcome::Completed(result) => &result.ip,
            LookupOutcome::Failed { ip, .. } => ip,
        }
    }

    /// True if the pipeline completed for this address.
    pub fn is_completed(&self) -> bool {
        matches!(self, LookupOutcome::Completed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_check_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&CheckStatus::Passed).unwrap(),
            "\"Passed!\""
        );
        assert_eq!(
            serde_json::to_string(&CheckStatus::Failed).unwrap(),
            "\"Failed!\""
        );
    }

    #[test]
    fn test_list_membership_wire_format() {
        assert_eq!(
            serde_json::to_string(&ListMembership::OnList).unwrap(),
            "\"On the list\""
        );
        assert_eq!(
            serde_json::to_string(&ListMembership::NotOnList).unwrap(),
            "\"Not on the list\""
        );
    }

    #[test]
    fn test_category_codes_are_unique_single_digits() {
        let codes: Vec<u8> = ListCategory::iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), 4);
        for (i, code) in codes.iter().enumerate() {
            assert!(*code < 10, "code {code} is not a single digit");
            assert!(!codes[i + 1..].contains(code), "duplicate code {code}");
        }
    }

    #[test]
    fn test_lookup_result_json_field_names() {
        let result = LookupResult {
            ip: "192.0.2.1".to_string(),
            standards_compliance: StandardsCompliance {
                reverse_hostname: CheckStatus::Failed,
                naming_convention: CheckStatus::Failed,
            },
            list_statuses: vec![ListStatus {
                list: ListCategory::Spam.display_name(),
                status: ListMembership::NotOnList,
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ip"], "192.0.2.1");
        assert_eq!(json["standardsCompliance"]["reverseHostname"], "Failed!");
        assert_eq!(json["standardsCompliance"]["namingConvention"], "Failed!");
        assert_eq!(json["listStatuses"][0]["list"], "Spam");
        assert_eq!(json["listStatuses"][0]["status"], "Not on the list");
    }

    #[test]
    fn test_failed_outcome_serializes_as_error_record() {
        let outcome = LookupOutcome::Failed {
            ip: "192.0.2.9".to_string(),
            error: "lookup timed out".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["ip"], "192.0.2.9");
        assert_eq!(json["error"], "lookup timed out");
        assert!(json.get("standardsCompliance").is_none());
    }
}
