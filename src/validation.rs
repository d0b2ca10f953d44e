//! Input tokenization and address validation.
//!
//! Validation is an all-or-nothing gate: a batch with any malformed entry is
//! rejected outright with every offender named, before any DNS work starts.
//! This is deliberately distinct from the per-address failure tolerance in
//! batch execution.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::BatchError;

/// Shape gate: exactly four groups of 1-3 ASCII digits separated by literal
/// dots, anchored at both ends. No surrounding whitespace, IPv6, or CIDR.
static ADDRESS_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}$").expect("static regex must compile"));

/// Splits free-form text into address candidate tokens.
///
/// Accepts comma, whitespace, and newline separated input (the same helper
/// backs file, stdin, and API-consumer entry paths). Tokens are trimmed and
/// empties dropped; lines starting with `#` are treated as comments.
pub fn parse_address_tokens(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses one candidate into an [`Ipv4Addr`], or `None` if it fails the
/// dotted-quad shape or octet range.
///
/// The shape gate requires 1-3 digit groups; on top of that each octet must
/// parse into 0-255. Leading zeros are accepted (`001.2.3.4` is octet 1),
/// which `Ipv4Addr::from_str` would reject, so octets are parsed by hand.
pub fn parse_address(candidate: &str) -> Option<Ipv4Addr> {
    if !ADDRESS_SHAPE.is_match(candidate) {
        return None;
    }

    let mut octets = [0u8; 4];
    for (slot, group) in octets.iter_mut().zip(candidate.split('.')) {
        // 1-3 digits always fit in u32; the range check does the real work.
        let value: u32 = group.parse().ok()?;
        *slot = u8::try_from(value).ok()?;
    }
    Some(Ipv4Addr::from(octets))
}

/// Validates a whole batch of address candidates.
///
/// Returns the parsed addresses in input order, or a [`BatchError`] naming
/// every offending entry. Duplicates are allowed and preserved.
pub fn validate_batch(candidates: &[String]) -> Result<Vec<Ipv4Addr>, BatchError> {
    if candidates.is_empty() {
        return Err(BatchError::Empty);
    }

    let mut addresses = Vec::with_capacity(candidates.len());
    let mut offenders = Vec::new();
    for candidate in candidates {
        match parse_address(candidate) {
            Some(address) => addresses.push(address),
            None => offenders.push(candidate.clone()),
        }
    }

    if offenders.is_empty() {
        Ok(addresses)
    } else {
        Err(BatchError::InvalidAddresses(offenders))
    }
}
