//! Error type definitions.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Batch-level structural errors.
///
/// These abort the batch before any lookup work starts; everything that can
/// go wrong after validation degrades to per-address or per-sub-check
/// negative results instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// The request contained no addresses at all.
    #[error("No IP addresses provided")]
    Empty,

    /// One or more entries failed the dotted-quad pattern or octet range.
    /// The whole batch is rejected; every offender is listed.
    #[error("Invalid IP address(es): {}", .0.join(", "))]
    InvalidAddresses(Vec<String>),
}

/// Types of errors that can occur while processing a single address.
///
/// These categorize recoverable conditions: each one degrades to a negative
/// status on the affected address rather than failing the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// PTR lookup returned no usable hostnames (NXDOMAIN, timeout, error).
    ReverseLookupFailed,
    /// A-record lookup of a PTR hostname failed during forward verification.
    ForwardVerifyFailed,
    /// A-record lookup of the blocklist query name failed in an unexpected
    /// way (distinct from the common NXDOMAIN "not listed" answer).
    BlocklistLookupFailed,
    /// The whole per-address pipeline exceeded its deadline.
    LookupTimeout,
    /// The per-address task panicked.
    TaskPanic,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label for summaries and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ReverseLookupFailed => "Reverse DNS lookup failed",
            ErrorType::ForwardVerifyFailed => "Forward verification lookup failed",
            ErrorType::BlocklistLookupFailed => "Blocklist lookup failed",
            ErrorType::LookupTimeout => "Lookup timeout",
            ErrorType::TaskPanic => "Lookup task panic",
        }
    }
}

/// Types of informational events worth counting during lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// An address was found on at least one blocklist category.
    AddressListed,
    /// A PTR hostname forward-resolved back to its address.
    NamingConventionMatch,
}

impl InfoType {
    /// Human-readable label for summaries and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::AddressListed => "Address on a blocklist",
            InfoType::NamingConventionMatch => "Naming convention match",
        }
    }
}
