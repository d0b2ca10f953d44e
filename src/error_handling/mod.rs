//! Error taxonomy and processing statistics.
//!
//! Only batch-level structural errors ([`BatchError`]) abort before work
//! starts; DNS failures degrade to negative statuses and per-address
//! failures leave the rest of the batch running.

mod stats;
mod types;

pub use stats::ProcessingStats;
pub use types::{BatchError, ErrorType, InfoType, InitializationError};
