//! Processing statistics tracking.
//!
//! Thread-safe counters for DNS failures and notable events during lookups.
//! All counters are initialized to zero and can be shared across tasks
//! behind an `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};

/// Thread-safe lookup statistics tracker.
///
/// Errors are recoverable DNS/processing failures; info events are notable
/// non-failure observations (an address turning up on a list, a naming
/// convention match).
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker with every counter initialized to zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProcessingStats { errors, info }
    }

    /// Increment an error counter.
    ///
    /// All variants are inserted in `new()`, so the lookup cannot miss; if it
    /// ever does, the event is logged and dropped rather than panicking.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("Missing error counter for {error:?}; ProcessingStats init bug");
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info: InfoType) {
        if let Some(counter) = self.info.get(&info) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("Missing info counter for {info:?}; ProcessingStats init bug");
        }
    }

    /// Current count for one error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Current count for one info type.
    pub fn get_info_count(&self, info: InfoType) -> usize {
        self.info
            .get(&info)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum of all error counters.
    pub fn total_errors(&self) -> usize {
        self.errors
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Sum of all info counters.
    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Logs a non-zero-count summary, one line per counter.
    pub fn log_summary(&self) {
        for error in ErrorType::iter() {
            let count = self.get_error_count(error);
            if count > 0 {
                log::info!("{}: {}", error.as_str(), count);
            }
        }
        for info in InfoType::iter() {
            let count = self.get_info_count(info);
            if count > 0 {
                log::info!("{}: {}", info.as_str(), count);
            }
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
