//! Resource initialization helpers: logger, DNS resolver, semaphore.

use std::sync::Arc;

use tokio::sync::Semaphore;

mod logger;
mod resolver;

pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Creates the concurrency-limiting semaphore for batch execution.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
