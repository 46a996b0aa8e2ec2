//! Mailsift Core - infrastructure for staged concurrent pipelines
//!
//! This crate provides the building blocks the triage pipeline is wired
//! from: typed stage composition over bounded queues, a counting
//! semaphore, a concurrent deduplication set, and logging setup.

pub mod logging;
pub mod pipeline;
pub mod semaphore;
pub mod unique_set;

// Re-exports for convenience
pub use logging::init_logging;
pub use pipeline::{Pipeline, Stage, DEFAULT_QUEUE_CAPACITY};
pub use semaphore::{Semaphore, SemaphorePermit};
pub use unique_set::UniqueSet;
