//! The four triage stages.
//!
//! Each implements [`mailsift_core::Stage`] and is composed by the
//! runner in [`crate::triage`] — stages are not meant to be wired up by
//! hand outside it.

mod aggregate;
mod classify;
mod enumerate;
mod resolve;

pub use aggregate::AggregateVerdicts;
pub use classify::{ClassifySpam, DEFAULT_CLASSIFY_PERMITS};
pub use enumerate::{EnumerateMessages, DEFAULT_BATCH_SIZE};
pub use resolve::ResolveUsers;
