//! Mailsift spam triage - staged concurrent pipeline over mail accounts
//!
//! A stream of raw addresses flows through four stages, each on its own
//! thread with internal per-item fan-out:
//!
//! resolve-users → enumerate-messages → classify-spam → aggregate-verdicts
//!
//! Stages hand off through typed bounded queues; queue closure is the
//! only termination signal. The aggregate stage is the one sequential
//! point and produces a deterministic, sorted report.

pub mod backend;
pub mod stages;
pub mod triage;
pub mod types;

// Re-exports for convenience
pub use backend::{BackendError, FixtureBackend, MailBackend};
pub use stages::{
    AggregateVerdicts, ClassifySpam, EnumerateMessages, ResolveUsers, DEFAULT_BATCH_SIZE,
    DEFAULT_CLASSIFY_PERMITS,
};
pub use triage::TriageOptions;
pub use types::{MsgId, User, Verdict};
