//! Collaborator seam: user directory, mailbox enumeration, spam checker.
//!
//! The pipeline consumes these three calls and nothing else. A failed
//! call is logged by the calling stage and the affected unit of work is
//! dropped — no retry, never fatal.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::thread;
use std::time::Duration;

use rustc_hash::FxHasher;

use crate::types::{MsgId, User};

/// Failure from a fallible collaborator call.
#[derive(Debug)]
pub struct BackendError {
    call: &'static str,
    detail: String,
}

impl BackendError {
    pub fn new(call: &'static str, detail: impl Into<String>) -> Self {
        Self {
            call,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.call, self.detail)
    }
}

impl std::error::Error for BackendError {}

/// The three external calls the pipeline is built around.
///
/// `resolve_user` is total by contract. The other two report failure via
/// [`BackendError`]; callers must treat any such failure as local to the
/// affected batch or message.
pub trait MailBackend: Send + Sync {
    fn resolve_user(&self, address: &str) -> User;

    fn enumerate_messages(&self, users: &[User]) -> Result<Vec<MsgId>, BackendError>;

    fn classify_spam(&self, id: MsgId) -> Result<bool, BackendError>;
}

/// Deterministic in-process backend for the demo binary and tests.
///
/// Addresses normalize to lowercase emails; message ids derive from an
/// `FxHasher` digest of the email, so the same input always yields the
/// same report. Latency and classification failures can be injected to
/// exercise the pipeline's throttling and fault isolation.
pub struct FixtureBackend {
    messages_per_user: u64,
    failure_rate_pct: u8,
    latency: Option<Duration>,
}

impl FixtureBackend {
    pub fn new(messages_per_user: u64) -> Self {
        Self {
            messages_per_user,
            failure_rate_pct: 0,
            latency: None,
        }
    }

    /// Fail roughly `pct` percent of classification calls (0-100),
    /// chosen deterministically per message id.
    pub fn with_failure_rate(mut self, pct: u8) -> Self {
        self.failure_rate_pct = pct.min(100);
        self
    }

    /// Sleep this long inside every collaborator call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn digest(value: impl Hash) -> u64 {
        let mut hasher = FxHasher::default();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn sleep(&self) {
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
    }
}

impl MailBackend for FixtureBackend {
    fn resolve_user(&self, address: &str) -> User {
        self.sleep();
        let email = address.trim().to_lowercase();
        let name = email.split('@').next().unwrap_or_default().to_string();
        User { email, name }
    }

    fn enumerate_messages(&self, users: &[User]) -> Result<Vec<MsgId>, BackendError> {
        self.sleep();
        let mut ids = Vec::with_capacity(users.len() * self.messages_per_user as usize);
        for user in users {
            let base = Self::digest(&user.email);
            for n in 0..self.messages_per_user {
                ids.push(MsgId(base.wrapping_add(n)));
            }
        }
        Ok(ids)
    }

    fn classify_spam(&self, id: MsgId) -> Result<bool, BackendError> {
        self.sleep();
        let digest = Self::digest(id.0);
        if self.failure_rate_pct > 0 && digest % 100 < u64::from(self.failure_rate_pct) {
            return Err(BackendError::new(
                "classify_spam",
                format!("simulated outage for message {id}"),
            ));
        }
        // Roughly a quarter of messages flagged
        Ok(digest % 4 == 0)
    }
}
