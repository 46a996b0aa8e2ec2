//! Spam classification under bounded concurrency.

use std::sync::mpsc::{Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

use mailsift_core::{Semaphore, Stage};

use crate::backend::MailBackend;
use crate::types::{MsgId, Verdict};

/// Concurrent classification calls allowed; the checker is rate limited.
pub const DEFAULT_CLASSIFY_PERMITS: usize = 5;

/// Fans out one task per message id and asks the backend for a verdict,
/// holding a semaphore permit for the duration of the call. A failed
/// call drops that message only.
pub struct ClassifySpam<B> {
    backend: Arc<B>,
    permits: usize,
}

impl<B> ClassifySpam<B> {
    pub fn new(backend: Arc<B>, permits: usize) -> Self {
        Self {
            backend,
            permits: permits.max(1),
        }
    }
}

impl<B: MailBackend + 'static> Stage for ClassifySpam<B> {
    type In = MsgId;
    type Out = Verdict;

    fn name(&self) -> &'static str {
        "classify-spam"
    }

    fn run(self, input: Receiver<MsgId>, output: SyncSender<Verdict>) {
        let limiter = Semaphore::new(self.permits);
        thread::scope(|scope| {
            let backend = self.backend.as_ref();
            let limiter = &limiter;
            for id in input {
                let output = output.clone();
                scope.spawn(move || {
                    // The permit covers only the backend call, never the
                    // downstream send (which can block on a full queue).
                    let checked = {
                        let _permit = limiter.acquire();
                        backend.classify_spam(id)
                    };
                    match checked {
                        Ok(has_spam) => {
                            if output.send(Verdict { id, has_spam }).is_err() {
                                log::warn!("classify-spam: downstream queue closed");
                            }
                        }
                        Err(e) => log::error!("classify-spam: message {id} dropped: {e}"),
                    }
                });
            }
        });
    }
}
