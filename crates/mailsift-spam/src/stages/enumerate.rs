//! Message enumeration over fixed-size user batches.

use std::mem;
use std::sync::mpsc::{Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

use mailsift_core::Stage;

use crate::backend::MailBackend;
use crate::types::{MsgId, User};

/// Users per enumeration call.
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// Groups incoming users into fixed-size batches and fans out one task
/// per batch to enumerate their messages. A trailing partial batch is
/// processed the same way. An enumeration failure drops that batch only.
pub struct EnumerateMessages<B> {
    backend: Arc<B>,
    batch_size: usize,
}

impl<B> EnumerateMessages<B> {
    pub fn new(backend: Arc<B>, batch_size: usize) -> Self {
        Self {
            backend,
            batch_size: batch_size.max(1),
        }
    }
}

impl<B: MailBackend + 'static> Stage for EnumerateMessages<B> {
    type In = User;
    type Out = MsgId;

    fn name(&self) -> &'static str {
        "enumerate-messages"
    }

    fn run(self, input: Receiver<User>, output: SyncSender<MsgId>) {
        thread::scope(|scope| {
            let backend = self.backend.as_ref();
            let mut batch: Vec<User> = Vec::with_capacity(self.batch_size);
            for user in input {
                batch.push(user);
                if batch.len() == self.batch_size {
                    let users = mem::take(&mut batch);
                    let output = output.clone();
                    scope.spawn(move || enumerate_batch(backend, users, output));
                }
            }
            if !batch.is_empty() {
                scope.spawn(move || enumerate_batch(backend, batch, output));
            }
        });
    }
}

fn enumerate_batch<B: MailBackend>(backend: &B, users: Vec<User>, output: SyncSender<MsgId>) {
    match backend.enumerate_messages(&users) {
        Ok(ids) => {
            for id in ids {
                if output.send(id).is_err() {
                    log::warn!("enumerate-messages: downstream queue closed");
                    return;
                }
            }
        }
        // The whole batch is dropped; other batches are unaffected.
        Err(e) => log::error!(
            "enumerate-messages: batch of {} users failed: {e}",
            users.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, FixtureBackend};
    use std::sync::mpsc::sync_channel;

    fn users(n: usize) -> Vec<User> {
        (0..n)
            .map(|i| User {
                email: format!("u{i}@x"),
                name: format!("u{i}"),
            })
            .collect()
    }

    #[test]
    fn partial_batch_is_enumerated() {
        // 5 users at batch size 2: two full batches plus one of size 1.
        let (tx_in, rx_in) = sync_channel(8);
        let (tx_out, rx_out) = sync_channel(32);
        for user in users(5) {
            tx_in.send(user).unwrap();
        }
        drop(tx_in);

        EnumerateMessages::new(Arc::new(FixtureBackend::new(3)), 2).run(rx_in, tx_out);

        assert_eq!(rx_out.iter().count(), 15);
    }

    #[test]
    fn failing_batch_is_dropped_others_survive() {
        struct SecondBatchFails;

        impl MailBackend for SecondBatchFails {
            fn resolve_user(&self, address: &str) -> User {
                User {
                    email: address.to_string(),
                    name: String::new(),
                }
            }

            fn enumerate_messages(&self, users: &[User]) -> Result<Vec<MsgId>, BackendError> {
                if users[0].email == "u2@x" {
                    return Err(BackendError::new("enumerate_messages", "mailbox offline"));
                }
                Ok(users.iter().map(|_| MsgId(1)).collect())
            }

            fn classify_spam(&self, _id: MsgId) -> Result<bool, BackendError> {
                Ok(false)
            }
        }

        let (tx_in, rx_in) = sync_channel(8);
        let (tx_out, rx_out) = sync_channel(32);
        for user in users(6) {
            tx_in.send(user).unwrap();
        }
        drop(tx_in);

        EnumerateMessages::new(Arc::new(SecondBatchFails), 2).run(rx_in, tx_out);

        // Batch [u2, u3] lost; batches [u0, u1] and [u4, u5] delivered.
        assert_eq!(rx_out.iter().count(), 4);
    }

    #[test]
    fn batch_size_zero_is_clamped() {
        let stage = EnumerateMessages::new(Arc::new(FixtureBackend::new(1)), 0);
        assert_eq!(stage.batch_size, 1);
    }
}
