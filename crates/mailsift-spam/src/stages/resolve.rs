//! User resolution with duplicate suppression.

use std::sync::mpsc::{Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

use mailsift_core::{Stage, UniqueSet};

use crate::backend::MailBackend;
use crate::types::User;

/// Resolves each incoming address to a user record, emitting every
/// distinct email exactly once. One task per address; tasks that lose
/// the unique-set race emit nothing.
pub struct ResolveUsers<B> {
    backend: Arc<B>,
}

impl<B> ResolveUsers<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

impl<B: MailBackend + 'static> Stage for ResolveUsers<B> {
    type In = String;
    type Out = User;

    fn name(&self) -> &'static str {
        "resolve-users"
    }

    fn run(self, input: Receiver<String>, output: SyncSender<User>) {
        let seen = UniqueSet::new();
        thread::scope(|scope| {
            let backend = self.backend.as_ref();
            let seen = &seen;
            for address in input {
                let output = output.clone();
                scope.spawn(move || {
                    let user = backend.resolve_user(&address);
                    // Dedup on the resolved email, not the raw address:
                    // distinct inputs can resolve to the same account.
                    if seen.add(&user.email) && output.send(user).is_err() {
                        log::warn!("resolve-users: downstream queue closed");
                    }
                });
            }
        });
        log::debug!("resolve-users: {} distinct users", seen.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FixtureBackend;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn duplicate_addresses_emit_one_user() {
        let (tx_in, rx_in) = sync_channel(8);
        let (tx_out, rx_out) = sync_channel(8);
        for address in ["a@x", "A@X", "b@x"] {
            tx_in.send(address.to_string()).unwrap();
        }
        drop(tx_in);

        ResolveUsers::new(Arc::new(FixtureBackend::new(1))).run(rx_in, tx_out);

        let mut emails: Vec<String> = rx_out.iter().map(|u| u.email).collect();
        emails.sort();
        assert_eq!(emails, vec!["a@x", "b@x"]);
    }

    #[test]
    fn empty_input_closes_output() {
        let (tx_in, rx_in) = sync_channel::<String>(1);
        let (tx_out, rx_out) = sync_channel(1);
        drop(tx_in);

        ResolveUsers::new(Arc::new(FixtureBackend::new(1))).run(rx_in, tx_out);

        assert!(rx_out.iter().next().is_none());
    }
}
