//! Fan-in: collect every verdict, impose the report order, format lines.

use std::sync::mpsc::{Receiver, SyncSender};

use mailsift_core::Stage;

use crate::types::Verdict;

/// The one sequential stage. Collects all verdicts, sorts spam-first
/// then by id, and emits one `<bool> <id>` line per verdict in order —
/// the barrier that turns the unordered concurrent stream into a
/// deterministic report.
pub struct AggregateVerdicts;

impl Stage for AggregateVerdicts {
    type In = Verdict;
    type Out = String;

    fn name(&self) -> &'static str {
        "aggregate-verdicts"
    }

    fn run(self, input: Receiver<Verdict>, output: SyncSender<String>) {
        // This stage thread is the sole owner of the collection; the
        // input queue already serializes arrivals, so no lock is needed.
        let mut verdicts: Vec<Verdict> = input.iter().collect();
        verdicts.sort_unstable_by_key(Verdict::sort_key);
        log::debug!("aggregate-verdicts: {} verdicts collected", verdicts.len());
        for verdict in verdicts {
            if output.send(verdict.to_line()).is_err() {
                log::warn!("aggregate-verdicts: report queue closed");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MsgId;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn arrival_order_does_not_matter() {
        let verdicts = [
            Verdict {
                id: MsgId(9),
                has_spam: false,
            },
            Verdict {
                id: MsgId(4),
                has_spam: true,
            },
            Verdict {
                id: MsgId(1),
                has_spam: false,
            },
        ];

        let mut runs = Vec::new();
        for order in [[0usize, 1, 2], [2, 1, 0]] {
            let (tx_in, rx_in) = sync_channel(4);
            let (tx_out, rx_out) = sync_channel(4);
            for i in order {
                tx_in.send(verdicts[i]).unwrap();
            }
            drop(tx_in);
            AggregateVerdicts.run(rx_in, tx_out);
            runs.push(rx_out.iter().collect::<Vec<String>>());
        }

        assert_eq!(runs[0], vec!["true 4", "false 1", "false 9"]);
        assert_eq!(runs[0], runs[1]);
    }
}
