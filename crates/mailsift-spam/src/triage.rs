//! Assembly of the four-stage triage pipeline.

use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use mailsift_core::{Pipeline, DEFAULT_QUEUE_CAPACITY};

use crate::backend::MailBackend;
use crate::stages::{
    AggregateVerdicts, ClassifySpam, EnumerateMessages, ResolveUsers, DEFAULT_BATCH_SIZE,
    DEFAULT_CLASSIFY_PERMITS,
};

/// Tuning knobs for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct TriageOptions {
    /// Users per enumeration batch.
    pub batch_size: usize,
    /// Concurrent classification calls allowed.
    pub classify_permits: usize,
    /// Bound of each inter-stage queue.
    pub queue_capacity: usize,
}

impl Default for TriageOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            classify_permits: DEFAULT_CLASSIFY_PERMITS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Wire the four stages together over one backend.
///
/// Returns the address feed and the running pipeline whose tail yields
/// formatted verdict lines. Drop the feed once the address source is
/// exhausted; the closure cascades through the stages and the tail
/// closes after the report is fully emitted.
pub fn spawn<B: MailBackend + 'static>(
    backend: Arc<B>,
    opts: &TriageOptions,
) -> (SyncSender<String>, Pipeline<String>) {
    let (feed, pipeline) = Pipeline::new(opts.queue_capacity);
    let pipeline = pipeline
        .stage(ResolveUsers::new(Arc::clone(&backend)))
        .stage(EnumerateMessages::new(Arc::clone(&backend), opts.batch_size))
        .stage(ClassifySpam::new(backend, opts.classify_permits))
        .stage(AggregateVerdicts);
    (feed, pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FixtureBackend;

    #[test]
    fn default_wiring_dedups_and_reports() {
        let backend = Arc::new(FixtureBackend::new(1));
        let (feed, pipeline) = spawn(backend, &TriageOptions::default());

        for address in ["a@x", "b@x", "A@x"] {
            feed.send(address.to_string()).unwrap();
        }
        drop(feed);

        let lines: Vec<String> = pipeline.iter().collect();
        assert_eq!(lines.len(), 2);
        pipeline.wait().unwrap();
    }
}
