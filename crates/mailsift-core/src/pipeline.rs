//! Typed stage composition and the pipeline runner.
//!
//! Each stage runs on its own named thread, reading a bounded input
//! queue and writing a bounded output queue. A stage closes its output
//! by returning from [`Stage::run`], which drops the last sender; that
//! closure is the only termination signal and it cascades down the
//! chain — there is no cancellation path. The runner owns queue
//! lifetime: stages are never wired up outside it.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Default bound for the queues between stages.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// One pipeline phase: consumes a typed input queue, produces a typed
/// output queue.
///
/// `run` must not return until every concurrent task it spawned has
/// finished. The output sender is dropped when `run` returns and the
/// downstream stage treats the resulting closure as end-of-stream, so
/// returning early loses items still in flight.
pub trait Stage: Send + 'static {
    type In: Send + 'static;
    type Out: Send + 'static;

    /// Short name used for the stage thread and log lines.
    fn name(&self) -> &'static str;

    fn run(self, input: Receiver<Self::In>, output: SyncSender<Self::Out>);
}

/// Runner owning the inter-stage queues and stage threads.
///
/// `T` is the item type of the current tail queue; [`Pipeline::stage`]
/// re-types the runner to each appended stage's output.
pub struct Pipeline<T> {
    tail: Receiver<T>,
    stages: Vec<JoinHandle<()>>,
    capacity: usize,
}

impl<T: Send + 'static> Pipeline<T> {
    /// Create an empty pipeline with the given queue bound. Returns the
    /// head queue's sender along with the runner; dropping the sender
    /// closes the head queue and starts the termination cascade.
    pub fn new(capacity: usize) -> (SyncSender<T>, Self) {
        let (feed, tail) = sync_channel(capacity);
        (
            feed,
            Self {
                tail,
                stages: Vec::new(),
                capacity,
            },
        )
    }

    /// Append a stage: allocate its output queue and launch it on its
    /// own thread, bound to the current tail and the new queue.
    pub fn stage<S>(mut self, stage: S) -> Pipeline<S::Out>
    where
        S: Stage<In = T>,
    {
        let (tx, rx) = sync_channel(self.capacity);
        let input = self.tail;
        let name = stage.name();
        log::debug!("launching stage {name}");
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || stage.run(input, tx))
            .expect("failed to spawn stage thread");
        self.stages.push(handle);
        Pipeline {
            tail: rx,
            stages: self.stages,
            capacity: self.capacity,
        }
    }

    /// Iterate the tail queue until the last stage closes it.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.tail.iter()
    }

    /// Block until every stage thread has finished. Call after draining
    /// [`Pipeline::iter`]; anything left in the tail queue is discarded.
    pub fn wait(self) -> thread::Result<()> {
        drop(self.tail);
        for stage in self.stages {
            stage.join()?;
        }
        Ok(())
    }
}
