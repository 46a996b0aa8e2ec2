//! The `run` subcommand — feed addresses in, print the report.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mailsift_spam::{triage, FixtureBackend, TriageOptions};

use crate::config::Config;

#[derive(Parser)]
pub struct RunArgs {
    /// Address list file (newline-delimited); reads stdin when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Users per enumeration batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Concurrent classification calls allowed
    #[arg(long)]
    pub permits: Option<usize>,

    /// Bound of each inter-stage queue
    #[arg(long)]
    pub queue_capacity: Option<usize>,
}

pub fn run(args: RunArgs, config: &Config) -> Result<()> {
    let opts = TriageOptions {
        batch_size: args.batch_size.unwrap_or(config.pipeline.batch_size),
        classify_permits: args.permits.unwrap_or(config.pipeline.classify_permits),
        queue_capacity: args.queue_capacity.unwrap_or(config.pipeline.queue_capacity),
    };

    let mut backend = FixtureBackend::new(config.fixture.messages_per_user)
        .with_failure_rate(config.fixture.failure_rate_pct);
    if config.fixture.latency_ms > 0 {
        backend = backend.with_latency(Duration::from_millis(config.fixture.latency_ms));
    }

    let reader: Box<dyn BufRead + Send> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("cannot open address list {}", path.display())
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    log::info!(
        "mailsift starting: batch_size={}, permits={}, queue_capacity={}",
        opts.batch_size,
        opts.classify_permits,
        opts.queue_capacity
    );

    let started = Instant::now();
    let (feed, pipeline) = triage::spawn(Arc::new(backend), &opts);

    // Feeder thread: the head queue is bounded, so feeding and draining
    // must overlap.
    let feeder = thread::spawn(move || feed_addresses(reader, feed));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut emitted = 0usize;
    for line in pipeline.iter() {
        writeln!(out, "{line}").context("cannot write report line")?;
        emitted += 1;
    }

    let fed = feeder
        .join()
        .map_err(|_| anyhow!("feeder thread panicked"))?
        .context("cannot read address list")?;
    pipeline
        .wait()
        .map_err(|_| anyhow!("pipeline stage panicked"))?;

    log::info!(
        "{fed} addresses in, {emitted} report lines out in {:.2?}",
        started.elapsed()
    );
    Ok(())
}

/// Read trimmed, non-empty lines into the head queue. Returns how many
/// addresses were fed.
fn feed_addresses(reader: Box<dyn BufRead + Send>, feed: SyncSender<String>) -> io::Result<usize> {
    let mut fed = 0usize;
    for line in reader.lines() {
        let line = line?;
        let address = line.trim();
        if address.is_empty() {
            continue;
        }
        fed += 1;
        if feed.send(address.to_string()).is_err() {
            // Stages drain to completion, so a closed head queue means a
            // stage died; stop reading.
            break;
        }
    }
    Ok(fed)
}
