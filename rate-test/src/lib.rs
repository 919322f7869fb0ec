//! Test doubles for sources and sinks.

use rate_core::{RateSample, Sink};
use std::{
    collections::VecDeque,
    io::{self, Read},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

/// One step of a [`ScriptedSource`]
#[derive(Debug)]
pub enum Step {
    /// Return this many bytes on the next read
    Chunk(usize),
    /// Sleep before performing the next step
    Delay(Duration),
    /// Fail the next read with this error
    Fail(io::Error),
}

/// A [`Read`] source that plays a fixed script of chunks, delays and errors
///
/// Once the script is exhausted, the source reports the end of the stream.
/// Every call to [`read`](Read::read) is counted, so tests can check
/// that the source is not touched anymore.
#[derive(Debug)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    fill: u8,
    reads: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            fill: 0,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source returning `count` chunks of `size` bytes, each preceded by `delay`
    pub fn chunks(count: usize, size: usize, delay: Duration) -> Self {
        Self::new((0..count).flat_map(|_| [Step::Delay(delay), Step::Chunk(size)]))
    }

    /// Shared counter of the calls to [`read`](Read::read)
    pub fn reads(&self) -> Arc<AtomicUsize> {
        self.reads.clone()
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        loop {
            match self.steps.pop_front() {
                None => return Ok(0),
                Some(Step::Delay(delay)) => thread::sleep(delay),
                Some(Step::Fail(err)) => return Err(err),
                Some(Step::Chunk(size)) => {
                    let len = size.min(buf.len());
                    if len < size {
                        self.steps.push_front(Step::Chunk(size - len));
                    }

                    buf[..len].fill(self.fill);
                    self.fill = self.fill.wrapping_add(1);
                    return Ok(len);
                }
            }
        }
    }
}

/// What a [`RecordingSink`] has seen so far
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub samples: Vec<RateSample>,
    pub finished: Vec<RateSample>,
}

impl Recording {
    /// Sum of the interval bytes of all reported samples and the final sample
    pub fn drained(&self) -> u64 {
        self.samples
            .iter()
            .chain(self.finished.iter())
            .map(RateSample::interval_bytes)
            .sum()
    }
}

/// A [`Sink`] that records every sample it is handed
#[derive(Debug, Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Recording>>);

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of everything recorded so far
    pub fn recording(&self) -> Recording {
        self.0.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn report(&mut self, sample: RateSample) {
        self.0.lock().unwrap().samples.push(sample);
    }

    fn finish(&mut self, last: RateSample) {
        self.0.lock().unwrap().finished.push(last);
    }
}
