use crate::{RateSample, meter::Meter, signal::ShutdownListener};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// Receiver of the [`RateSamples`](RateSample) produced by the reporter
///
/// The sink is called from the reporter thread, not from the thread reading
/// the stream. Any state shared with the reading side must be synchronized
/// by the sink itself.
///
/// Every closure taking a [`RateSample`] is a [`Sink`].
pub trait Sink {
    /// Called once per tick
    fn report(&mut self, sample: RateSample);

    /// Called exactly once, when the reporter shuts down
    ///
    /// `last` holds the bytes read after the last tick, and its
    /// [`total`](RateSample::total) is the final byte count of the stream.
    /// No call to [`report`](Sink::report) follows.
    ///
    /// Unlike the samples handed to [`report`](Sink::report), `last` may cover
    /// no time at all if the reporter stops right after a tick. Its
    /// [`rate`](RateSample::rate) is `0.0` then.
    fn finish(&mut self, last: RateSample) {
        let _ = last;
    }
}

impl<F: FnMut(RateSample)> Sink for F {
    fn report(&mut self, sample: RateSample) {
        self(sample)
    }
}

/// The background half of a [`MonitoredReader`](crate::MonitoredReader)
pub(crate) struct Reporter<S> {
    meter: Arc<Meter>,
    shutdown: ShutdownListener,
    interval: Duration,
    sink: S,
    total: u64,
    last_tick: Instant,
}

impl<S: Sink> Reporter<S> {
    pub(crate) fn new(
        meter: Arc<Meter>,
        shutdown: ShutdownListener,
        interval: Duration,
        sink: S,
    ) -> Self {
        Self {
            meter,
            shutdown,
            interval,
            sink,
            total: 0,
            last_tick: Instant::now(),
        }
    }

    /// Run the sampling loop until shutdown is requested
    ///
    /// Returns the total number of bytes drained from the meter.
    pub(crate) fn run(mut self) -> u64 {
        tracing::debug!("reporter started with an interval of {:?}", self.interval);

        while !self.shutdown.wait(self.interval) {
            let sample = self.tick();
            tracing::trace!("reporting {sample}");
            self.sink.report(sample);
        }

        // Pick up what was read between the last tick and the shutdown
        let last = self.tick();
        tracing::debug!("reporter stopped after {} bytes", last.total());
        self.sink.finish(last);

        self.total
    }

    fn tick(&mut self) -> RateSample {
        let now = Instant::now();
        let interval_bytes = self.meter.drain();
        self.total += interval_bytes;

        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        RateSample::new(interval_bytes, elapsed, self.total)
    }
}
