use crate::{
    MonitorConfig, MonitorError, MonitoredReader, Sink, config::DEFAULT_INTERVAL, meter::Meter,
    reporter::Reporter, signal::shutdown_channel,
};
use std::{io::Read, sync::Arc, thread, time::Duration};

const DEFAULT_THREAD_NAME: &str = "rate-reporter";

/// Builder for a [`MonitoredReader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorBuilder {
    interval: Duration,
    thread_name: String,
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&MonitorConfig> for MonitorBuilder {
    fn from(config: &MonitorConfig) -> Self {
        Self::new().with_interval(config.interval())
    }
}

impl MonitorBuilder {
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }

    /// Set the time between two samples
    ///
    /// A zero interval selects the default of 500ms.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Set the name of the reporter thread
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Wrap `source` and spawn the reporter thread, which reports to `sink`
    pub fn build<R, S>(self, source: R, sink: S) -> Result<MonitoredReader<R>, MonitorError>
    where
        R: Read,
        S: Sink + Send + 'static,
    {
        let meter = Arc::new(Meter::default());
        let (shutdown, listener) = shutdown_channel();

        let reporter = Reporter::new(meter.clone(), listener, self.interval, sink);
        let reporter = thread::Builder::new()
            .name(self.thread_name)
            .spawn(move || reporter.run())?;

        Ok(MonitoredReader::from_parts(source, meter, shutdown, reporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config() {
        let builder = MonitorBuilder::from(&MonitorConfig::new(100));
        assert_eq!(builder.interval, Duration::from_millis(100));

        let builder = MonitorBuilder::from(&MonitorConfig::new(0));
        assert_eq!(builder.interval, DEFAULT_INTERVAL);
    }

    #[test]
    fn zero_interval_is_default() {
        let builder = MonitorBuilder::new().with_interval(Duration::ZERO);
        assert_eq!(builder.interval, DEFAULT_INTERVAL);
    }

    #[test]
    fn names_reporter_thread() {
        let (tx, rx) = std::sync::mpsc::channel();

        struct ThreadName(std::sync::mpsc::Sender<Option<String>>);
        impl Sink for ThreadName {
            fn report(&mut self, _: crate::RateSample) {}
            fn finish(&mut self, _: crate::RateSample) {
                let name = thread::current().name().map(str::to_string);
                self.0.send(name).unwrap();
            }
        }

        let reader = MonitorBuilder::new()
            .with_thread_name("test-reporter")
            .build(std::io::empty(), ThreadName(tx))
            .unwrap();
        reader.finish().unwrap();

        assert_eq!(rx.recv().unwrap().as_deref(), Some("test-reporter"));
    }
}
