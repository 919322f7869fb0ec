use crate::{
    LatchedError, MonitorBuilder, MonitorError, Sink,
    meter::Meter,
    signal::{CloseHandle, CloseOnDrop},
};
use std::{
    io::{self, ErrorKind, Read},
    sync::Arc,
    thread::JoinHandle,
};

/// The state a [`MonitoredReader`] latches into once its source is done
#[derive(Debug, Clone, PartialEq, Eq)]
enum Terminal {
    EndOfStream,
    Failed(LatchedError),
}

/// A [`Read`] wrapper that measures the throughput of the wrapped source
///
/// Bytes are passed through unchanged. A background reporter thread samples
/// the number of bytes read on a fixed interval and hands a
/// [`RateSample`](crate::RateSample) to a [`Sink`].
///
/// The reporter stops when
/// - the source reaches the end of the stream or fails,
/// - the reader is [closed](MonitoredReader::close), or
/// - the reader is dropped.
///
/// Once the source reached the end of the stream or failed, the reader does not
/// touch the source again and returns the same result on every later read.
#[derive(Debug)]
pub struct MonitoredReader<R> {
    source: R,
    meter: Arc<Meter>,
    terminal: Option<Terminal>,
    shutdown: CloseOnDrop,
    reporter: JoinHandle<u64>,
}

impl<R: Read> MonitoredReader<R> {
    /// Wrap `source` and start reporting to `sink` with the default configuration
    pub fn new<S>(source: R, sink: S) -> Result<Self, MonitorError>
    where
        S: Sink + Send + 'static,
    {
        MonitorBuilder::new().build(source, sink)
    }
}

impl<R> MonitoredReader<R> {
    pub(crate) fn from_parts(
        source: R,
        meter: Arc<Meter>,
        shutdown: CloseHandle,
        reporter: JoinHandle<u64>,
    ) -> Self {
        Self {
            source,
            meter,
            terminal: None,
            shutdown: CloseOnDrop(shutdown),
            reporter,
        }
    }

    /// Ask the reporter to stop
    ///
    /// Closing does not close the source, which stays owned by the reader.
    /// It never blocks and may be called any number of times.
    pub fn close(&self) {
        self.shutdown.0.close();
    }

    /// Return a [`CloseHandle`], which can close this reader from another thread
    pub fn close_handle(&self) -> CloseHandle {
        self.shutdown.0.clone()
    }

    /// Close the reader and wait for the reporter to exit
    ///
    /// # Returns
    /// - the total number of bytes the reporter counted
    /// - [`MonitorError::ReporterPanicked`] if the [`Sink`] panicked
    pub fn finish(self) -> Result<u64, MonitorError> {
        self.close();
        self.reporter
            .join()
            .map_err(|_| MonitorError::ReporterPanicked)
    }

    /// Returns `true` once the source reached the end of the stream or failed
    pub fn is_terminated(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    fn latch(&mut self, terminal: Terminal) {
        match &terminal {
            Terminal::EndOfStream => tracing::debug!("source reached the end of the stream"),
            Terminal::Failed(err) => tracing::debug!("source failed: {err}"),
        }

        self.terminal = Some(terminal);
        self.close();
    }
}

impl<R: Read> Read for MonitoredReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &self.terminal {
            Some(Terminal::EndOfStream) => return Ok(0),
            Some(Terminal::Failed(err)) => return Err(err.to_io_error()),
            None => (),
        }

        match self.source.read(buf) {
            // An empty buffer reads zero bytes without being at the end of the stream
            Ok(0) if !buf.is_empty() => {
                self.latch(Terminal::EndOfStream);
                Ok(0)
            }
            Ok(read) => {
                self.meter.add(read as u64);
                Ok(read)
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => Err(err),
            Err(err) => {
                self.latch(Terminal::Failed(LatchedError::from(&err)));
                Err(err)
            }
        }
    }
}
