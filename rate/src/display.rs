use crate::units::{Unit, format_rate, format_total};
use rate_core::{RateSample, Sink};
use std::io::Write;

/// Clears the rest of the terminal line
const CLEAR_LINE: &str = "\x1b[K";

/// [`Sink`] which keeps overwriting a single status line
pub(crate) struct StatusLine<W> {
    out: W,
    unit: Unit,
    progress: bool,
    printed: bool,
}

impl<W: Write> StatusLine<W> {
    pub(crate) fn new(out: W, unit: Unit, progress: bool) -> Self {
        Self {
            out,
            unit,
            progress,
            printed: false,
        }
    }

    fn render(&self, sample: &RateSample) -> String {
        let mut line = format!("\r{}{CLEAR_LINE}", format_rate(sample.rate(), self.unit));
        if self.progress {
            line.push_str(&format!(
                " ({}){CLEAR_LINE}",
                format_total(sample.total(), self.unit)
            ));
        }
        line
    }

    /// The status line is best effort, a broken side channel must not stop the copy
    fn write(&mut self, text: &str) {
        if let Err(err) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::trace!("failed to write status line: {err}");
        }
    }
}

impl<W: Write> Sink for StatusLine<W> {
    fn report(&mut self, sample: RateSample) {
        let line = self.render(&sample);
        self.write(&line);
        self.printed = true;
    }

    fn finish(&mut self, _last: RateSample) {
        if self.printed {
            self.write("\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, time::Duration};

    /// A side channel that fails every write
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn written(sink: &StatusLine<Vec<u8>>) -> String {
        String::from_utf8(sink.out.clone()).unwrap()
    }

    #[test]
    fn rate_only() {
        let mut sink = StatusLine::new(Vec::<u8>::new(), Unit::KB, false);
        sink.report(RateSample::new(1000, Duration::from_millis(500), 1000));

        assert_eq!(written(&sink), "\r  2.0000 KB/s\x1b[K");
    }

    #[test]
    fn rate_with_progress() {
        let mut sink = StatusLine::new(Vec::<u8>::new(), Unit::KiB, true);
        sink.report(RateSample::new(512, Duration::from_secs(1), 3 * 1024 * 1024));

        assert_eq!(
            written(&sink),
            "\r  0.5000 KiB/s\x1b[K (3.0000 MiB total)\x1b[K"
        );
    }

    #[test]
    fn finish_ends_line_only_after_output() {
        let mut sink = StatusLine::new(Vec::<u8>::new(), Unit::B, false);
        sink.finish(RateSample::new(0, Duration::ZERO, 0));
        assert_eq!(written(&sink), "");

        let mut sink = StatusLine::new(Vec::<u8>::new(), Unit::B, false);
        sink.report(RateSample::new(10, Duration::from_secs(1), 10));
        sink.finish(RateSample::new(0, Duration::from_millis(1), 10));
        assert_eq!(written(&sink), "\r 10.0000 B/s\x1b[K\n");
    }

    #[test]
    fn write_failures_are_ignored() {
        let mut sink = StatusLine::new(Closed, Unit::KB, true);

        sink.report(RateSample::new(10, Duration::from_secs(1), 10));
        sink.report(RateSample::new(20, Duration::from_secs(1), 30));
        sink.finish(RateSample::new(0, Duration::from_millis(1), 30));

        assert!(sink.printed);
    }
}
