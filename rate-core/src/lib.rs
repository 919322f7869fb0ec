//! Measure the throughput of a byte stream while passing it through unchanged.
//!
//! A [`MonitoredReader`] wraps any [`Read`](std::io::Read) source. Every read is
//! counted, and a reporter running on its own thread turns the counted bytes into
//! a [`RateSample`] at a fixed interval and hands it to a [`Sink`].
//!
//! ```no_run
//! use rate_core::{MonitoredReader, RateSample};
//! use std::io;
//!
//! let sink = |sample: RateSample| eprintln!("{:.0} B/s", sample.rate());
//! let mut reader = MonitoredReader::new(io::stdin(), sink)?;
//! io::copy(&mut reader, &mut io::stdout())?;
//! reader.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod config;
mod errors;
mod meter;
mod monitor;
mod reporter;
mod sample;
mod signal;

pub use builder::MonitorBuilder;
pub use config::MonitorConfig;
pub use errors::{LatchedError, MonitorError};
pub use monitor::MonitoredReader;
pub use reporter::Sink;
pub use sample::RateSample;
pub use signal::CloseHandle;
