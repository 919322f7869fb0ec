use crate::{args::Args, display::StatusLine, settings::Settings};
use clap::Parser;
use eyre::Context;
use rate_core::{MonitorBuilder, MonitorError};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

mod args;
mod display;
mod settings;
mod units;

const EXIT_FAILURE: u8 = 1;
/// Same status clap exits with on bad arguments
const EXIT_USAGE: u8 = 2;
const EXIT_IO: u8 = 3;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let status = exit_status(&err);
            if status == EXIT_IO {
                eprintln!("io error: {err:#}");
            } else {
                eprintln!("{err:#}");
            }
            ExitCode::from(status)
        }
    }
}

fn init_tracing(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Copy stdin to stdout while reporting the rate on stderr
fn run(settings: &Settings) -> eyre::Result<()> {
    tracing::debug!("running with {settings:?}");

    let status = StatusLine::new(io::stderr(), settings.unit, settings.progress);
    let mut reader = MonitorBuilder::from(&settings.monitor)
        .build(io::stdin().lock(), status)
        .wrap_err("failed to start monitoring stdin")?;

    let mut stdout = io::stdout().lock();
    let copied = io::copy(&mut reader, &mut stdout).and_then(|copied| {
        stdout.flush()?;
        Ok(copied)
    });

    // Let the reporter finish its line before anything else is printed
    let finished = reader.finish();
    let copied = copied.wrap_err("failed to copy stdin to stdout")?;
    let total = finished.wrap_err("status reporter failed")?;

    tracing::debug!("copied {copied} bytes, reporter counted {total}");
    Ok(())
}

/// A crashed reporter is a bug, not an I/O error
fn exit_status(err: &eyre::Report) -> u8 {
    match err.downcast_ref::<MonitorError>() {
        Some(MonitorError::ReporterPanicked) => EXIT_FAILURE,
        _ => EXIT_IO,
    }
}
