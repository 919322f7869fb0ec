use crate::units::Unit;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rate", version, about, long_about = None)]
pub(crate) struct Args {
    /// Unit for displaying rate. Options are B, KB, KiB, MB, MiB, GB, GiB [default: KB]
    #[arg(short, long, value_name = "UNIT")]
    pub(crate) unit: Option<Unit>,

    /// Display the total amount of data copied so far
    #[arg(short, long)]
    pub(crate) progress: bool,

    /// Time between two reports in milliseconds [default: 500]
    #[arg(short, long, value_name = "MS")]
    pub(crate) interval: Option<u64>,

    /// Read settings from a TOML file instead of $RATE_CONFIG
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) debug: u8,
}

pub(crate) fn get_confpath(args: &Args) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| std::env::var("RATE_CONFIG").map(PathBuf::from).ok())
}
