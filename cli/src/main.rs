//! ultrak498 - race commentary from Ultrak 498 and DT2000 timers
//!
//! Reads the record stream of a timer from a device node, a capture file, or
//! standard input, and prints either a running commentary of each race or the
//! absolute split times of one race as CSV.

#![deny(clippy::unwrap_used)]

mod report;

use std::{io::ErrorKind, path::PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ultrak::{
    avec::reader,
    race::SequenceError,
    sans::{bcd::Policy, record::TypeTable},
};

#[derive(Debug, Parser)]
#[command(name = "ultrak498")]
#[command(about = "Decode the record stream of an Ultrak 498 or DT2000 race timer")]
#[command(version)]
#[command(long_about = "
Decode the record stream of an Ultrak 498 or DT2000 race timer.

A serial device node may be given as the input file. Configure the line for
4800 baud, 8N1 beforehand (for example with stty).
")]
struct Cli {
    /// Input file or device; standard input if omitted
    #[arg(short = 'f', long, env = "ULTRAK_INFILE")]
    infile: Option<PathBuf>,

    /// Output file; standard output if omitted
    #[arg(short = 'o', long, env = "ULTRAK_OUTFILE")]
    outfile: Option<PathBuf>,

    /// Race to report in `splits` format
    #[arg(short = 'r', long, env = "ULTRAK_RACE_ID", default_value_t = 1)]
    race_id: u8,

    /// Report to produce
    #[arg(long, value_enum, env = "ULTRAK_FORMAT", default_value_t = Format::Commentary)]
    format: Format,

    /// Firmware revision, selecting the record type codes
    #[arg(long, value_enum, env = "ULTRAK_REVISION", default_value_t = Revision::Dt2000)]
    revision: Revision,

    /// Input is ASCII hex, as written by bit-banged serial captures
    #[arg(long)]
    hex: bool,

    /// Copy raw records to a file
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "dump")]
    dump: Option<PathBuf>,

    /// Decode bytes with invalid BCD digits as zero instead of failing
    #[arg(long)]
    lenient: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Running commentary of every race
    Commentary,
    /// CSV of absolute split times for one race
    Splits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Revision {
    /// Header 90, lap 10-19, average 30-39, fastest 40-49, end 50-59
    Dt2000,
    /// Header 0-9, lap 10, end 50
    Ultrak498,
}

impl Cli {
    fn table(&self) -> TypeTable {
        match self.revision {
            Revision::Ultrak498 => TypeTable::ULTRAK498,
            Revision::Dt2000 => TypeTable::DT2000,
        }
    }

    fn policy(&self) -> Policy {
        if self.lenient {
            Policy::Lenient
        } else {
            Policy::Strict
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ultrak={log_level},ultrak498={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(?cli, "starting");

    match report::run(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Exit status for a failed run: 2 for malformed input, 3 for lost records.
///
/// Malformed hex text reaches the decoder as an I/O error of kind
/// `InvalidData` or `UnexpectedEof`, and counts as malformed input.
fn exit_code(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<SequenceError>().is_some() {
        return 3;
    }

    match e.downcast_ref::<reader::Error>() {
        Some(reader::Error::Decode(_) | reader::Error::TruncatedRecord { .. }) => 2,
        Some(reader::Error::Io(e))
            if matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::UnexpectedEof) =>
        {
            2
        }
        Some(reader::Error::Io(_)) | None => 1,
    }
}
