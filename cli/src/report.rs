//! Report generation: source and sink selection, and the decoding loop.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::{Context, Result};
use either::Either::{Left, Right};
use ultrak::{
    avec::{hex::HexReader, reader},
    race::{Race, Splits},
    sans::{Decoder, record::Record},
};

use crate::{Cli, Format};

pub fn run(cli: &Cli) -> Result<()> {
    let input = match &cli.infile {
        Some(path) => Left(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Right(io::stdin().lock()),
    };

    let input = if cli.hex {
        Left(HexReader::new(input))
    } else {
        Right(input)
    };

    // Unbuffered, so the dump stays current while reading a live line.
    let dump = match &cli.dump {
        Some(path) => Left(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Right(io::sink()),
    };

    let mut output = match &cli.outfile {
        Some(path) => Left(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Right(io::stdout().lock()),
    };

    tracing::info!(
        infile = ?cli.infile,
        revision = ?cli.revision,
        hex = cli.hex,
        "decoding records"
    );

    let records = reader::Records::new(input, Decoder::new(cli.table(), cli.policy())).dump(dump);

    let result = match cli.format {
        Format::Commentary => commentary(records, &mut output),
        Format::Splits => splits(records, cli.race_id, &mut output),
    };

    output.flush()?;
    result
}

/// Write a line for every notice of every race.
fn commentary(
    records: impl Iterator<Item = Result<Record, reader::Error>>,
    o: &mut impl Write,
) -> Result<()> {
    let mut race = Race::default();

    for record in records {
        if let Some(notice) = race.advance(&record?)? {
            writeln!(o, "{notice}")?;
        }
    }

    tracing::info!(finishers = race.position(), "end of stream");

    Ok(())
}

/// Write a CSV row for every absolute time of one race.
fn splits(
    records: impl Iterator<Item = Result<Record, reader::Error>>,
    race_id: u8,
    o: &mut impl Write,
) -> Result<()> {
    let mut splits = Splits::new(race_id);
    let mut rows = 0;

    for record in records {
        if let Some(row) = splits.advance(&record?) {
            writeln!(o, "{row}")?;
            rows += 1;
        }
    }

    tracing::info!(race_id, rows, "end of stream");

    Ok(())
}
