#![cfg(feature = "std")]

use std::{fs::read_to_string, path::Path};

use csv::ReaderBuilder;
use ultrak::{
    avec::{hex::HexReader, reader, slice},
    race::{Race, SequenceError, Splits},
    sans::{Decoder, record::Record},
};

const PATH: &str = "fixtures/two-races.bin";

#[test]
fn decode_slice_commentary() {
    let data = std::fs::read(PATH).unwrap();
    let mut commentary = Commentary::default();
    ultrak::avec::decode_slice(&data, Decoder::default(), |r| commentary.add(r)).unwrap();
    commentary.validate(PATH);
}

#[test]
fn decode_reader_commentary() {
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut commentary = Commentary::default();
    ultrak::avec::decode_reader(&mut file, Decoder::default(), |r| commentary.add(r)).unwrap();
    commentary.validate(PATH);
}

#[test]
fn decode_hex_commentary() {
    let file = std::fs::File::open(Path::new(PATH).with_extension("hex")).unwrap();
    let mut commentary = Commentary::default();
    for record in reader::Records::new(HexReader::new(file), Decoder::default()) {
        commentary.add(record.unwrap()).unwrap();
    }
    commentary.validate(PATH);
}

#[test]
fn decode_slice_splits() {
    let data = std::fs::read(PATH).unwrap();

    for race_id in [1, 2] {
        let mut validator = Validator::new(PATH, race_id);
        for record in slice::Records::new(&data, Decoder::default()) {
            validator.add(&record.unwrap());
        }
        validator.finish();
    }
}

#[test]
fn decode_reader_splits() {
    for race_id in [1, 2] {
        let file = std::fs::File::open(PATH).unwrap();
        let mut validator = Validator::new(PATH, race_id);
        for record in reader::Records::new(file, Decoder::default()) {
            validator.add(&record.unwrap());
        }
        validator.finish();
    }
}

#[test]
fn decode_reader_dump_copies_input() {
    let data = std::fs::read(PATH).unwrap();
    let mut dump = Vec::new();

    let records = reader::Records::new(data.as_slice(), Decoder::default()).dump(&mut dump);
    assert_eq!(records.count(), data.len() / 5);

    assert_eq!(dump, data);
}

#[test]
fn missing_race_has_no_splits() {
    let data = std::fs::read(PATH).unwrap();
    let mut splits = Splits::new(3);

    let rows = slice::Records::new(&data, Decoder::default())
        .filter_map(|r| splits.advance(&r.unwrap()))
        .count();
    assert_eq!(rows, 0);
}

/// Collects the commentary of every race, for comparison with a text file.
#[derive(Default)]
struct Commentary {
    race: Race,
    lines: Vec<String>,
    unknown: usize,
}

impl Commentary {
    fn add(&mut self, record: Record) -> Result<(), Error> {
        if let Record::Unknown(_) = record {
            self.unknown += 1;
        }
        if let Some(notice) = self.race.advance(&record)? {
            self.lines.push(notice.to_string());
        }
        Ok(())
    }

    fn validate(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().with_extension("txt");
        let expected = read_to_string(path).unwrap();

        assert_eq!(self.lines, expected.lines().collect::<Vec<_>>());
        assert_eq!(self.unknown, 1);
        assert_eq!(self.race.position(), 7);
    }
}

#[derive(Debug)]
#[allow(dead_code)]
enum Error {
    Reader(reader::Error),
    Slice(slice::Error),
    Sequence(SequenceError),
}

impl From<reader::Error> for Error {
    fn from(err: reader::Error) -> Self {
        Self::Reader(err)
    }
}

impl From<slice::Error> for Error {
    fn from(err: slice::Error) -> Self {
        Self::Slice(err)
    }
}

impl From<SequenceError> for Error {
    fn from(err: SequenceError) -> Self {
        Self::Sequence(err)
    }
}

/// Checks split rows of one race against the rows of a CSV file.
struct Validator(Splits, Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>, race_id: u8) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .filter(|r: &Vec<String>| r[0] == race_id.to_string())
            .collect();

        assert!(!expected.is_empty());

        Self(Splits::new(race_id), expected)
    }

    fn add(&mut self, record: &Record) {
        if let Some(row) = self.0.advance(record) {
            let mut expected = self.1.remove(0);
            expected.remove(0);

            let found = row.to_string();
            assert_eq!(found.split(',').collect::<Vec<_>>(), expected);
        }
    }

    fn finish(self) {
        assert!(self.1.is_empty(), "{} rows not found", self.1.len());
    }
}
