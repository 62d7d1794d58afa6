#![cfg(feature = "std")]

use std::io::{self, ErrorKind, Read};

use ultrak::{
    avec::{hex::HexReader, reader, slice},
    sans::{DecodeError, Decoder, record::Record},
};

const HEADER: [u8; 5] = [0x09, 0x00, 0x00, 0x00, 0x00];
const LAP: [u8; 5] = [0x01, 0x00, 0x10, 0x00, 0x10];

#[test]
fn reader_ends_cleanly_on_empty_input() {
    let mut records = reader::Records::new(io::empty(), Decoder::default());
    assert!(records.next().is_none());
}

#[test]
fn reader_rejects_truncated_record() {
    let data = [&HEADER[..], &LAP[..1]].concat();
    let mut records = reader::Records::new(data.as_slice(), Decoder::default());

    assert!(matches!(records.next(), Some(Ok(Record::RaceHeader(_)))));
    assert!(matches!(
        records.next(),
        Some(Err(reader::Error::TruncatedRecord { bytes })) if bytes == [0x01]
    ));
    assert!(records.next().is_none());
}

#[test]
fn reader_stops_after_invalid_digit() {
    let data = [&[0xFA, 0, 0, 0, 0][..], &HEADER[..]].concat();
    let mut records = reader::Records::new(data.as_slice(), Decoder::default());

    assert!(matches!(
        records.next(),
        Some(Err(reader::Error::Decode(DecodeError::InvalidDigit { index: 0, byte: 0xFA, .. })))
    ));
    assert!(records.next().is_none());
}

/// A reader returning at most one byte per call, with interruptions.
struct Trickle<'a> {
    data: &'a [u8],
    interrupt: bool,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(ErrorKind::Interrupted.into());
        }

        let Some((first, rest)) = self.data.split_first() else {
            return Ok(0);
        };
        buf[0] = *first;
        self.data = rest;
        Ok(1)
    }
}

#[test]
fn reader_assembles_short_reads() {
    let data = [HEADER, LAP].concat();
    let trickle = Trickle {
        data: &data,
        interrupt: false,
    };

    let records: Vec<_> = reader::Records::new(trickle, Decoder::default())
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 2);
    assert!(matches!(records[1], Record::LapTime(s) if s.lap.value() == 1));
}

#[test]
fn reader_keeps_correction_state() {
    let data = [HEADER, LAP, [0x01, 0x00, 0x10, 0x00, 0x00]].concat();
    let mut records = reader::Records::new(data.as_slice(), Decoder::default());

    records.by_ref().for_each(drop);
    assert_eq!(records.decoder().correction().lap_hundreds, 100);
}

#[test]
fn reader_dump_stops_at_truncation() {
    let data = [&HEADER[..], &LAP[..], &LAP[..4]].concat();
    let mut dump = Vec::new();

    let results: Vec<_> = reader::Records::new(data.as_slice(), Decoder::default())
        .dump(&mut dump)
        .collect();

    assert_eq!(results.len(), 3);
    assert!(results[2].is_err());
    assert_eq!(dump, [HEADER, LAP].concat());
}

#[test]
fn slice_rejects_truncated_record() {
    let data = [&HEADER[..], &LAP[..4]].concat();
    let mut records = slice::Records::new(&data, Decoder::default());

    assert!(matches!(records.next(), Some(Ok(Record::RaceHeader(_)))));
    assert_eq!(records.remainder().len(), 4);
    assert_eq!(
        records.next(),
        Some(Err(slice::Error::TruncatedRecord { len: 4 }))
    );
    assert!(records.next().is_none());
}

#[test]
fn slice_empty() {
    assert!(slice::Records::new(&[], Decoder::default()).next().is_none());
}

#[test]
fn hex_reader_decodes_pairs() {
    let mut hex = HexReader::new("09 00\n0000\r\n00 0100 1000 1 0\n".as_bytes());
    let mut buf = Vec::new();
    hex.read_to_end(&mut buf).unwrap();

    assert_eq!(buf, [HEADER, LAP].concat());
}

#[test]
fn hex_reader_feeds_records() {
    let hex = HexReader::new("09000000003710001000".as_bytes());
    let records: Vec<_> = reader::Records::new(hex, Decoder::default()).collect();

    assert!(matches!(records[0], Ok(Record::RaceHeader(_))));
    assert!(matches!(records[1], Ok(Record::Unknown([73, 1, 0, 1, 0]))));
}

#[test]
fn hex_reader_rejects_invalid_text() {
    let mut buf = Vec::new();

    let err = HexReader::new("09zz".as_bytes())
        .read_to_end(&mut buf)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);

    let err = HexReader::new("090".as_bytes())
        .read_to_end(&mut buf)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn hex_reader_keeps_bytes_before_error() {
    let mut hex = HexReader::new("0900 zz".as_bytes());
    let mut buf = [0; 4];

    assert_eq!(hex.read(&mut buf).unwrap(), 2);
    assert_eq!(buf[..2], [0x09, 0x00]);

    let err = hex.read(&mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}
