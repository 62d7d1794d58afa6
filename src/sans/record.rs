//! Record layout and classification.

use core::ops::RangeInclusive;

use thiserror::Error;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Number of bytes in every record.
pub const RECORD_LEN: usize = 5;

/// An undecoded record, exactly as read from the wire.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct RawRecord {
    /// BCD-encoded type code.
    pub kind: u8,
    /// BCD-encoded fields, in wire order.
    pub fields: [u8; 4],
}

impl From<[u8; RECORD_LEN]> for RawRecord {
    fn from(r: [u8; RECORD_LEN]) -> Self {
        zerocopy::transmute!(r)
    }
}

impl From<RawRecord> for [u8; RECORD_LEN] {
    fn from(r: RawRecord) -> Self {
        zerocopy::transmute!(r)
    }
}

/// A classified record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Start of a new race.
    RaceHeader(RaceHeader),
    /// A finisher's time, relative to the previous finisher.
    LapTime(Split),
    /// A finisher's time, relative to the start.
    AbsTime(Split),
    /// Average lap time of the race.
    AvgLapTime(Summary),
    /// Fastest lap time of the race.
    FastestLapTime(Summary),
    /// End of the race.
    RaceEnd(Summary),
    /// A record with a type code absent from the [`TypeTable`].
    Unknown([u8; RECORD_LEN]),
}

impl Record {
    /// The decoded type code.
    pub fn kind(&self) -> u8 {
        match self {
            Record::RaceHeader(r) => r.kind,
            Record::LapTime(r) | Record::AbsTime(r) => r.kind,
            Record::AvgLapTime(r) | Record::FastestLapTime(r) | Record::RaceEnd(r) => r.kind,
            Record::Unknown(r) => r[0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceHeader {
    pub kind: u8,
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub id: u8,
}

/// A time and the lap (or finisher) it was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub kind: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
    pub lap: Lap,
}

impl Split {
    /// Hours component, carried in the ones digit of the type code.
    pub fn hours(&self) -> u8 {
        self.kind % 10
    }
}

/// A time summarising a number of laps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub kind: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
    pub laps: u8,
}

impl Summary {
    /// Hours component, carried in the ones digit of the type code.
    pub fn hours(&self) -> u8 {
        self.kind % 10
    }
}

/// A lap counter, as sent by the device and after overflow correction.
///
/// The device counter only reaches 99. See [`crate::sans::correct`] for how
/// the hundreds are recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    raw: u8,
    hundreds: Option<u32>,
}

impl Lap {
    /// A lap counter as received, without correction.
    pub fn new(raw: u8) -> Self {
        Self {
            raw,
            hundreds: None,
        }
    }

    pub(super) fn corrected(self, hundreds: u32) -> Self {
        Self {
            raw: self.raw,
            hundreds: Some(hundreds),
        }
    }

    /// The counter as sent by the device.
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Whether overflow correction has been applied.
    pub fn is_corrected(&self) -> bool {
        self.hundreds.is_some()
    }

    /// The counter including any recovered hundreds.
    pub fn value(&self) -> u32 {
        self.hundreds.unwrap_or(0).saturating_add(self.raw as u32)
    }
}

/// The shape of a record, as selected by its type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    RaceHeader,
    LapTime,
    AbsTime,
    AvgLapTime,
    FastestLapTime,
    RaceEnd,
}

/// Mapping from type codes to record kinds.
///
/// Firmware revisions disagree on which codes they emit, so the mapping is
/// data rather than code. [`TypeTable::DT2000`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTable([Option<Kind>; 100]);

impl TypeTable {
    /// Codes emitted by the DT2000.
    pub const DT2000: Self = Self::from_ranges(&[
        (90..=90, Kind::RaceHeader),
        (10..=19, Kind::LapTime),
        (20..=20, Kind::AbsTime),
        (30..=39, Kind::AvgLapTime),
        (40..=49, Kind::FastestLapTime),
        (50..=59, Kind::RaceEnd),
    ]);

    /// Codes emitted by the Ultrak 498. Its 30 and 40 records are unnamed.
    pub const ULTRAK498: Self = Self::from_ranges(&[
        (0..=9, Kind::RaceHeader),
        (10..=10, Kind::LapTime),
        (20..=20, Kind::AbsTime),
        (50..=50, Kind::RaceEnd),
    ]);

    /// Build a table from inclusive ranges of codes. Later ranges override
    /// earlier ones, and codes above 99 are ignored.
    pub const fn from_ranges(ranges: &[(RangeInclusive<u8>, Kind)]) -> Self {
        let mut table = [None; 100];

        let mut i = 0;
        while i < ranges.len() {
            let (range, kind) = &ranges[i];

            let mut code = *range.start() as usize;
            while code <= *range.end() as usize && code < table.len() {
                table[code] = Some(*kind);
                code += 1;
            }

            i += 1;
        }

        Self(table)
    }

    /// Look up the kind for a type code.
    pub fn get(&self, code: u8) -> Option<Kind> {
        self.0.get(code as usize).copied().flatten()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::DT2000
    }
}

/// An error classifying a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// Records hold exactly five integers.
    #[error("Expected 5 integers, found {0}.")]
    InvalidLength(usize),
}

/// Classify a record of five decoded integers by its type code.
pub fn classify(ints: &[u8], table: &TypeTable) -> Result<Record, ClassifyError> {
    let ints = ints
        .try_into()
        .map_err(|_| ClassifyError::InvalidLength(ints.len()))?;

    Ok(classify_record(ints, table))
}

/// Classify a record of exactly five decoded integers.
pub fn classify_record(ints: [u8; RECORD_LEN], table: &TypeTable) -> Record {
    let [kind, a, b, c, d] = ints;

    match table.get(kind) {
        Some(Kind::RaceHeader) => Record::RaceHeader(RaceHeader {
            kind,
            year: a,
            month: b,
            day: c,
            id: d,
        }),
        Some(k @ (Kind::LapTime | Kind::AbsTime)) => {
            let split = Split {
                kind,
                minutes: a,
                seconds: b,
                hundredths: c,
                lap: Lap::new(d),
            };

            match k {
                Kind::LapTime => Record::LapTime(split),
                _ => Record::AbsTime(split),
            }
        }
        Some(k @ (Kind::AvgLapTime | Kind::FastestLapTime | Kind::RaceEnd)) => {
            let summary = Summary {
                kind,
                minutes: a,
                seconds: b,
                hundredths: c,
                laps: d,
            };

            match k {
                Kind::AvgLapTime => Record::AvgLapTime(summary),
                Kind::FastestLapTime => Record::FastestLapTime(summary),
                _ => Record::RaceEnd(summary),
            }
        }
        None => Record::Unknown(ints),
    }
}
