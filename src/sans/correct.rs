//! Overflow correction for lap counters.
//!
//! Lap counters are a single BCD byte, so the device wraps from 99 back to 0
//! once a race passes a hundred laps or finishers. A counter reading exactly
//! zero is taken as a wrap, and a hundred is added to every later counter of
//! the same kind until the next race header.
//!
//! The first lap of a race may also legitimately read zero; the wire format
//! cannot tell the two apart, and such a lap is counted as a wrap.

use super::record::{Lap, Record, Split};

/// Recovered hundreds for the lap and absolute-time counters of a race.
///
/// The counters saturate rather than wrap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CorrectionState {
    pub lap_hundreds: u32,
    pub abs_hundreds: u32,
}

impl CorrectionState {
    /// Transition to another state by correcting a record.
    ///
    /// Returns the successor state and the corrected record. Records that
    /// already carry a correction are returned as-is, leaving the state
    /// untouched.
    pub fn correct(self, record: Record) -> (Self, Record) {
        match record {
            Record::RaceHeader(_) => (Self::default(), record),
            Record::LapTime(split) if !split.lap.is_corrected() => {
                let (lap_hundreds, split) = apply(self.lap_hundreds, split);
                (Self { lap_hundreds, ..self }, Record::LapTime(split))
            }
            Record::AbsTime(split) if !split.lap.is_corrected() => {
                let (abs_hundreds, split) = apply(self.abs_hundreds, split);
                (Self { abs_hundreds, ..self }, Record::AbsTime(split))
            }
            _ => (self, record),
        }
    }
}

fn apply(mut hundreds: u32, mut split: Split) -> (u32, Split) {
    if split.lap.raw() == 0 {
        hundreds = hundreds.saturating_add(100);
        tracing::debug!(hundreds, kind = split.kind, "lap counter wrapped");
    }

    split.lap = Lap::corrected(split.lap, hundreds);

    (hundreds, split)
}
