//! Running race state built from decoded records.
//!
//! [`Race`] follows a race as the device reports it: each lap-time record is
//! the next finisher, and its time is the gap to the finisher before. Summing
//! the gaps gives each finisher's time since the start. [`Splits`] instead
//! reports the absolute-time records of a single race.

use core::fmt;

use thiserror::Error;

use crate::sans::record::{RaceHeader, Record, Summary};

/// The finisher count and the lap counter reported by the device disagree.
///
/// Either a record was lost or one was repeated, and later finishers can no
/// longer be trusted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Finisher {position} reported as lap {lap}; a record was lost or repeated.")]
pub struct SequenceError {
    pub position: u32,
    pub lap: u32,
}

/// A duration in hours, minutes, seconds and hundredths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RaceTime {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
}

impl RaceTime {
    pub fn new(hours: u32, minutes: u8, seconds: u8, hundredths: u8) -> Self {
        let mut time = Self::default();
        time.add(hours, minutes, seconds, hundredths);
        time
    }

    /// The whole duration in hundredths of a second.
    pub fn total_hundredths(&self) -> u64 {
        let minutes = self.hours as u64 * 60 + self.minutes as u64;
        let seconds = minutes * 60 + self.seconds as u64;
        seconds * 100 + self.hundredths as u64
    }

    /// The whole duration in seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.total_hundredths() as f64 / 100.0
    }

    /// Add a duration, carrying each unit into the next.
    fn add(&mut self, hours: u32, minutes: u8, seconds: u8, hundredths: u8) {
        let h = self.hundredths as u32 + hundredths as u32;
        self.hundredths = (h % 100) as u8;

        let s = self.seconds as u32 + seconds as u32 + h / 100;
        self.seconds = (s % 60) as u8;

        let m = self.minutes as u32 + minutes as u32 + s / 60;
        self.minutes = (m % 60) as u8;

        self.hours += hours + m / 60;
    }
}

impl From<&Summary> for RaceTime {
    fn from(r: &Summary) -> Self {
        Self::new(r.hours() as u32, r.minutes, r.seconds, r.hundredths)
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            hours,
            minutes,
            seconds,
            hundredths,
        } = self;
        write!(f, "{hours}:{minutes:02}:{seconds:02}.{hundredths:02}")
    }
}

/// A change in race state worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A new race started.
    NewRace(RaceHeader),
    /// A competitor finished.
    Finisher { position: u32, time: RaceTime },
    /// The device reported the average lap time.
    AverageLap(RaceTime),
    /// The device reported the fastest lap time.
    FastestLap(RaceTime),
    /// The race ended.
    Finished { laps: u8 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NewRace(h) => write!(
                f,
                "New race {} ({:02}/{:02}/{:02})",
                h.id, h.day, h.month, h.year
            ),
            Notice::Finisher { position, time } => {
                write!(f, "Finisher {position}: {time}")
            }
            Notice::AverageLap(time) => write!(f, "Average lap: {time}"),
            Notice::FastestLap(time) => write!(f, "Fastest lap: {time}"),
            Notice::Finished { laps } => write!(f, "Race finished after {laps} laps"),
        }
    }
}

/// Accumulated state of the current race.
#[derive(Debug, Default, Clone)]
pub struct Race {
    header: Option<RaceHeader>,
    position: u32,
    elapsed: RaceTime,
}

impl Race {
    /// The header of the current race, if one has been seen.
    pub fn header(&self) -> Option<&RaceHeader> {
        self.header.as_ref()
    }

    /// Number of finishers so far.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Time of the latest finisher.
    pub fn elapsed(&self) -> RaceTime {
        self.elapsed
    }

    /// Time of the latest finisher, in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Apply a record, returning a notice if it changes what to report.
    pub fn advance(&mut self, record: &Record) -> Result<Option<Notice>, SequenceError> {
        let notice = match record {
            Record::RaceHeader(h) => {
                *self = Self {
                    header: Some(*h),
                    ..Self::default()
                };
                tracing::debug!(id = h.id, "new race");

                Notice::NewRace(*h)
            }
            Record::LapTime(r) => {
                self.position = self.position.saturating_add(1);
                self.elapsed
                    .add(r.hours() as u32, r.minutes, r.seconds, r.hundredths);

                let lap = r.lap.value();
                if self.position != lap {
                    Err(SequenceError {
                        position: self.position,
                        lap,
                    })?;
                }

                Notice::Finisher {
                    position: self.position,
                    time: self.elapsed,
                }
            }
            Record::AvgLapTime(r) => Notice::AverageLap(r.into()),
            Record::FastestLapTime(r) => Notice::FastestLap(r.into()),
            Record::RaceEnd(r) => Notice::Finished { laps: r.laps },
            Record::AbsTime(_) | Record::Unknown(_) => return Ok(None),
        };

        Ok(Some(notice))
    }
}

/// A finisher's time since the start, as a CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub lap: u32,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
}

impl Row {
    pub fn total_hundredths(&self) -> u32 {
        (self.minutes as u32 * 60 + self.seconds as u32) * 100 + self.hundredths as u32
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}:{:02}.{:02},{}",
            self.lap,
            self.minutes,
            self.seconds,
            self.hundredths,
            self.total_hundredths()
        )
    }
}

/// Absolute-time rows of one selected race.
#[derive(Debug, Clone)]
pub struct Splits {
    race_id: u8,
    current: Option<u8>,
}

impl Splits {
    pub fn new(race_id: u8) -> Self {
        Self {
            race_id,
            current: None,
        }
    }

    /// Apply a record, returning a row if it belongs to the selected race.
    pub fn advance(&mut self, record: &Record) -> Option<Row> {
        match record {
            Record::RaceHeader(h) => {
                self.current = Some(h.id);
                None
            }
            Record::AbsTime(r) if self.current == Some(self.race_id) => Some(Row {
                lap: r.lap.value(),
                minutes: r.minutes,
                seconds: r.seconds,
                hundredths: r.hundredths,
            }),
            _ => None,
        }
    }
}
