//! Per-record decoding session.

use thiserror::Error;

use super::{
    bcd::{BcdError, Policy, decode_bytes},
    correct::CorrectionState,
    record::{RECORD_LEN, RawRecord, Record, TypeTable, classify_record},
};

/// An error decoding a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte of the record is not valid BCD.
    #[error("Invalid BCD digit in byte {index} of record {record:02x?}.")]
    InvalidDigit {
        record: [u8; RECORD_LEN],
        index: usize,
        byte: u8,
    },
}

/// A decoding session over a single stream of records.
///
/// Holds the type table, the BCD policy, and the overflow correction state,
/// which carries from one record to the next. Start a new session for each
/// independent stream.
#[derive(Debug, Default, Clone)]
pub struct Decoder {
    table: TypeTable,
    policy: Policy,
    correction: CorrectionState,
}

impl Decoder {
    pub fn new(table: TypeTable, policy: Policy) -> Self {
        Self {
            table,
            policy,
            correction: CorrectionState::default(),
        }
    }

    /// The current overflow correction state.
    pub fn correction(&self) -> CorrectionState {
        self.correction
    }

    /// Decode, classify and correct a single record.
    pub fn advance(&mut self, raw: RawRecord) -> Result<Record, DecodeError> {
        let bytes: [u8; RECORD_LEN] = raw.into();

        let mut ints = [0; RECORD_LEN];
        decode_bytes(&bytes, self.policy, &mut ints).map_err(
            |(index, BcdError::InvalidDigit { byte })| DecodeError::InvalidDigit {
                record: bytes,
                index,
                byte,
            },
        )?;

        let record = classify_record(ints, &self.table);

        if let Record::Unknown(ints) = record {
            tracing::debug!(?ints, "skipping record of unknown type");
        }

        let (correction, record) = self.correction.correct(record);
        self.correction = correction;

        Ok(record)
    }
}
