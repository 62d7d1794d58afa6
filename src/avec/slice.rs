//! Slice-based decoder implementation.

use thiserror::Error;
use zerocopy::FromBytes;

use crate::sans::{
    DecodeError, Decoder,
    record::{RawRecord, Record},
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A record could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The slice ended partway through a record.
    #[error("Slice ended {len} bytes into a record.")]
    TruncatedRecord { len: usize },
}

/// Iterator over the records in a slice.
///
/// Ends at the end of the slice, and after the first error.
#[derive(Debug)]
pub struct Records<'a> {
    r: &'a [u8],
    decoder: Decoder,
}

impl<'a> Records<'a> {
    pub fn new(r: &'a [u8], decoder: Decoder) -> Self {
        Self { r, decoder }
    }

    /// The bytes not yet decoded.
    pub fn remainder(&self) -> &'a [u8] {
        self.r
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.r.is_empty() {
            return None;
        }

        let Ok((raw, rest)) = RawRecord::read_from_prefix(self.r) else {
            let len = self.r.len();
            self.r = &[];
            return Some(Err(Error::TruncatedRecord { len }));
        };

        let record = self.decoder.advance(raw).map_err(Error::from);

        // Nothing follows a bad record.
        self.r = if record.is_ok() { rest } else { &[] };

        Some(record)
    }
}

/// Decode all records from a slice, publishing each to a receiver.
///
/// This method is also re-exported as `ultrak::avec::decode_slice`.
pub fn decode<E>(
    r: &[u8],
    decoder: Decoder,
    mut o: impl FnMut(Record) -> Result<(), E>,
) -> Result<(), E>
where
    E: From<Error>,
{
    for record in Records::new(r, decoder) {
        o(record?)?;
    }

    Ok(())
}
