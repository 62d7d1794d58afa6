//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{ErrorKind, Read, Write},
    vec::Vec,
};

use thiserror::Error;
use zerocopy::IntoBytes;

use crate::sans::{
    DecodeError, Decoder,
    record::{RECORD_LEN, RawRecord, Record},
};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader or dump writer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A record could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The stream ended partway through a record.
    #[error("Stream ended partway through a record ({bytes:02x?}).")]
    TruncatedRecord { bytes: Vec<u8> },
}

/// Iterator over the records read from a reader.
///
/// Ends at the first clean end of stream, and after the first error.
#[derive(Debug)]
pub struct Records<R, W = std::io::Sink> {
    r: R,
    dump: Option<W>,
    decoder: Decoder,
    done: bool,
}

impl<R: Read> Records<R> {
    pub fn new(r: R, decoder: Decoder) -> Self {
        Self {
            r,
            dump: None,
            decoder,
            done: false,
        }
    }
}

impl<R: Read, W: Write> Records<R, W> {
    /// Copy every raw record to a writer before decoding it.
    pub fn dump<V: Write>(self, dump: V) -> Records<R, V> {
        Records {
            r: self.r,
            dump: Some(dump),
            decoder: self.decoder,
            done: self.done,
        }
    }

    /// The decoding session, including its correction state.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    fn next_record(&mut self) -> Result<Option<Record>, Error> {
        let Some(raw) = take(&mut self.r)? else {
            return Ok(None);
        };

        if let Some(dump) = &mut self.dump {
            dump.write_all(raw.as_bytes())?;
        }

        Ok(Some(self.decoder.advance(raw)?))
    }
}

impl<R: Read, W: Write> Iterator for Records<R, W> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.next_record().transpose();
        self.done = !matches!(next, Some(Ok(_)));
        next
    }
}

/// Decode all records from a reader, publishing each to a receiver.
///
/// Stops at the first decoding error, or at the first error returned by the
/// receiver.
///
/// This method is also re-exported as `ultrak::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<E>(
    r: &mut impl Read,
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

/// Take exactly one record from a reader.
///
/// Returns `None` if the reader ends before the first byte.
fn take(r: &mut impl Read) -> Result<Option<RawRecord>, Error> {
    let mut buf = [0; RECORD_LEN];
    let mut len = 0;

    while len < RECORD_LEN {
        match r.read(&mut buf[len..]) {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => Err(e)?,
        }
    }

    match len {
        0 => Ok(None),
        RECORD_LEN => Ok(Some(RawRecord::from(buf))),
        len => Err(Error::TruncatedRecord {
            bytes: buf[..len].to_vec(),
        }),
    }
}
