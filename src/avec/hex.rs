//! Adapter for captures stored as ASCII hex.
//!
//! Bit-banged serial captures are written as text, two hex digits per byte
//! with the high digit first. Whitespace between bytes is ignored.
//!
//! _Requires Cargo feature `std`._

use std::io::{self, BufRead, BufReader, ErrorKind, Read};

extern crate std;

/// A reader converting ASCII hex text into the bytes it encodes.
#[derive(Debug)]
pub struct HexReader<R> {
    r: BufReader<R>,
    /// An error met after some bytes of a read were already decoded.
    pending: Option<io::Error>,
}

impl<R: Read> HexReader<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: BufReader::new(r),
            pending: None,
        }
    }

    /// Read the next character that is not whitespace.
    fn digit(&mut self) -> io::Result<Option<u8>> {
        loop {
            let Some(&c) = self.r.fill_buf()?.first() else {
                return Ok(None);
            };
            self.r.consume(1);

            if !c.is_ascii_whitespace() {
                return Ok(Some(c));
            }
        }
    }

    /// Decode the next pair of digits into a byte.
    fn byte(&mut self) -> io::Result<Option<u8>> {
        let Some(high) = self.digit()? else {
            return Ok(None);
        };
        let Some(low) = self.digit()? else {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "Odd number of hex digits.",
            ));
        };

        let mut byte = [0];
        ::hex::decode_to_slice([high, low], &mut byte)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;

        Ok(Some(byte[0]))
    }
}

impl<R: Read> Read for HexReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.pending.take() {
            return Err(e);
        }

        let mut n = 0;

        while n < buf.len() {
            match self.byte() {
                Ok(Some(byte)) => {
                    buf[n] = byte;
                    n += 1;
                }
                Ok(None) => break,
                Err(e) if n == 0 => return Err(e),
                Err(e) => {
                    self.pending = Some(e);
                    break;
                }
            }
        }

        Ok(n)
    }
}
