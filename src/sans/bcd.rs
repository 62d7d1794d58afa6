//! Helper for decoding binary-coded decimal bytes.
//!
//! Each byte carries two decimal digits. Unlike conventional packed BCD, the
//! timers place the tens digit in the low nibble and the ones digit in the high
//! nibble, so `0x24` decodes to 42.

use tartan_bitfield::bitfield;
use thiserror::Error;

bitfield! {
    struct BcdByte(u8) {
        [0..4] tens: u8,
        [4..8] ones: u8,
    }
}

/// How to treat a byte with a nibble outside `0..=9`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Reject the byte with [`BcdError::InvalidDigit`].
    #[default]
    Strict,
    /// Decode the byte as zero.
    Lenient,
}

/// An error decoding a BCD byte.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BcdError {
    /// A nibble of the byte is not a decimal digit.
    #[error("Invalid BCD digit in byte {byte:#04x}.")]
    InvalidDigit { byte: u8 },
}

/// Decode a single byte to an integer in `0..=99`.
pub fn decode_byte(b: u8, policy: Policy) -> Result<u8, BcdError> {
    let digits = BcdByte(b);
    let (tens, ones) = (digits.tens(), digits.ones());

    if tens > 9 || ones > 9 {
        return match policy {
            Policy::Strict => Err(BcdError::InvalidDigit { byte: b }),
            Policy::Lenient => {
                tracing::warn!(byte = b, "decoding invalid BCD byte as zero");
                Ok(0)
            }
        };
    }

    Ok(tens * 10 + ones)
}

/// Decode a run of bytes into `out`, preserving order.
///
/// Only the first `r.len()` elements of `out` are written. On failure, returns
/// the index of the offending byte alongside the error.
///
/// # Panics
///
/// Panics if `out` is shorter than `r`.
pub fn decode_bytes(r: &[u8], policy: Policy, out: &mut [u8]) -> Result<(), (usize, BcdError)> {
    for (i, (b, o)) in r.iter().zip(&mut out[..r.len()]).enumerate() {
        *o = decode_byte(*b, policy).map_err(|e| (i, e))?;
    }

    Ok(())
}
