//! I/O-free decoding core.
//!
//! This module is intended for applications that supply records themselves,
//! for example from a serial driver on an embedded system. See
//! [`crate::avec`] for implementations reading from common sources.
//!
//! # Architecture
//!
//! A record passes through three stages, each usable on its own:
//!
//! 1. [`bcd`] converts each of the five bytes to an integer in `0..=99`.
//!
//! 2. [`record`] classifies the integers by the type code in the first
//! position, using a [`TypeTable`](record::TypeTable). Codes missing from the
//! table produce [`Record::Unknown`](record::Record::Unknown) rather than an
//! error, as firmware revisions differ in the codes they emit.
//!
//! 3. [`correct`] recovers the hundreds digit of lap counters, which the device
//! truncates to two digits.
//!
//! The [`Decoder`] runs all three, carrying correction state from one record
//! to the next. Some areas of the decoding process are left to the caller:
//!
//! - Reading exactly five bytes per record. Records have no framing, so a
//! stream that loses a byte cannot be resynchronized.
//!
//! - Starting a new [`Decoder`] for each independent stream.

pub mod bcd;
pub mod correct;
pub mod decoder;
pub mod record;

pub use decoder::{DecodeError, Decoder};
