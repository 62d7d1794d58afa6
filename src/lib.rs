#![no_std]

//! A decoder for the record protocol of Ultrak 498 and DT2000 race timers.
//!
//! These consoles report a race as a stream of fixed, five-byte records, each
//! byte holding a pair of binary-coded decimal digits. There is no framing,
//! checksum or length prefix: a record is identified only by its position in
//! the stream and by the type code in its first byte.
//!
//! The [`sans`] module holds the I/O-free core: the BCD codec, the record
//! classifier, and the correction applied to lap counters that overflow past
//! 99. The [`avec`] module drives that core over readers and byte slices, and
//! the [`race`] module turns decoded records into a running commentary.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoding and the hex source adapter (default).

pub mod avec;
pub mod race;
pub mod sans;
