//! Convenience interfaces for common decoding patterns.
//!
//! The iterators in this module pull five bytes at a time from a reader or a
//! byte slice, and yield each record after decoding, classification and
//! overflow correction. The `decode_*` functions drive the same iterators,
//! publishing each record to a closure.
//!
//! Records carry no framing, so every iterator stops after its first error:
//! once a byte is lost or a record is malformed, the positions of the records
//! that follow are unknown.
//!
//! # Example
//!
//! ```
//! let file = std::fs::File::open("race.bin")?;
//! let mut race = Race::default();
//!
//! for record in Records::new(file, Decoder::default()) {
//!     if let Some(notice) = race.advance(&record?)? {
//!         println!("{notice}");
//!     }
//! }
//! ```

#[cfg(feature = "std")]
pub mod hex;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;
