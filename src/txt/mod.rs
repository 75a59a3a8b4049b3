//! Decoder/Encoder for the plain-text aircraft data file format.
//!
//! Each record takes four lines (name, cruise speed, wingspan,
//! description). Records are separated by a single blank line and the last
//! description is not followed by a newline:
//!
//! ```text
//! Boeing 747
//! 570
//! 224 ft
//! Wide-body airliner
//!
//! Cessna 172
//! 140
//! 36 ft
//! Light trainer
//! ```
//!
//! The [decode_file] and [encode_file] functions work on byte slices;
//! [Reader] and [Writer] work on arbitrary streams.

mod consts;
mod decode;
mod encode;

pub use decode::*;
pub use encode::*;
