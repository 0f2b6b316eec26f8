//! Match-info (`.info`) decoding.
//!
//! The format is a protobuf-like stream of single-byte tags followed by
//! varint, fixed-width or length-delimited payloads. It is not
//! self-describing:
//! - `layout`: tag bytes and constants (source of truth)
//! - `reader`: cursor with primitive reads
//! - `tag`: tag resolution and the repeated-field slot convention
//! - `header`: the fixed, positional preamble
//! - `round`: length-bounded round frames
//! - `parser`: header followed by rounds
//! - `error`: decode failures, all fatal for the current file
//!
//! Parsers are pure and perform no I/O.

pub mod error;
pub mod header;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod round;
pub mod tag;

#[cfg(test)]
pub(crate) mod test_support;

pub use parser::parse_info;
