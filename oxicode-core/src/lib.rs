//! # OxiCode Core
//!
//! Core components for the OxiCode Huffman text codec:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiCode is a small layered stack:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ CLI: file I/O, text decoding, on-disk framing  │
//! ├────────────────────────────────────────────────┤
//! │ Codec: frequencies → tree → table → bits       │
//! ├────────────────────────────────────────────────┤
//! │ Core (this crate): BitReader/BitWriter, errors │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicode_core::bitstream::BitWriter;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b110, 3);
//! assert_eq!(writer.bits_written(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiCodeError, Result};
