//! # OxiCode-Huffman: Pure Rust Huffman text coding
//!
//! This crate implements classic (non-canonical) Huffman coding over Unicode
//! text: frequency counting, greedy tree construction, prefix-free code
//! table derivation, and bit-exact encode/decode.
//!
//! ## Features
//!
//! - **Pure Rust**: no C dependencies, `#![forbid(unsafe_code)]`
//! - **Deterministic**: equal frequencies tie-break on first appearance in
//!   the input, so the same text always produces the same tree, table, and
//!   bit stream
//! - **Tree-free decoding**: the decoder works from the code table alone,
//!   via a (length, pattern) index
//! - **Unbounded alphabets**: the table grows with the input; there is no
//!   fixed symbol capacity
//!
//! ## Pipeline
//!
//! ```text
//! text -> frequencies -> tree -> code table -> packed bits
//!                         (dropped here)        + bit length + table
//! ```
//!
//! The tree is an internal intermediate: it is torn down (iteratively, so
//! even degenerate chains cannot exhaust the stack) as soon as the table is
//! derived, and decoding never needs it.
//!
//! ## Example
//!
//! ```rust
//! use oxicode_huffman::{decode, encode};
//!
//! let encoded = encode("abracadabra").unwrap();
//! assert!(encoded.bit_len < 8 * "abracadabra".len() as u64);
//!
//! let text = decode(encoded.bit_len, &encoded.data, &encoded.table).unwrap();
//! assert_eq!(text, "abracadabra");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod encode;
pub mod freq;
pub mod table;
pub mod tree;

pub use decode::decode;
pub use encode::{Encoded, encode_with_table};
pub use freq::{Symbol, count_frequencies};
pub use table::{Code, CodeTable, CodeTableEntry};
pub use tree::{Node, build_tree};

use oxicode_core::error::Result;

/// Encode `text` with a table derived from its own frequencies.
///
/// Runs the full pipeline: count frequencies, build the tree, derive the
/// code table, drop the tree, bit-pack the text.
///
/// # Errors
///
/// Returns [`OxiCodeError::EmptyInput`](oxicode_core::OxiCodeError::EmptyInput)
/// for empty text.
pub fn encode(text: &str) -> Result<Encoded> {
    let symbols = freq::count_frequencies(text)?;
    let root = tree::build_tree(&symbols)?;
    let table = table::CodeTable::from_tree(&root)?;
    drop(root);
    encode::encode_with_table(text, &table)
}
