//! Accumulator-walk decoder.
//!
//! Decoding never rebuilds the tree. The table is indexed by
//! (length, pattern) and the decoder accumulates bits one at a time, probing
//! the index after each append; prefix-freeness guarantees at most one entry
//! can ever match, and a match is recognized the instant it occurs, so no
//! backtracking is needed.

use crate::table::CodeTable;
use oxicode_core::bitstream::BitReader;
use oxicode_core::error::{OxiCodeError, Result};
use std::collections::HashMap;

/// Decode `bit_len` bits of `data` back into text.
///
/// Consumes exactly `bit_len` bits, most-significant-bit first within each
/// byte; trailing padding bits in the final byte are ignored. A `bit_len` of
/// zero yields an empty string, not an error.
///
/// The table is validated before any bit is read - it may arrive from a
/// different caller than the payload.
///
/// # Errors
///
/// Returns [`OxiCodeError::InvalidTable`] for a malformed table and
/// [`OxiCodeError::TruncatedStream`] when the bit budget (or the buffer
/// itself) runs out mid-code, or when the accumulated bits can no longer
/// match any code. Work per bit is one hash probe; decoding is O(bit_len)
/// and can never loop unboundedly on corrupt input.
pub fn decode(bit_len: u64, data: &[u8], table: &CodeTable) -> Result<String> {
    if bit_len == 0 {
        return Ok(String::new());
    }

    table.validate()?;

    let index: HashMap<(u8, u32), char> = table
        .entries()
        .iter()
        .map(|e| ((e.code.len, e.code.bits), e.ch))
        .collect();
    let max_len = table.max_code_len();

    let mut reader = BitReader::new(data);
    let mut out = String::new();
    let mut acc: u32 = 0;
    let mut acc_len: u8 = 0;

    for _ in 0..bit_len {
        let bit = reader
            .read_bit()
            .map_err(|_| OxiCodeError::truncated(reader.bit_position()))?;
        acc = (acc << 1) | bit as u32;
        acc_len += 1;

        if let Some(&ch) = index.get(&(acc_len, acc)) {
            out.push(ch);
            acc = 0;
            acc_len = 0;
        } else if acc_len >= max_len {
            // No code is longer, so no future bit can complete a match
            return Err(OxiCodeError::truncated(reader.bit_position()));
        }
    }

    if acc_len > 0 {
        return Err(OxiCodeError::truncated(reader.bit_position()));
    }

    Ok(out)
}
