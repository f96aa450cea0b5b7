//! Bit-packing encoder.

use crate::table::CodeTable;
use oxicode_core::bitstream::BitWriter;
use oxicode_core::error::{OxiCodeError, Result};

/// The complete output of an encode call: everything the decoder needs.
///
/// The table travels with the payload as an explicit owned value; no opaque
/// handles cross the codec boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Number of meaningful bits in `data`; the final byte is zero-padded.
    pub bit_len: u64,
    /// The packed payload, most-significant-bit first within each byte.
    pub data: Vec<u8>,
    /// The code table the payload was packed with.
    pub table: CodeTable,
}

impl Encoded {
    /// Compression ratio: payload bytes over input bytes (UTF-8).
    pub fn ratio(&self, original_bytes: usize) -> f64 {
        if original_bytes == 0 {
            return 1.0;
        }
        self.data.len() as f64 / original_bytes as f64
    }
}

/// Encode `text` with a caller-supplied code table.
///
/// Every symbol is resolved through the table's exact-match map and its code
/// appended most-significant-bit first. The table is checked per symbol, not
/// trusted: table and input may arrive from different callers.
///
/// # Errors
///
/// Returns [`OxiCodeError::EmptyInput`] for empty text and
/// [`OxiCodeError::SymbolNotInTable`] for any symbol the table does not
/// cover.
pub fn encode_with_table(text: &str, table: &CodeTable) -> Result<Encoded> {
    if text.is_empty() {
        return Err(OxiCodeError::EmptyInput);
    }

    let mut writer = BitWriter::with_capacity(text.len());
    for ch in text.chars() {
        let code = table
            .get(ch)
            .ok_or_else(|| OxiCodeError::symbol_not_in_table(ch))?;
        writer.write_bits(code.bits, code.len);
    }

    Ok(Encoded {
        bit_len: writer.bits_written(),
        data: writer.into_vec(),
        table: table.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::count_frequencies;
    use crate::table::{Code, CodeTable, CodeTableEntry};
    use crate::tree::build_tree;

    fn table_for(text: &str) -> CodeTable {
        let symbols = count_frequencies(text).unwrap();
        let root = build_tree(&symbols).unwrap();
        CodeTable::from_tree(&root).unwrap()
    }

    #[test]
    fn test_abracadabra_bitstream() {
        let table = table_for("abracadabra");
        let encoded = encode_with_table("abracadabra", &table).unwrap();
        // a=0 b=110 r=111 c=100 d=101 packed MSB-first
        assert_eq!(encoded.bit_len, 23);
        assert_eq!(encoded.data, vec![0x6E, 0x8A, 0xDC]);
    }

    #[test]
    fn test_single_symbol_payload() {
        let table = table_for("aaaa");
        let encoded = encode_with_table("aaaa", &table).unwrap();
        assert_eq!(encoded.bit_len, 4);
        assert_eq!(encoded.data, vec![0x00]);
    }

    #[test]
    fn test_empty_input() {
        let table = table_for("a");
        assert!(matches!(
            encode_with_table("", &table),
            Err(OxiCodeError::EmptyInput)
        ));
    }

    #[test]
    fn test_symbol_not_in_table() {
        let table = CodeTable::from_entries(vec![CodeTableEntry {
            ch: 'a',
            code: Code { bits: 0, len: 1 },
        }]);
        let err = encode_with_table("ab", &table).unwrap_err();
        assert!(matches!(
            err,
            OxiCodeError::SymbolNotInTable { symbol: 'b' }
        ));
    }

    #[test]
    fn test_bit_accounting() {
        let text = "the quick brown fox jumps over the lazy dog";
        let symbols = count_frequencies(text).unwrap();
        let table = table_for(text);
        let encoded = encode_with_table(text, &table).unwrap();

        let expected: u64 = symbols
            .iter()
            .map(|s| s.freq * u64::from(table.get(s.ch).unwrap().len))
            .sum();
        assert_eq!(encoded.bit_len, expected);
        assert_eq!(encoded.data.len() as u64, encoded.bit_len.div_ceil(8));
    }
}
