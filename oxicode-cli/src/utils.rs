//! Utility functions for the CLI: on-disk framing and text statistics.

use encoding_rs::Encoding;
use oxicode_core::error::Result;
use oxicode_huffman::{CodeTable, Encoded, Symbol};
use std::io::{self, Read, Write};

/// Write the on-disk form of an encoded payload.
///
/// Framing is deliberately bare: the code table wire form, a little-endian
/// `u64` bit length, then the payload bytes. No magic, no checksum - this is
/// a single-buffer codec, not an archive format.
pub fn write_encoded<W: Write>(writer: &mut W, encoded: &Encoded) -> Result<()> {
    encoded.table.write(writer)?;
    writer.write_all(&encoded.bit_len.to_le_bytes())?;
    writer.write_all(&encoded.data)?;
    Ok(())
}

/// Read an encoded payload back from its on-disk form.
pub fn read_encoded<R: Read>(reader: &mut R) -> Result<Encoded> {
    let table = CodeTable::read(reader)?;

    let mut len_buf = [0u8; 8];
    reader.read_exact(&mut len_buf)?;
    let bit_len = u64::from_le_bytes(len_buf);

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    Ok(Encoded {
        bit_len,
        data,
        table,
    })
}

/// Decode raw file bytes to text using a WHATWG encoding label.
///
/// Unmappable sequences are replaced (U+FFFD) rather than rejected; the
/// boolean reports whether any replacement happened so callers can warn.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<(String, bool)> {
    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unknown encoding label: {}", label),
        )
    })?;
    let (text, _, had_errors) = encoding.decode(bytes);
    Ok((text.into_owned(), had_errors))
}

/// Shannon entropy of a frequency list, in bits per symbol.
pub fn shannon_entropy(symbols: &[Symbol]) -> f64 {
    let total: u64 = symbols.iter().map(|s| s.freq).sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    -symbols
        .iter()
        .map(|s| {
            let p = s.freq as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxicode_huffman::{count_frequencies, decode, encode};
    use std::io::Cursor;

    #[test]
    fn test_framing_roundtrip() {
        let encoded = encode("file framing round trip").unwrap();

        let mut file = Vec::new();
        write_encoded(&mut file, &encoded).unwrap();
        let read_back = read_encoded(&mut Cursor::new(&file)).unwrap();

        assert_eq!(read_back, encoded);
        let text = decode(read_back.bit_len, &read_back.data, &read_back.table).unwrap();
        assert_eq!(text, "file framing round trip");
    }

    #[test]
    fn test_decode_text_labels() {
        let (text, had_errors) = decode_text("päivää".as_bytes(), "utf-8").unwrap();
        assert_eq!(text, "päivää");
        assert!(!had_errors);

        // 0xE4 is ä in Latin-1
        let (text, had_errors) = decode_text(&[0x70, 0xE4], "latin1").unwrap();
        assert_eq!(text, "pä");
        assert!(!had_errors);

        assert!(decode_text(b"x", "no-such-encoding").is_err());
    }

    #[test]
    fn test_entropy_bounds() {
        let flat = count_frequencies("abcd").unwrap();
        assert!((shannon_entropy(&flat) - 2.0).abs() < 1e-9);

        let uniform = count_frequencies("aaaa").unwrap();
        assert!(shannon_entropy(&uniform).abs() < 1e-9);
    }
}
