//! End-to-end properties of the Huffman codec.

use oxicode_core::OxiCodeError;
use oxicode_huffman::{CodeTable, count_frequencies, decode, encode, encode_with_table};
use std::io::Cursor;

#[test]
fn test_roundtrip_various_inputs() {
    let inputs = [
        "a",
        "ab",
        "abracadabra",
        "the quick brown fox jumps over the lazy dog",
        "mississippi",
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        "ねこ ねこ 猫 🐈",
    ];
    for text in inputs {
        let encoded = encode(text).unwrap();
        let decoded = decode(encoded.bit_len, &encoded.data, &encoded.table).unwrap();
        assert_eq!(decoded, text, "round trip failed for {:?}", text);
    }
}

#[test]
fn test_roundtrip_long_text() {
    let text = "Pack my box with five dozen liquor jugs. ".repeat(500);
    let encoded = encode(&text).unwrap();
    assert!(encoded.data.len() < text.len());
    let decoded = decode(encoded.bit_len, &encoded.data, &encoded.table).unwrap();
    assert_eq!(decoded, text);
}

#[test]
fn test_prefix_free_table() {
    let encoded = encode("she sells seashells by the seashore").unwrap();
    for a in encoded.table.entries() {
        for b in encoded.table.entries() {
            if a.ch == b.ch {
                continue;
            }
            if a.code.len <= b.code.len {
                let prefix = b.code.bits >> (b.code.len - a.code.len);
                assert!(
                    prefix != a.code.bits,
                    "{:?} is a prefix of {:?}",
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_bit_accounting() {
    let text = "in a hole in the ground there lived a hobbit";
    let symbols = count_frequencies(text).unwrap();
    let encoded = encode(text).unwrap();
    let expected: u64 = symbols
        .iter()
        .map(|s| s.freq * u64::from(encoded.table.get(s.ch).unwrap().len))
        .sum();
    assert_eq!(encoded.bit_len, expected);
}

#[test]
fn test_determinism() {
    let text = "deterministic trees come from deterministic tie-breaks";
    let first = encode(text).unwrap();
    let second = encode(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_symbol_alphabet() {
    let encoded = encode("aaaa").unwrap();
    assert_eq!(encoded.table.len(), 1);
    assert_eq!(encoded.table.get('a').unwrap().len, 1);
    assert_eq!(encoded.bit_len, 4);

    let decoded = decode(encoded.bit_len, &encoded.data, &encoded.table).unwrap();
    assert_eq!(decoded, "aaaa");
}

#[test]
fn test_compression_sanity_abracadabra() {
    // Deterministic tree: a=0, c=100, d=101, b=110, r=111
    let encoded = encode("abracadabra").unwrap();
    assert_eq!(encoded.bit_len, 23);
    assert!(encoded.bit_len < 88);
    assert_eq!(encoded.data, vec![0x6E, 0x8A, 0xDC]);

    let decoded = decode(encoded.bit_len, &encoded.data, &encoded.table).unwrap();
    assert_eq!(decoded, "abracadabra");
}

#[test]
fn test_truncated_buffer_is_reported() {
    let encoded = encode("compression is not magic").unwrap();
    let truncated = &encoded.data[..encoded.data.len() - 1];
    let err = decode(encoded.bit_len, truncated, &encoded.table).unwrap_err();
    assert!(matches!(err, OxiCodeError::TruncatedStream { .. }));
}

#[test]
fn test_consistently_shortened_stream_decodes() {
    // Cutting the budget back to a code boundary must yield the shortened
    // text; "abracadabra" codes end at bit 22 after the tenth symbol
    let encoded = encode("abracadabra").unwrap();
    let decoded = decode(22, &encoded.data, &encoded.table).unwrap();
    assert_eq!(decoded, "abracadabr");
}

#[test]
fn test_empty_input_contract() {
    assert!(matches!(encode(""), Err(OxiCodeError::EmptyInput)));

    let table = encode("ab").unwrap().table;
    assert_eq!(decode(0, &[], &table).unwrap(), "");
}

#[test]
fn test_mismatched_table() {
    let table = encode("abc").unwrap().table;
    let err = encode_with_table("abcd", &table).unwrap_err();
    assert!(matches!(
        err,
        OxiCodeError::SymbolNotInTable { symbol: 'd' }
    ));
}

#[test]
fn test_table_wire_roundtrip_decodes_payload() {
    let encoded = encode("it was a dark and stormy night").unwrap();

    let mut wire = Vec::new();
    encoded.table.write(&mut wire).unwrap();
    let table = CodeTable::read(&mut Cursor::new(&wire)).unwrap();

    let decoded = decode(encoded.bit_len, &encoded.data, &table).unwrap();
    assert_eq!(decoded, "it was a dark and stormy night");
}

#[test]
fn test_all_distinct_symbols() {
    // Every frequency equals one; the shape is decided purely by the
    // first-seen tie-break and must still round-trip
    let text: String = ('!'..='~').collect();
    let encoded = encode(&text).unwrap();
    assert_eq!(encoded.table.len(), text.chars().count());
    let decoded = decode(encoded.bit_len, &encoded.data, &encoded.table).unwrap();
    assert_eq!(decoded, text);
}
