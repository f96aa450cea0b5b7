//! Code table generation, validation, and wire form.
//!
//! The table is the flattened (symbol → bit pattern, length) mapping derived
//! from the Huffman tree. It is everything the decoder needs; the tree is
//! dropped as soon as the table exists.
//!
//! # Wire form
//!
//! When persisted or transmitted separately from the payload, the table is a
//! little-endian `u32` entry count followed by one 7-byte record per entry:
//! 4-byte Unicode scalar value, 2-byte bit pattern, 1-byte length (1-16).
//! In-memory codes may be up to 32 bits; serialization enforces the 16-bit
//! wire cap.

use crate::tree::Node;
use oxicode_core::error::{OxiCodeError, Result};
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

/// Maximum code length representable in memory.
pub const MAX_CODE_LENGTH: u8 = 32;

/// Maximum code length representable in the wire form.
pub const MAX_WIRE_CODE_LENGTH: u8 = 16;

/// Size in bytes of one serialized table record.
const WIRE_RECORD_SIZE: usize = 7;

/// A prefix-free bit pattern: the low `len` bits of `bits`, emitted
/// most-significant-bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// The pattern, right-aligned.
    pub bits: u32,
    /// Number of meaningful bits (1-32).
    pub len: u8,
}

impl Code {
    /// The code for the first `len` bits of this pattern.
    fn prefix(self, len: u8) -> Code {
        Code {
            bits: self.bits >> (self.len - len),
            len,
        }
    }
}

/// One table entry: a symbol and its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeTableEntry {
    /// The symbol.
    pub ch: char,
    /// Its assigned code.
    pub code: Code,
}

/// The code table: entries in leaf order plus an exact-match symbol index.
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: Vec<CodeTableEntry>,
    by_symbol: HashMap<char, Code>,
}

impl PartialEq for CodeTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for CodeTable {}

impl CodeTable {
    /// Derive the code table from a Huffman tree.
    ///
    /// Depth-first traversal with an explicit stack, appending `0` when
    /// descending left and `1` when descending right; the right child is
    /// pushed first so leaves emit in left-to-right order. A root that is
    /// itself a leaf (single-symbol alphabet) gets the explicit code `0` of
    /// length 1 - the natural traversal would yield an unusable zero-length
    /// code.
    ///
    /// # Errors
    ///
    /// Returns [`OxiCodeError::InvalidTable`] if any path exceeds
    /// [`MAX_CODE_LENGTH`] bits.
    pub fn from_tree(root: &Node) -> Result<Self> {
        let mut entries = Vec::new();
        let mut stack: Vec<(&Node, Code)> = vec![(root, Code { bits: 0, len: 0 })];

        while let Some((node, code)) = stack.pop() {
            if let Some(ch) = node.symbol() {
                let code = if code.len == 0 {
                    Code { bits: 0, len: 1 }
                } else {
                    code
                };
                entries.push(CodeTableEntry { ch, code });
                continue;
            }

            if code.len == MAX_CODE_LENGTH {
                return Err(OxiCodeError::invalid_table(format!(
                    "code longer than {} bits",
                    MAX_CODE_LENGTH
                )));
            }

            let (left, right) = node
                .children()
                .expect("BUG: non-leaf nodes always carry two children");
            stack.push((
                right,
                Code {
                    bits: (code.bits << 1) | 1,
                    len: code.len + 1,
                },
            ));
            stack.push((
                left,
                Code {
                    bits: code.bits << 1,
                    len: code.len + 1,
                },
            ));
        }

        Ok(Self::from_entries(entries))
    }

    /// Build a table from raw entries, without validation.
    ///
    /// Tables crossing the decode boundary from an untrusted caller are
    /// checked by [`CodeTable::validate`] at that point.
    pub fn from_entries(entries: Vec<CodeTableEntry>) -> Self {
        let by_symbol = entries.iter().map(|e| (e.ch, e.code)).collect();
        Self { entries, by_symbol }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in emission (left-to-right leaf) order.
    pub fn entries(&self) -> &[CodeTableEntry] {
        &self.entries
    }

    /// Exact-match lookup of a symbol's code.
    pub fn get(&self, ch: char) -> Option<Code> {
        self.by_symbol.get(&ch).copied()
    }

    /// Length of the longest code in the table.
    pub fn max_code_len(&self) -> u8 {
        self.entries.iter().map(|e| e.code.len).max().unwrap_or(0)
    }

    /// Check the structural invariants a decodable table must satisfy.
    ///
    /// Rejected: empty tables, zero-length or over-long codes, duplicate
    /// symbols, duplicate patterns, and any pattern that is a proper prefix
    /// of another. Tables generated by [`CodeTable::from_tree`] always pass;
    /// the check exists because table and payload may arrive from a
    /// different caller than the one that built them.
    ///
    /// # Errors
    ///
    /// Returns [`OxiCodeError::InvalidTable`] naming the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(OxiCodeError::invalid_table("table has no entries"));
        }

        let mut symbols = HashSet::new();
        let mut codes = HashSet::new();
        for entry in &self.entries {
            if entry.code.len == 0 {
                return Err(OxiCodeError::invalid_table(format!(
                    "zero-length code for symbol U+{:04X}",
                    entry.ch as u32
                )));
            }
            if entry.code.len > MAX_CODE_LENGTH {
                return Err(OxiCodeError::invalid_table(format!(
                    "code longer than {} bits for symbol U+{:04X}",
                    MAX_CODE_LENGTH, entry.ch as u32
                )));
            }
            if !symbols.insert(entry.ch) {
                return Err(OxiCodeError::invalid_table(format!(
                    "duplicate symbol U+{:04X}",
                    entry.ch as u32
                )));
            }
            if !codes.insert(entry.code) {
                return Err(OxiCodeError::invalid_table(format!(
                    "duplicate pattern {:0len$b}",
                    entry.code.bits,
                    len = entry.code.len as usize
                )));
            }
        }

        // Prefix-freeness: every proper prefix of every code must be absent
        for entry in &self.entries {
            for len in 1..entry.code.len {
                if codes.contains(&entry.code.prefix(len)) {
                    return Err(OxiCodeError::invalid_table(format!(
                        "pattern {:0plen$b} is a prefix of {:0len$b}",
                        entry.code.prefix(len).bits,
                        entry.code.bits,
                        plen = len as usize,
                        len = entry.code.len as usize
                    )));
                }
            }
        }

        Ok(())
    }

    /// Write the wire form of the table.
    ///
    /// # Errors
    ///
    /// Returns [`OxiCodeError::InvalidTable`] if any code exceeds the
    /// 16-bit wire cap or has zero length, and [`OxiCodeError::Io`] on
    /// writer failure.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&(self.entries.len() as u32).to_le_bytes())?;
        for entry in &self.entries {
            if entry.code.len == 0 || entry.code.len > MAX_WIRE_CODE_LENGTH {
                return Err(OxiCodeError::invalid_table(format!(
                    "code length {} for symbol U+{:04X} not representable on the wire (1-{})",
                    entry.code.len, entry.ch as u32, MAX_WIRE_CODE_LENGTH
                )));
            }
            writer.write_all(&(entry.ch as u32).to_le_bytes())?;
            writer.write_all(&(entry.code.bits as u16).to_le_bytes())?;
            writer.write_all(&[entry.code.len])?;
        }
        Ok(())
    }

    /// Read a table back from its wire form.
    ///
    /// The returned table is fully validated.
    ///
    /// # Errors
    ///
    /// Returns [`OxiCodeError::InvalidTable`] for a non-scalar symbol value,
    /// an out-of-range length, a pattern wider than its length, or any
    /// violation caught by [`CodeTable::validate`]; [`OxiCodeError::Io`] on
    /// reader failure (including short reads).
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut count_buf = [0u8; 4];
        reader.read_exact(&mut count_buf)?;
        let count = u32::from_le_bytes(count_buf) as usize;

        let mut entries = Vec::with_capacity(count.min(4096));
        let mut record = [0u8; WIRE_RECORD_SIZE];
        for _ in 0..count {
            reader.read_exact(&mut record)?;

            let scalar = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
            let ch = char::from_u32(scalar).ok_or_else(|| {
                OxiCodeError::invalid_table(format!("invalid Unicode scalar value {:#X}", scalar))
            })?;
            let bits = u16::from_le_bytes([record[4], record[5]]) as u32;
            let len = record[6];

            if len == 0 || len > MAX_WIRE_CODE_LENGTH {
                return Err(OxiCodeError::invalid_table(format!(
                    "code length {} out of wire range (1-{})",
                    len, MAX_WIRE_CODE_LENGTH
                )));
            }
            if len < 16 && bits >= 1 << len {
                return Err(OxiCodeError::invalid_table(format!(
                    "pattern {:#b} wider than its declared length {}",
                    bits, len
                )));
            }

            entries.push(CodeTableEntry {
                ch,
                code: Code { bits, len },
            });
        }

        let table = Self::from_entries(entries);
        table.validate()?;
        Ok(table)
    }
}
