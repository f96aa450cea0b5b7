//! Error types for OxiCode operations.
//!
//! One error type covers the whole workspace: the codec's typed failure
//! conditions (empty input, table mismatches, truncated streams) plus the
//! ambient I/O errors raised by front ends that read and write files.

use std::io;
use thiserror::Error;

/// The main error type for OxiCode operations.
#[derive(Debug, Error)]
pub enum OxiCodeError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input contained no symbols.
    #[error("Empty input: nothing to encode")]
    EmptyInput,

    /// The encoder was handed a code table that does not cover an input
    /// symbol. Cannot happen when the table was derived from the same input.
    #[error("Symbol {symbol:?} has no entry in the code table")]
    SymbolNotInTable {
        /// The uncovered symbol.
        symbol: char,
    },

    /// The decoder exhausted its bit budget in the middle of a code.
    #[error("Truncated stream: bit budget exhausted mid-code at bit {bit_position}")]
    TruncatedStream {
        /// Bit position at which decoding could not continue.
        bit_position: u64,
    },

    /// Malformed code table: a prefix violation, a duplicate pattern or
    /// symbol, a zero-length entry in a multi-symbol table, or an invalid
    /// wire record.
    #[error("Invalid code table: {message}")]
    InvalidTable {
        /// Description of the violation.
        message: String,
    },

    /// A bit-level read ran past the end of the buffer.
    #[error("Unexpected end of input: needed {expected} more bits at bit {bit_position}")]
    UnexpectedEof {
        /// Number of bits that were expected but not available.
        expected: u64,
        /// Bit position of the failed read.
        bit_position: u64,
    },
}

/// Result type alias for OxiCode operations.
pub type Result<T> = std::result::Result<T, OxiCodeError>;

impl OxiCodeError {
    /// Create a symbol-not-in-table error.
    pub fn symbol_not_in_table(symbol: char) -> Self {
        Self::SymbolNotInTable { symbol }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::TruncatedStream { bit_position }
    }

    /// Create an invalid table error.
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidTable {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: u64, bit_position: u64) -> Self {
        Self::UnexpectedEof {
            expected,
            bit_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiCodeError::symbol_not_in_table('é');
        assert!(err.to_string().contains("'é'"));

        let err = OxiCodeError::truncated(42);
        assert!(err.to_string().contains("bit 42"));

        let err = OxiCodeError::invalid_table("pattern 0b10 is a prefix of 0b101");
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiCodeError = io_err.into();
        assert!(matches!(err, OxiCodeError::Io(_)));
    }
}
