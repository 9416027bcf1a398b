//! Utilities used in this crate which can also be generally useful downstream.

use alloc::string::String;
use core::fmt::Write;

use thiserror::Error;

// UTILITY FUNCTIONS
// ================================================================================================

/// Renders an array of bytes as hex into a String.
pub fn bytes_to_hex_string<const N: usize>(data: &[u8; N]) -> String {
    let mut s = String::with_capacity(2 * N + 2);

    s.push_str("0x");
    for byte in data.iter() {
        // writing into a String cannot fail
        let _ = write!(s, "{byte:02x}");
    }

    s
}

/// Defines errors which can occur during parsing of hexadecimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexParseError {
    #[error("expected hex data to have length {expected}, including the 0x prefix, found {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("hex encoded data must start with 0x prefix")]
    MissingPrefix,
    #[error("hex encoded data must contain only characters [0-9a-fA-F]")]
    InvalidChar,
}

/// Parses a `0x`-prefixed hex string into an array of bytes of known size.
pub fn hex_to_bytes<const N: usize>(value: &str) -> Result<[u8; N], HexParseError> {
    let expected: usize = (N * 2) + 2;
    if value.len() != expected {
        return Err(HexParseError::InvalidLength { expected, actual: value.len() });
    }

    let digits = value.strip_prefix("0x").ok_or(HexParseError::MissingPrefix)?.as_bytes();

    let mut decoded = [0u8; N];
    for (byte, pair) in decoded.iter_mut().zip(digits.chunks_exact(2)) {
        *byte = (hex_digit(pair[0])? << 4) | hex_digit(pair[1])?;
    }

    Ok(decoded)
}

fn hex_digit(c: u8) -> Result<u8, HexParseError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(HexParseError::InvalidChar),
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hex_roundtrip() {
        let bytes = [0x00, 0x1f, 0xa0, 0xff];
        let hex = bytes_to_hex_string(&bytes);
        assert_eq!(hex, "0x001fa0ff");
        assert_eq!(hex_to_bytes::<4>(&hex).unwrap(), bytes);
        assert_eq!(hex_to_bytes::<4>("0x001FA0FF").unwrap(), bytes);
    }

    #[test]
    fn hex_rejects_malformed_input() {
        assert_matches!(
            hex_to_bytes::<2>("0x001"),
            Err(HexParseError::InvalidLength { expected: 6, actual: 5 })
        );
        assert_matches!(hex_to_bytes::<2>("000102"), Err(HexParseError::MissingPrefix));
        assert_matches!(hex_to_bytes::<2>("0x00g1"), Err(HexParseError::InvalidChar));
    }
}
