//! Integer literals beyond the 64-bit range.
//!
//! `serde_json` and `serde_yml` fall back to `f64` for these, which rounds
//! them without notice. Documents carrying one are refused instead.

use super::Format;
use crate::error::{Error, Result};

/// Whether a decimal integer literal decodes to exactly the number written.
pub(crate) fn fits_in_64_bits(literal: &str) -> bool {
    literal.parse::<i64>().is_ok() || literal.parse::<u64>().is_ok()
}

pub(crate) fn inexact(format: Format, literal: &str, line: usize, column: usize) -> Error {
    Error::InexactNumber {
        format,
        literal: literal.to_string(),
        line,
        column,
    }
}

/// Scans syntactically valid JSON for integer literals that do not fit in
/// 64 bits. Fractions and exponents are floats by intent and pass.
pub(crate) fn check_json(input: &[u8]) -> Result<()> {
    let (mut line, mut line_start) = (1, 0);
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'"' => {
                i += 1;
                while i < input.len() && input[i] != b'"' {
                    i += if input[i] == b'\\' { 2 } else { 1 };
                }
                i += 1;
            }
            b'\n' => {
                i += 1;
                line += 1;
                line_start = i;
            }
            b'-' | b'0'..=b'9' => {
                let start = i;
                while i < input.len()
                    && matches!(input[i], b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9')
                {
                    i += 1;
                }
                let literal = String::from_utf8_lossy(&input[start..i]);
                if !literal.contains(['.', 'e', 'E']) && !fits_in_64_bits(&literal) {
                    return Err(inexact(Format::Json, &literal, line, start - line_start + 1));
                }
            }
            _ => i += 1,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_in_64_bits() {
        assert!(fits_in_64_bits("0"));
        assert!(fits_in_64_bits("-9223372036854775808"));
        assert!(fits_in_64_bits("18446744073709551615"));
        assert!(!fits_in_64_bits("18446744073709551616"));
        assert!(!fits_in_64_bits("-9223372036854775809"));
    }

    #[test]
    fn test_check_json_reports_position() {
        let input = b"{\n  \"Size\": 1,\n  \"Id\": 12345678901234567890123\n}";
        match check_json(input) {
            Err(Error::InexactNumber {
                format,
                literal,
                line,
                column,
            }) => {
                assert_eq!(format, Format::Json);
                assert_eq!(literal, "12345678901234567890123");
                assert_eq!(line, 3);
                assert_eq!(column, 9);
            }
            other => panic!("expected an inexact number, got {other:?}"),
        }
    }

    #[test]
    fn test_check_json_ignores_strings_and_floats() {
        let input = br#"{"Id": "12345678901234567890123", "Esc\"99999999999999999999": 1.5e300, "Big": 1e30}"#;
        assert!(check_json(input).is_ok());
        assert!(check_json(b"[-1, 0, 18446744073709551615, 2.5]").is_ok());
    }
}
