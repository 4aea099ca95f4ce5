//! Extracts the two binary operands from a raw `a+b=` expression.
//!
//! Decoding works on the raw input string, never on the machine's tape.

use crate::types::{DecodeError, Operand};
use num_bigint::BigUint;
use num_traits::Num;
use tracing::debug;

/// Splits `input` around `+` and `=` and parses both operands as base-2 integers.
///
/// The expression must contain exactly one `+`. The first operand is everything
/// before it; the second is everything after it up to the first `=`. Both are
/// trimmed of surrounding whitespace.
///
/// # Returns
///
/// * `Ok((a, b))` with both operands decoded.
/// * `Err(DecodeError::MissingSeparator)` if the input does not split into two parts.
/// * `Err(DecodeError::InvalidOperand)` if either operand is empty or not binary.
pub fn decode(input: &str) -> Result<(BigUint, BigUint), DecodeError> {
    let parts: Vec<&str> = input.split('+').collect();
    let [first, rest] = parts.as_slice() else {
        return Err(DecodeError::MissingSeparator(parts.len().saturating_sub(1)));
    };

    let second = rest.split('=').next().unwrap_or_default();

    let a = parse_binary(first.trim(), Operand::First)?;
    let b = parse_binary(second.trim(), Operand::Second)?;
    debug!(%a, %b, "decoded operands");

    Ok((a, b))
}

/// Parses a non-empty string of `0`/`1` digits.
pub fn parse_binary(token: &str, position: Operand) -> Result<BigUint, DecodeError> {
    let invalid = || DecodeError::InvalidOperand {
        position,
        token: token.to_string(),
    };

    if token.is_empty() || !token.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }

    BigUint::from_str_radix(token, 2).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_decode_simple_expression() {
        assert_eq!(decode("10+101="), Ok((big(2), big(5))));
        assert_eq!(decode("10+0="), Ok((big(2), big(0))));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        assert_eq!(decode(" 11 +  1 = "), Ok((big(3), big(1))));
    }

    #[test]
    fn test_decode_ignores_text_after_equals() {
        assert_eq!(decode("1+1=10=junk"), Ok((big(1), big(1))));
        // No '=' at all: the whole remainder is the second operand
        assert_eq!(decode("1+11"), Ok((big(1), big(3))));
    }

    #[test]
    fn test_decode_separator_count() {
        assert_eq!(decode("101="), Err(DecodeError::MissingSeparator(0)));
        assert_eq!(decode("1+1+1="), Err(DecodeError::MissingSeparator(2)));
        assert_eq!(decode(""), Err(DecodeError::MissingSeparator(0)));
    }

    #[test]
    fn test_decode_empty_second_operand() {
        assert_eq!(
            decode("10+="),
            Err(DecodeError::InvalidOperand {
                position: Operand::Second,
                token: String::new(),
            })
        );
    }

    #[test]
    fn test_decode_non_binary_operand() {
        assert_eq!(
            decode("12+1="),
            Err(DecodeError::InvalidOperand {
                position: Operand::First,
                token: "12".to_string(),
            })
        );
        assert!(parse_binary("0b101", Operand::First).is_err());
        assert!(parse_binary("1_0", Operand::First).is_err());
    }

    #[test]
    fn test_parse_long_operand() {
        let token = "1".repeat(200);
        let value = parse_binary(&token, Operand::Second).unwrap();
        assert_eq!(value.bits(), 200);
    }
}
