//! This module renders sums back into the binary text shown to the caller.

use crate::types::Sum;
use num_bigint::BigUint;

/// Renders `value` in base 2 without a prefix, padding or leading zeros (`0` renders as `"0"`).
pub fn to_binary(value: &BigUint) -> String {
    value.to_str_radix(2)
}

/// Adds two operands and returns the sum in both binary and decimal form.
pub fn encode(a: &BigUint, b: &BigUint) -> Sum {
    let decimal = a + b;

    Sum {
        binary: to_binary(&decimal),
        decimal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_binary() {
        assert_eq!(to_binary(&BigUint::from(0u32)), "0");
        assert_eq!(to_binary(&BigUint::from(3u32)), "11");
        assert_eq!(to_binary(&BigUint::from(10u32)), "1010");
    }

    #[test]
    fn test_encode_sum() {
        let sum = encode(&BigUint::from(2u32), &BigUint::from(5u32));

        assert_eq!(sum.binary, "111");
        assert_eq!(sum.decimal, BigUint::from(7u32));
    }

    #[test]
    fn test_encode_beyond_u64() {
        let max = BigUint::from(u64::MAX);
        let sum = encode(&max, &BigUint::from(1u32));

        assert_eq!(sum.binary, format!("1{}", "0".repeat(64)));
        assert_eq!(sum.decimal.to_string(), "18446744073709551616");
    }
}
