//! Validate-then-compute: run the recognizer on the input and, if it accepts,
//! decode the operands and add them.

use crate::decoder::decode;
use crate::encoder::encode;
use crate::machine::TuringMachine;
use crate::table::Grammar;
use crate::types::{EvalError, Halt, Sum};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Evaluates expressions against a chosen [`Grammar`].
///
/// Holds configuration only. Each evaluation builds its own machine, so an
/// `Evaluator` can be shared freely.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    pub grammar: Grammar,
}

impl Evaluator {
    /// Creates an evaluator that runs the table selected by `grammar`.
    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }

    /// Runs the recognizer on `input` and, on acceptance, returns the sum of the two operands.
    ///
    /// # Returns
    ///
    /// * `Ok(Sum)` if the input is accepted and both operands decode.
    /// * `Err(EvalError::Rejected)` if the recognizer halts without accepting.
    /// * `Err(EvalError::Decode)` if the input is accepted but an operand is invalid.
    pub fn evaluate(&self, input: &str) -> Result<Sum, EvalError> {
        let mut machine = TuringMachine::new(self.grammar.table(), input);

        if let Halt::Reject(rejection) = machine.run(input) {
            return Err(EvalError::Rejected(rejection));
        }

        let (a, b) = decode(input)?;
        let sum = encode(&a, &b);
        debug!(binary = %sum.binary, decimal = %sum.decimal, "computed sum");

        Ok(sum)
    }

    /// The caller-side entry point: rejects an empty expression before the recognizer runs.
    ///
    /// # Returns
    ///
    /// * `Err(EvalError::EmptyInput)` for `""`, without building a machine.
    /// * Otherwise, whatever [`Evaluator::evaluate`] returns.
    pub fn submit(&self, input: &str) -> Result<Sum, EvalError> {
        if input.is_empty() {
            return Err(EvalError::EmptyInput);
        }

        self.evaluate(input)
    }
}

/// Evaluates `input` with the standard grammar.
pub fn evaluate(input: &str) -> Result<Sum, EvalError> {
    Evaluator::default().evaluate(input)
}

/// Submits `input` with the standard grammar, rejecting empty input first.
pub fn submit(input: &str) -> Result<Sum, EvalError> {
    Evaluator::default().submit(input)
}

/// Renders an evaluation result as the one-line message shown to the user.
pub fn render(result: &Result<Sum, EvalError>) -> String {
    match result {
        Ok(sum) => sum.to_string(),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecodeError, Operand, State, Symbol};
    use num_bigint::BigUint;
    use test_case::test_case;

    #[test_case("10+0=", "10", 2 ; "zero second operand")]
    #[test_case("10+1=", "11", 3 ; "one second operand")]
    #[test_case("10+101=", "111", 7 ; "multi digit second operand")]
    #[test_case("10+0001=", "11", 3 ; "leading zeros in second operand")]
    fn test_accepted(input: &str, binary: &str, decimal: u32) {
        let sum = evaluate(input).unwrap();

        assert_eq!(sum.binary, binary);
        assert_eq!(sum.decimal, BigUint::from(decimal));
    }

    #[test_case("11+10=" ; "first operand not ten")]
    #[test_case("10+101=extra" ; "trailing characters")]
    #[test_case("10-1=" ; "wrong operator")]
    #[test_case("10+1" ; "missing equals")]
    #[test_case("10 + 1 =" ; "whitespace")]
    #[test_case("1" ; "truncated")]
    fn test_rejected(input: &str) {
        assert!(matches!(evaluate(input), Err(EvalError::Rejected(_))));
    }

    #[test]
    fn test_empty_second_operand_is_decode_failure() {
        assert_eq!(
            evaluate("10+="),
            Err(EvalError::Decode(DecodeError::InvalidOperand {
                position: Operand::Second,
                token: String::new(),
            }))
        );
    }

    #[test]
    fn test_submit_short_circuits_empty_input() {
        assert_eq!(submit(""), Err(EvalError::EmptyInput));
        // The recognizer itself would report a rejection on blank
        assert_eq!(
            evaluate(""),
            Err(EvalError::Rejected(crate::types::Rejection {
                state: State::S0,
                symbol: Symbol::Blank,
                head: 0,
                reason: crate::types::RejectReason::NoRule,
            }))
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        for input in ["10+1=", "11+10=", "10+=", "10+1011="] {
            assert_eq!(evaluate(input), evaluate(input));
        }
    }

    #[test]
    fn test_general_grammar() {
        let evaluator = Evaluator::new(crate::table::Grammar::General);

        let sum = evaluator.evaluate("11+10=").unwrap();
        assert_eq!(sum.binary, "101");
        assert_eq!(sum.decimal, BigUint::from(5u32));
        assert!(matches!(
            evaluator.evaluate("+10="),
            Err(EvalError::Rejected(_))
        ));
    }

    #[test]
    fn test_render_messages() {
        assert_eq!(
            render(&submit("10+1=")),
            "Result: 11 (binary) = 3 (decimal)"
        );
        assert_eq!(render(&submit("11+10=")), "Invalid binary expression");
        assert_eq!(render(&submit("10+=")), "Error calculating the sum");
        assert_eq!(render(&submit("")), "Please enter a binary expression");
    }
}
