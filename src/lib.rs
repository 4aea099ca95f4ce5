//! This crate adds two binary numbers written as `a+b=`, after a table-driven Turing machine
//! has checked that the expression has the accepted shape. It includes the tape, the fixed
//! transition tables, a table auditor, the recognizer itself, and the operand decoder and
//! sum encoder.

pub mod analyzer;
pub mod decoder;
pub mod encoder;
pub mod evaluator;
pub mod loader;
pub mod machine;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function from the analyzer module.
pub use analyzer::analyze;
/// Re-exports the operand decoding functions from the decoder module.
pub use decoder::{decode, parse_binary};
/// Re-exports the sum rendering functions from the encoder module.
pub use encoder::{encode, to_binary};
/// Re-exports the evaluation entry points from the evaluator module.
pub use evaluator::{evaluate, render, submit, Evaluator};
/// Re-exports the `ExpressionLoader` struct from the loader module.
pub use loader::ExpressionLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the transition tables and grammar selector from the table module.
pub use table::{Grammar, TransitionTable, GENERAL_TABLE, STANDARD_TABLE};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared types from the types module.
pub use types::{
    DecodeError, Direction, EvalError, Halt, LoadError, Operand, RejectReason, Rejection, State,
    Step, Sum, Symbol, TableError, Transition,
};
