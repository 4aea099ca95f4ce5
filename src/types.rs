//! This module defines the core data structures and types shared by the recognizer,
//! the operand decoder and the sum encoder, including states, tape symbols, transitions,
//! execution results, and error types.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The character used when rendering the blank symbol in traces and tables.
pub const BLANK_DISPLAY: char = '_';

/// The states of the recognizer.
///
/// `Accept` is the only terminal state. A failed lookup also halts the machine,
/// but as a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    S0,
    S1,
    S2,
    S3,
    S4,
    Accept,
}

impl State {
    /// Every state, in label order.
    pub const ALL: [State; 6] = [
        State::S0,
        State::S1,
        State::S2,
        State::S3,
        State::S4,
        State::Accept,
    ];

    /// Returns the conventional `q0..q5` label of the state.
    pub fn label(&self) -> &'static str {
        match self {
            State::S0 => "q0",
            State::S1 => "q1",
            State::S2 => "q2",
            State::S3 => "q3",
            State::S4 => "q4",
            State::Accept => "q5",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single tape cell.
///
/// Input characters are stored verbatim, including characters outside the
/// `{0, 1, +, =}` alphabet; those simply have no transition. `Blank` only
/// ever appears past the right end of the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Char(char),
    Blank,
}

impl Symbol {
    pub const ZERO: Symbol = Symbol::Char('0');
    pub const ONE: Symbol = Symbol::Char('1');
    pub const PLUS: Symbol = Symbol::Char('+');
    pub const EQUALS: Symbol = Symbol::Char('=');

    /// Returns `true` for the blank sentinel.
    pub fn is_blank(&self) -> bool {
        matches!(self, Symbol::Blank)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::Blank => write!(f, "{}", BLANK_DISPLAY),
        }
    }
}

/// Represents the directions the head may move. The recognizer never moves left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => f.write_str("R"),
            Direction::Stay => f.write_str("S"),
        }
    }
}

/// The right-hand side of a transition rule: what to do after reading a symbol in a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The next state the machine transitions to.
    pub next_state: State,
    /// The symbol written back to the cell under the head.
    pub write: Symbol,
    /// How the head moves after writing.
    pub direction: Direction,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine applied a transition and can keep going.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// The accept state was reached.
    Accept,
    /// The machine stopped without accepting; [`Rejection::reason`] says why.
    Reject(Rejection),
}

/// Why the machine stopped without accepting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// No rule matches the current state and symbol.
    NoRule,
    /// The run used up its step budget (the given number of steps).
    StepLimit(usize),
}

/// Details of a rejection outcome: the configuration the machine stopped in, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub state: State,
    pub symbol: Symbol,
    pub head: usize,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::NoRule => write!(
                f,
                "no rule for state {} reading '{}' at position {}",
                self.state, self.symbol, self.head
            ),
            RejectReason::StepLimit(limit) => write!(
                f,
                "step limit of {} reached in state {} at position {}",
                limit, self.state, self.head
            ),
        }
    }
}

/// Which operand of the expression a decode error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    First,
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::First => f.write_str("first"),
            Operand::Second => f.write_str("second"),
        }
    }
}

/// Errors raised while extracting the two operands from the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input did not split into exactly two parts around `+`.
    #[error("Expected exactly one '+' separator, found {0}")]
    MissingSeparator(usize),
    /// An operand was empty or contained something other than binary digits.
    #[error("Invalid {position} operand: {token:?}")]
    InvalidOperand { position: Operand, token: String },
}

/// The sum of two decoded operands, in both renderings shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sum {
    pub binary: String,
    pub decimal: BigUint,
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result: {} (binary) = {} (decimal)",
            self.binary, self.decimal
        )
    }
}

/// Every way an evaluation can fail. The `Display` strings are the messages shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The caller submitted an empty expression; the recognizer was never run.
    #[error("Please enter a binary expression")]
    EmptyInput,
    /// The recognizer halted without reaching the accept state.
    #[error("Invalid binary expression")]
    Rejected(Rejection),
    /// The recognizer accepted but the operands could not be decoded.
    #[error("Error calculating the sum")]
    Decode(#[from] DecodeError),
}

/// Errors found while auditing a transition table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Initial state {0} has no outgoing rules")]
    InvalidStartState(State),
    #[error("Accept state {0} must not have outgoing rules")]
    AcceptNotTerminal(State),
    #[error("Accept state {0} is unreachable")]
    AcceptUnreachable(State),
    #[error("Unreachable states detected: {0:?}")]
    UnreachableStates(Vec<State>),
    #[error("Stay rules form a cycle through {0:?}")]
    StayCycle(Vec<State>),
    #[error("Rules reading blank form a cycle through {0:?}")]
    BlankCycle(Vec<State>),
}

/// Errors raised while loading expressions from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
