//! This module defines the `TuringMachine` struct, which runs a single-tape, single-head
//! recognizer against a fixed [`TransitionTable`]. It handles the machine's state, tape
//! operations, head movements, and execution of transition rules.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Direction, Halt, RejectReason, Rejection, State, Step, Symbol};
use tracing::{debug, trace, warn};

/// Computes the step budget for a run over `input`.
///
/// A table that passes [`crate::analyze`] spends at most `State::ALL.len()` steps on
/// any cell before moving right, and at most as many once it reads past the input, so
/// a run over `n` characters never needs more than `(n + 1) * State::ALL.len()` steps.
/// Runs over other tables are cut off there.
///
/// # Arguments
///
/// * `input` - The input the machine is about to run on.
pub fn step_limit(input: &str) -> usize {
    (input.chars().count() + 1) * State::ALL.len()
}

/// A single run of the recognizer.
///
/// The machine borrows its table and owns its tape, head and state. Every call to
/// [`TuringMachine::run`] starts from a fresh configuration, so one machine can be
/// reused without carrying anything over from a previous input.
#[derive(Debug, Clone)]
pub struct TuringMachine<'t> {
    table: &'t TransitionTable,
    state: State,
    tape: Tape,
    head: usize,
    step_count: usize,
    step_limit: usize,
}

impl<'t> TuringMachine<'t> {
    /// Creates a machine for `table` with `input` written on the tape and the head on cell 0.
    ///
    /// # Arguments
    ///
    /// * `table` - The transition table to run. It is borrowed, never modified.
    /// * `input` - The initial tape content, one cell per character.
    pub fn new(table: &'t TransitionTable, input: &str) -> Self {
        Self {
            table,
            state: table.initial_state(),
            tape: Tape::new(input),
            head: 0,
            step_count: 0,
            step_limit: step_limit(input),
        }
    }

    /// Executes a single step.
    ///
    /// Reads the symbol under the head (appending a blank cell when the head sits
    /// past the end), looks up the rule, writes, moves and changes state.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied and the accept state has not been reached.
    /// * `Step::Halt(Halt::Accept)` if the rule led into the accept state, or the machine
    ///   was already there.
    /// * `Step::Halt(Halt::Reject(_))` if no rule matches the current state and symbol.
    pub fn step(&mut self) -> Step {
        if self.is_accepted() {
            return Step::Halt(Halt::Accept);
        }

        self.tape.extend_to(self.head);
        let symbol = self.tape.read(self.head);

        let transition = match self.table.lookup(self.state, symbol) {
            Some(t) => *t,
            None => {
                return Step::Halt(Halt::Reject(Rejection {
                    state: self.state,
                    symbol,
                    head: self.head,
                    reason: RejectReason::NoRule,
                }));
            }
        };

        trace!(
            step = self.step_count,
            state = %self.state,
            read = %symbol,
            head = self.head,
            next = %transition.next_state,
            "applying rule"
        );

        self.tape.write(self.head, transition.write);
        self.state = transition.next_state;

        match transition.direction {
            Direction::Right => self.head += 1,
            Direction::Stay => {}
        }

        self.step_count += 1;

        if self.is_accepted() {
            Step::Halt(Halt::Accept)
        } else {
            Step::Continue
        }
    }

    /// Resets the machine to run on `input`: fresh tape, head on cell 0, initial state.
    pub fn reset(&mut self, input: &str) {
        self.state = self.table.initial_state();
        self.tape = Tape::new(input);
        self.head = 0;
        self.step_count = 0;
        self.step_limit = step_limit(input);
    }

    /// Runs the machine on `input` until it accepts, no rule applies, or the step
    /// budget from [`step_limit`] runs out.
    ///
    /// Always resets first.
    ///
    /// # Arguments
    ///
    /// * `input` - The new tape content.
    ///
    /// # Returns
    ///
    /// * `Halt::Accept` if the accept state was reached.
    /// * `Halt::Reject(_)` with `RejectReason::NoRule` if a lookup failed, or
    ///   `RejectReason::StepLimit` if the run was cut off.
    pub fn run(&mut self, input: &str) -> Halt {
        self.reset(input);

        let mut halt = None;
        while self.step_count < self.step_limit {
            if let Step::Halt(h) = self.step() {
                halt = Some(h);
                break;
            }
        }

        let halt = halt.unwrap_or_else(|| {
            warn!(limit = self.step_limit, state = %self.state, "step limit reached");
            Halt::Reject(Rejection {
                state: self.state,
                symbol: self.symbol(),
                head: self.head,
                reason: RejectReason::StepLimit(self.step_limit),
            })
        });

        match &halt {
            Halt::Accept => debug!(steps = self.step_count, "input accepted"),
            Halt::Reject(rejection) => {
                debug!(steps = self.step_count, %rejection, "input rejected")
            }
        }

        halt
    }

    /// Returns `true` once the machine is in the table's accept state.
    pub fn is_accepted(&self) -> bool {
        self.state == self.table.accept_state()
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the head position. It never decreases during a run.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the tape, including any blank cells appended past the input.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the symbol currently under the head, `Blank` past the end of the tape.
    pub fn symbol(&self) -> Symbol {
        self.tape.read(self.head)
    }

    /// Returns the total number of steps executed since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the step budget for the current run.
    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    /// Returns the transition table this machine runs.
    pub fn table(&self) -> &'t TransitionTable {
        self.table
    }
}
