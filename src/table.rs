//! Fixed transition tables for the recognizer.
//!
//! A table is plain data keyed by `(state, symbol)`, built once and never mutated.
//! Two tables ship with the crate, selected through [`Grammar`]:
//!
//! - [`Grammar::Standard`] accepts exactly `"10+" (0|1)* "="`. The first operand
//!   must be the literal `10`.
//! - [`Grammar::General`] accepts `(0|1)+ "+" (0|1)* "="`, i.e. any binary first
//!   operand. It is opt-in and changes which inputs are accepted.

use crate::types::{Direction, State, Symbol, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

lazy_static::lazy_static! {
    /// The table used by [`Grammar::Standard`].
    pub static ref STANDARD_TABLE: TransitionTable = TransitionTable::standard();
    /// The table used by [`Grammar::General`].
    pub static ref GENERAL_TABLE: TransitionTable = TransitionTable::general();
}

/// Selects which transition table the recognizer runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grammar {
    /// First operand must be the literal `10`.
    #[default]
    Standard,
    /// First operand may be any non-empty binary literal.
    General,
}

impl Grammar {
    /// Returns the shared table for this grammar.
    pub fn table(&self) -> &'static TransitionTable {
        match self {
            Grammar::Standard => &STANDARD_TABLE,
            Grammar::General => &GENERAL_TABLE,
        }
    }
}

/// An immutable mapping from `(state, symbol read)` to a [`Transition`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    initial_state: State,
    accept_state: State,
    rules: HashMap<(State, Symbol), Transition>,
    // Insertion order, for stable rendering
    order: Vec<(State, Symbol)>,
}

impl TransitionTable {
    /// Builds a table from `(state, read, next_state, write, direction)` rows.
    ///
    /// A later row with the same `(state, read)` key replaces an earlier one. The rows
    /// are not audited here; run [`crate::analyze`] on tables built from untrusted rows.
    /// [`crate::TuringMachine::run`] cuts off runs that do not halt either way.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The state every run starts in.
    /// * `accept_state` - The only state that ends a run as an acceptance.
    /// * `rows` - The rules, in the order they should be rendered.
    pub fn new(
        initial_state: State,
        accept_state: State,
        rows: &[(State, Symbol, State, Symbol, Direction)],
    ) -> Self {
        let mut rules = HashMap::with_capacity(rows.len());
        let mut order = Vec::with_capacity(rows.len());

        for &(state, read, next_state, write, direction) in rows {
            let previous = rules.insert(
                (state, read),
                Transition {
                    next_state,
                    write,
                    direction,
                },
            );
            if previous.is_none() {
                order.push((state, read));
            }
        }

        Self {
            initial_state,
            accept_state,
            rules,
            order,
        }
    }

    /// The `10+...=` recognizer.
    pub fn standard() -> Self {
        use Direction::{Right, Stay};
        use State::*;

        Self::new(
            S0,
            Accept,
            &[
                (S0, Symbol::ONE, S1, Symbol::ONE, Right),
                (S1, Symbol::ZERO, S2, Symbol::ZERO, Right),
                (S2, Symbol::PLUS, S3, Symbol::PLUS, Right),
                (S3, Symbol::ZERO, S3, Symbol::ZERO, Right),
                (S3, Symbol::ONE, S3, Symbol::ONE, Right),
                (S3, Symbol::EQUALS, S4, Symbol::EQUALS, Right),
                (S4, Symbol::Blank, Accept, Symbol::Blank, Stay),
            ],
        )
    }

    /// The recognizer that accepts any binary first operand.
    ///
    /// `q1` loops over the first operand's digits; `q2` is unused.
    pub fn general() -> Self {
        use Direction::{Right, Stay};
        use State::*;

        Self::new(
            S0,
            Accept,
            &[
                (S0, Symbol::ZERO, S1, Symbol::ZERO, Right),
                (S0, Symbol::ONE, S1, Symbol::ONE, Right),
                (S1, Symbol::ZERO, S1, Symbol::ZERO, Right),
                (S1, Symbol::ONE, S1, Symbol::ONE, Right),
                (S1, Symbol::PLUS, S3, Symbol::PLUS, Right),
                (S3, Symbol::ZERO, S3, Symbol::ZERO, Right),
                (S3, Symbol::ONE, S3, Symbol::ONE, Right),
                (S3, Symbol::EQUALS, S4, Symbol::EQUALS, Right),
                (S4, Symbol::Blank, Accept, Symbol::Blank, Stay),
            ],
        )
    }

    /// Looks up the rule for `state` reading `symbol`.
    ///
    /// # Returns
    ///
    /// * `Some(&Transition)` if a rule exists.
    /// * `None` if the machine must halt and reject.
    pub fn lookup(&self, state: State, symbol: Symbol) -> Option<&Transition> {
        self.rules.get(&(state, symbol))
    }

    /// Returns the state every run starts in.
    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    /// Returns the state that ends a run as an acceptance.
    pub fn accept_state(&self) -> State {
        self.accept_state
    }

    /// Iterates over the rules in the order they were defined.
    pub fn rules(&self) -> impl Iterator<Item = (State, Symbol, &Transition)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.rules.get(key).map(|t| (key.0, key.1, t)))
    }

    /// Returns the states that have at least one outgoing rule or are the target of one,
    /// plus the initial and accept states.
    pub fn states(&self) -> Vec<State> {
        let mut states: Vec<State> = self
            .rules()
            .flat_map(|(state, _, t)| [state, t.next_state])
            .chain([self.initial_state, self.accept_state])
            .collect();
        states.sort();
        states.dedup();
        states
    }

    /// Returns the number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules, so every run rejects on its first step.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (state, read, t) in self.rules() {
            writeln!(
                f,
                "{}, {} -> {}, {}, {}",
                state, read, t.next_state, t.write, t.direction
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_contents() {
        let table = TransitionTable::standard();

        assert_eq!(table.len(), 7);
        assert_eq!(table.initial_state(), State::S0);
        assert_eq!(table.accept_state(), State::Accept);

        let t = table.lookup(State::S4, Symbol::Blank).unwrap();
        assert_eq!(t.next_state, State::Accept);
        assert_eq!(t.write, Symbol::Blank);
        assert_eq!(t.direction, Direction::Stay);

        // The first operand is pinned to "10"
        assert!(table.lookup(State::S0, Symbol::ZERO).is_none());
        assert!(table.lookup(State::S1, Symbol::ONE).is_none());
        assert!(table.lookup(State::Accept, Symbol::Blank).is_none());
    }

    #[test]
    fn test_every_rule_writes_back_what_it_reads() {
        for table in [TransitionTable::standard(), TransitionTable::general()] {
            for (_, read, t) in table.rules() {
                assert_eq!(read, t.write);
            }
        }
    }

    #[test]
    fn test_table_display() {
        let rendered = TransitionTable::standard().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "q0, 1 -> q1, 1, R");
        assert_eq!(lines[6], "q4, _ -> q5, _, S");
    }

    #[test]
    fn test_duplicate_rows_replace() {
        let table = TransitionTable::new(
            State::S0,
            State::Accept,
            &[
                (State::S0, Symbol::ONE, State::S1, Symbol::ONE, Direction::Right),
                (State::S0, Symbol::ONE, State::Accept, Symbol::ONE, Direction::Stay),
            ],
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table.rules().count(), 1);
        assert_eq!(
            table.lookup(State::S0, Symbol::ONE).unwrap().next_state,
            State::Accept
        );
    }

    #[test]
    fn test_grammar_selects_shared_table() {
        assert_eq!(Grammar::default(), Grammar::Standard);
        assert_eq!(*Grammar::Standard.table(), TransitionTable::standard());
        assert_eq!(*Grammar::General.table(), TransitionTable::general());
        assert_eq!(TransitionTable::standard().states(), State::ALL.to_vec());
    }
}
