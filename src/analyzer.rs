//! This module provides functions for auditing a transition table before it is run. This
//! includes checks for a usable start state, a terminal and reachable accept state, unreachable
//! states, and termination (no cycle of rules that leaves the head in place, and none that
//! walks over blanks forever).

use crate::table::TransitionTable;
use crate::types::{Direction, State, Symbol, TableError, Transition};
use std::collections::{HashMap, HashSet};

/// Analyzes a [`TransitionTable`] for structural errors.
///
/// Runs every check and returns the first error found, if any.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TableError)` describing the first violated rule.
pub fn analyze(table: &TransitionTable) -> Result<(), TableError> {
    let errors = [
        check_start_state,
        check_accept_terminal,
        check_accept_reachable,
        check_unreachable_states,
        check_stay_cycles,
        check_blank_cycles,
    ]
    .iter()
    .filter_map(|f| f(table).err())
    .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

/// Checks that the initial state has at least one outgoing rule.
fn check_start_state(table: &TransitionTable) -> Result<(), TableError> {
    let initial = table.initial_state();
    if table.rules().any(|(state, _, _)| state == initial) {
        Ok(())
    } else {
        Err(TableError::InvalidStartState(initial))
    }
}

/// Checks that the accept state has no outgoing rules, so the run halts there.
fn check_accept_terminal(table: &TransitionTable) -> Result<(), TableError> {
    let accept = table.accept_state();
    if table.rules().any(|(state, _, _)| state == accept) {
        return Err(TableError::AcceptNotTerminal(accept));
    }

    Ok(())
}

/// Collects every state reachable from the initial state.
fn reachable(table: &TransitionTable) -> HashSet<State> {
    let mut visited = HashSet::new();
    let mut queue = vec![table.initial_state()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (from, _, t) in table.rules() {
            if from == state && !visited.contains(&t.next_state) {
                queue.push(t.next_state);
            }
        }
    }

    visited
}

fn check_accept_reachable(table: &TransitionTable) -> Result<(), TableError> {
    if reachable(table).contains(&table.accept_state()) {
        Ok(())
    } else {
        Err(TableError::AcceptUnreachable(table.accept_state()))
    }
}

/// Checks that every state mentioned by the table can be reached from the initial state.
fn check_unreachable_states(table: &TransitionTable) -> Result<(), TableError> {
    let visited = reachable(table);
    let unreachable: Vec<State> = table
        .states()
        .into_iter()
        .filter(|state| !visited.contains(state))
        .collect();

    if !unreachable.is_empty() {
        return Err(TableError::UnreachableStates(unreachable));
    }

    Ok(())
}

/// Checks that `Stay` rules never form a cycle.
///
/// Without one, the machine leaves every cell of the input within
/// `State::ALL.len()` steps.
fn check_stay_cycles(table: &TransitionTable) -> Result<(), TableError> {
    let edges = rule_graph(table, |_, t| t.direction == Direction::Stay);
    find_cycle(&edges).map_or(Ok(()), |cycle| Err(TableError::StayCycle(cycle)))
}

/// Checks that rules reading the blank never form a cycle.
///
/// Past the end of the input the head only ever reads blanks, so such a cycle
/// would walk right forever.
fn check_blank_cycles(table: &TransitionTable) -> Result<(), TableError> {
    let edges = rule_graph(table, |read, _| read.is_blank());
    find_cycle(&edges).map_or(Ok(()), |cycle| Err(TableError::BlankCycle(cycle)))
}

/// Builds the state graph formed by the rules that satisfy `keep`.
fn rule_graph(
    table: &TransitionTable,
    keep: impl Fn(Symbol, &Transition) -> bool,
) -> HashMap<State, Vec<State>> {
    let mut edges: HashMap<State, Vec<State>> = HashMap::new();
    for (from, read, t) in table.rules() {
        if keep(read, t) {
            edges.entry(from).or_default().push(t.next_state);
        }
    }
    edges
}

/// Returns the sorted states of some cycle in `edges`, if there is one.
fn find_cycle(edges: &HashMap<State, Vec<State>>) -> Option<Vec<State>> {
    let mut starts: Vec<State> = edges.keys().copied().collect();
    starts.sort();

    for start in starts {
        let mut path = vec![start];
        let mut stack = vec![(start, 0usize)];

        // Depth-first walk looking for a way back to `start`
        while let Some((state, index)) = stack.pop() {
            let next = edges.get(&state).and_then(|targets| targets.get(index));
            match next {
                Some(&next) => {
                    stack.push((state, index + 1));
                    if next == start {
                        let mut cycle = path.clone();
                        cycle.sort();
                        cycle.dedup();
                        return Some(cycle);
                    }
                    if !path.contains(&next) {
                        path.push(next);
                        stack.push((next, 0));
                    }
                }
                None => {
                    path.pop();
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_pass() {
        assert_eq!(analyze(&TransitionTable::standard()), Ok(()));
        assert_eq!(analyze(&TransitionTable::general()), Ok(()));
    }

    #[test]
    fn test_start_state_without_rules() {
        let table = TransitionTable::new(
            State::S1,
            State::Accept,
            &[(State::S0, Symbol::ONE, State::Accept, Symbol::ONE, Direction::Right)],
        );

        assert_eq!(
            check_start_state(&table),
            Err(TableError::InvalidStartState(State::S1))
        );
    }

    #[test]
    fn test_accept_with_outgoing_rule() {
        let table = TransitionTable::new(
            State::S0,
            State::Accept,
            &[
                (State::S0, Symbol::ONE, State::Accept, Symbol::ONE, Direction::Right),
                (State::Accept, Symbol::ONE, State::S0, Symbol::ONE, Direction::Right),
            ],
        );

        assert_eq!(
            analyze(&table),
            Err(TableError::AcceptNotTerminal(State::Accept))
        );
    }

    #[test]
    fn test_accept_unreachable_and_orphan_states() {
        let table = TransitionTable::new(
            State::S0,
            State::Accept,
            &[
                (State::S0, Symbol::ONE, State::S0, Symbol::ONE, Direction::Right),
                (State::S2, Symbol::ONE, State::S3, Symbol::ONE, Direction::Right),
            ],
        );

        assert_eq!(
            check_accept_reachable(&table),
            Err(TableError::AcceptUnreachable(State::Accept))
        );
        assert_eq!(
            check_unreachable_states(&table),
            Err(TableError::UnreachableStates(vec![
                State::S2,
                State::S3,
                State::Accept
            ]))
        );
    }

    #[test]
    fn test_stay_cycle_detected() {
        let table = TransitionTable::new(
            State::S0,
            State::Accept,
            &[
                (State::S0, Symbol::ONE, State::S1, Symbol::ONE, Direction::Stay),
                (State::S1, Symbol::ONE, State::S0, Symbol::ONE, Direction::Stay),
                (State::S1, Symbol::ZERO, State::Accept, Symbol::ZERO, Direction::Stay),
            ],
        );

        assert_eq!(
            check_stay_cycles(&table),
            Err(TableError::StayCycle(vec![State::S0, State::S1]))
        );
    }

    #[test]
    fn test_stay_self_loop_detected() {
        let table = TransitionTable::new(
            State::S0,
            State::Accept,
            &[
                (State::S0, Symbol::Blank, State::S0, Symbol::Blank, Direction::Stay),
                (State::S0, Symbol::ONE, State::Accept, Symbol::ONE, Direction::Right),
            ],
        );

        assert_eq!(analyze(&table), Err(TableError::StayCycle(vec![State::S0])));
    }

    #[test]
    fn test_blank_cycle_detected() {
        let table = TransitionTable::new(
            State::S0,
            State::Accept,
            &[
                (State::S0, Symbol::Blank, State::S1, Symbol::Blank, Direction::Right),
                (State::S1, Symbol::Blank, State::S0, Symbol::Blank, Direction::Right),
                (State::S1, Symbol::ONE, State::Accept, Symbol::ONE, Direction::Right),
            ],
        );

        assert_eq!(
            analyze(&table),
            Err(TableError::BlankCycle(vec![State::S0, State::S1]))
        );
    }

    #[test]
    fn test_blank_rule_without_cycle_allowed() {
        // q4 reads a blank on its way to accept
        let table = TransitionTable::standard();
        assert_eq!(check_blank_cycles(&table), Ok(()));
        assert_eq!(check_stay_cycles(&table), Ok(()));
    }
}
