//! The machine's tape: a growable, zero-indexed run of symbols that only ever extends to the right.

use crate::types::Symbol;
use std::fmt;

/// A single-track tape.
///
/// Cells below `len()` hold the input or whatever was written there. Reading at
/// `len()` yields [`Symbol::Blank`], and [`Tape::extend_to`] appends blank cells
/// before the head writes past the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
}

impl Tape {
    /// Creates a tape holding the characters of `input`, one cell per character.
    pub fn new(input: &str) -> Self {
        Self {
            cells: input.chars().map(Symbol::from).collect(),
        }
    }

    /// Returns the symbol at `position`, or `Blank` past the end of the tape.
    pub fn read(&self, position: usize) -> Symbol {
        self.cells.get(position).copied().unwrap_or(Symbol::Blank)
    }

    /// Grows the tape with blank cells until `position` is a valid index.
    pub fn extend_to(&mut self, position: usize) {
        if position >= self.cells.len() {
            self.cells.resize(position + 1, Symbol::Blank);
        }
    }

    /// Writes `symbol` at `position`, extending the tape first if needed.
    pub fn write(&mut self, position: usize, symbol: Symbol) {
        self.extend_to(position);
        self.cells[position] = symbol;
    }

    /// Returns the number of cells, including blanks appended past the input.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the tape has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns every cell of the tape in order.
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// Returns the non-blank content of the tape as a string.
    pub fn content(&self) -> String {
        self.cells
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Char(c) => Some(*c),
                Symbol::Blank => None,
            })
            .collect()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.cells {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
