//! This module defines the `Tape`, a sparse, two-way unbounded tape.
//!
//! Only cells holding a non-blank symbol are stored. Reading an absent cell yields the
//! blank symbol, and writing the blank symbol removes the cell, so memory grows with the
//! number of visited non-blank cells rather than with the distance the head travels.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::Direction;

/// Cells shown on each side of the written span by the `Display` view.
const DISPLAY_PADDING: i64 = 3;

/// A single, two-way unbounded tape with one read/write head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: BTreeMap<i64, char>,
    head: i64,
    blank: char,
}

impl Tape {
    /// Creates an all-blank tape with the head at position 0.
    pub fn new(blank: char) -> Self {
        Self {
            cells: BTreeMap::new(),
            head: 0,
            blank,
        }
    }

    /// Replaces the tape content with `input` at positions `0..input.len()` and moves
    /// the head back to 0.
    pub fn load(&mut self, input: &str) {
        self.clear();
        for (i, symbol) in input.chars().enumerate() {
            self.head = i as i64;
            self.write(symbol);
        }
        self.head = 0;
    }

    /// Erases every cell and moves the head back to 0.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.head = 0;
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.get(self.head)
    }

    /// Returns the symbol at an arbitrary position.
    pub fn get(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` under the head. Writing the blank symbol frees the cell.
    pub fn write(&mut self, symbol: char) {
        if symbol == self.blank {
            self.cells.remove(&self.head);
        } else {
            self.cells.insert(self.head, symbol);
        }
    }

    /// Moves the head one cell in `direction`.
    pub fn shift(&mut self, direction: Direction) {
        self.head += direction.offset();
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    /// Returns the number of non-blank cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the leftmost and rightmost non-blank positions, if any.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let (&min, _) = self.cells.first_key_value()?;
        let (&max, _) = self.cells.last_key_value()?;
        Some((min, max))
    }

    /// Returns the written portion of the tape, from the leftmost to the rightmost
    /// non-blank cell. Blank cells in between are rendered as the blank symbol.
    ///
    /// An all-blank tape yields an empty string.
    pub fn contents(&self) -> String {
        match self.bounds() {
            Some((min, max)) => (min..=max).map(|i| self.get(i)).collect(),
            None => String::new(),
        }
    }

    /// Renders `radius` cells on each side of the head, marking the head cell as `[x]`.
    pub fn window(&self, radius: usize) -> String {
        let radius = radius as i64;
        self.render(self.head - radius, self.head + radius)
    }

    fn render(&self, start: i64, end: i64) -> String {
        (start..=end)
            .map(|i| {
                let symbol = self.get(i);
                if i == self.head {
                    format!("[{symbol}]")
                } else {
                    symbol.to_string()
                }
            })
            .collect()
    }
}

impl fmt::Display for Tape {
    /// Shows the written span widened to include the head, padded with blanks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.bounds().unwrap_or((self.head, self.head));
        let start = min.min(self.head) - DISPLAY_PADDING;
        let end = max.max(self.head) + DISPLAY_PADDING;

        write!(f, "{}", self.render(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_cells_are_blank() {
        let tape = Tape::new('_');

        assert_eq!(tape.read(), '_');
        assert_eq!(tape.get(-1000), '_');
        assert_eq!(tape.get(1000), '_');
        assert!(tape.is_empty());
        assert_eq!(tape.contents(), "");
    }

    #[test]
    fn test_load_places_input_from_zero() {
        let mut tape = Tape::new('_');
        tape.shift(Direction::Left);
        tape.load("abc");

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.get(0), 'a');
        assert_eq!(tape.get(2), 'c');
        assert_eq!(tape.bounds(), Some((0, 2)));
        assert_eq!(tape.contents(), "abc");
    }

    #[test]
    fn test_writing_blank_removes_cell() {
        let mut tape = Tape::new('_');
        tape.load("ab");
        tape.write('_');

        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(), '_');
        assert_eq!(tape.contents(), "b");
    }

    #[test]
    fn test_head_moves_into_negative_positions() {
        let mut tape = Tape::new('_');
        tape.shift(Direction::Left);
        tape.shift(Direction::Left);
        tape.write('x');
        tape.shift(Direction::Stay);

        assert_eq!(tape.head(), -2);
        assert_eq!(tape.get(-2), 'x');
        assert_eq!(tape.bounds(), Some((-2, -2)));
    }

    #[test]
    fn test_contents_keeps_inner_blanks() {
        let mut tape = Tape::new('_');
        tape.load("a");
        tape.shift(Direction::Right);
        tape.shift(Direction::Right);
        tape.write('b');

        assert_eq!(tape.contents(), "a_b");
    }

    #[test]
    fn test_window_marks_head() {
        let mut tape = Tape::new('_');
        tape.load("abc");
        tape.shift(Direction::Right);

        assert_eq!(tape.window(1), "a[b]c");
        assert_eq!(tape.window(0), "[b]");
    }

    #[test]
    fn test_display_pads_written_span() {
        let mut tape = Tape::new('_');
        tape.load("01");

        assert_eq!(tape.to_string(), "___[0]1___");

        tape.clear();
        assert_eq!(tape.to_string(), "___[_]___");
    }
}
