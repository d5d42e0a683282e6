//! In-memory 6x5 tile matrix with a single editable row.

use shared::domain::{FeedbackVector, MarkState, Word, COLS, ROWS};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("row {0} is outside 0..6")]
    RowOutOfRange(usize),
    #[error("expected 5 letters, got {0}")]
    LetterCount(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub letter: Option<char>,
    pub mark: MarkState,
}

pub type Row = [Tile; COLS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; ROWS],
    current_row: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            rows: [[Tile::default(); COLS]; ROWS],
            current_row: 0,
        }
    }

    /// Drops every tile and starts over at row 0.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn rows(&self) -> &[Row; ROWS] {
        &self.rows
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn is_locked(&self, row: usize) -> bool {
        row < self.current_row
    }

    /// Advances the tile's mark. Returns `false` (and changes nothing) unless
    /// `row` is the active row.
    pub fn cycle_mark(&mut self, row: usize, col: usize) -> bool {
        if row != self.current_row || col >= COLS {
            return false;
        }
        let Some(tile) = self.rows.get_mut(row).map(|r| &mut r[col]) else {
            return false;
        };
        tile.mark = tile.mark.next();
        true
    }

    /// Overwrites a row's letters and sets every tile to `mark`.
    pub fn set_row_letters(
        &mut self,
        row: usize,
        letters: &[char],
        mark: MarkState,
    ) -> Result<(), GridError> {
        if letters.len() != COLS {
            return Err(GridError::LetterCount(letters.len()));
        }
        let target = self
            .rows
            .get_mut(row)
            .ok_or(GridError::RowOutOfRange(row))?;
        for (tile, letter) in target.iter_mut().zip(letters) {
            tile.letter = Some(*letter);
            tile.mark = mark;
        }
        Ok(())
    }

    pub fn set_row_word(&mut self, row: usize, word: &Word, mark: MarkState) -> Result<(), GridError> {
        self.set_row_letters(row, &word.letters(), mark)
    }

    /// Marks of `row` in column order; all `Unset` for an out-of-range row.
    pub fn feedback_vector(&self, row: usize) -> FeedbackVector {
        let mut feedback = [MarkState::Unset; COLS];
        if let Some(source) = self.rows.get(row) {
            for (slot, tile) in feedback.iter_mut().zip(source) {
                *slot = tile.mark;
            }
        }
        feedback
    }

    /// Moves the active row. `ROWS` is accepted and locks the whole grid.
    pub fn advance_current_row(&mut self, new_index: usize) -> Result<(), GridError> {
        if new_index > ROWS {
            return Err(GridError::RowOutOfRange(new_index));
        }
        self.current_row = new_index;
        Ok(())
    }

    pub fn row_word(&self, row: usize) -> Option<String> {
        let source = self.rows.get(row)?;
        source.iter().map(|tile| tile.letter).collect()
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
