use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Number of guess attempts in one game.
pub const ROWS: usize = 6;
/// Letters per word.
pub const COLS: usize = 5;

/// Per-letter feedback, sent on the wire as `0`, `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MarkState {
    #[default]
    Unset = 0,
    Present = 1,
    Correct = 2,
}

impl MarkState {
    pub const ALL: [MarkState; 3] = [MarkState::Unset, MarkState::Present, MarkState::Correct];

    /// Unset -> Present -> Correct -> Unset.
    pub fn next(self) -> Self {
        match self {
            MarkState::Unset => MarkState::Present,
            MarkState::Present => MarkState::Correct,
            MarkState::Correct => MarkState::Unset,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<MarkState> for u8 {
    fn from(value: MarkState) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for MarkState {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MarkState::Unset),
            1 => Ok(MarkState::Present),
            2 => Ok(MarkState::Correct),
            other => Err(ProtocolError::MarkValue(other)),
        }
    }
}

pub type FeedbackVector = [MarkState; COLS];

/// Parses a feedback string such as `"20010"`.
pub fn parse_feedback(raw: &str) -> Result<FeedbackVector, ProtocolError> {
    let raw = raw.trim();
    if raw.chars().count() != COLS {
        return Err(ProtocolError::FeedbackLength(raw.chars().count()));
    }
    let mut feedback = [MarkState::Unset; COLS];
    for (slot, ch) in feedback.iter_mut().zip(raw.chars()) {
        let digit = ch
            .to_digit(10)
            .ok_or(ProtocolError::FeedbackCharacter(ch))?;
        *slot = MarkState::try_from(digit as u8)?;
    }
    Ok(feedback)
}

/// A five-letter ASCII word, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word([char; COLS]);

impl Word {
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let trimmed = raw.trim();
        let count = trimmed.chars().count();
        if count != COLS {
            return Err(ProtocolError::WordLength {
                word: trimmed.to_string(),
                len: count,
            });
        }
        let mut letters = [' '; COLS];
        for (slot, ch) in letters.iter_mut().zip(trimmed.chars()) {
            if !ch.is_ascii_alphabetic() {
                return Err(ProtocolError::NonAlphabetic(trimmed.to_string()));
            }
            *slot = ch.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    pub fn letters(&self) -> [char; COLS] {
        self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0 {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
