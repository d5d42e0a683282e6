use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for values crossing the session protocol boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("word '{word}' has {len} letters, expected 5")]
    WordLength { word: String, len: usize },
    #[error("word '{0}' contains non-alphabetic characters")]
    NonAlphabetic(String),
    #[error("mark value {0} is outside 0..=2")]
    MarkValue(u8),
    #[error("feedback has {0} marks, expected 5")]
    FeedbackLength(usize),
    #[error("feedback character '{0}' is not a digit")]
    FeedbackCharacter(char),
    #[error("step must be at least 1")]
    InvalidStep,
}

/// Error body returned by the session service, e.g. `{"ok": false, "error": "Invalid word"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
