use serde::{Deserialize, Serialize};

use crate::{
    domain::{FeedbackVector, Word},
    error::ProtocolError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRemaining {
    pub word: String,
    pub entropy: f64,
}

/// Authoritative session state as returned by every session endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub step: u32,
    pub current_guess: String,
    pub current_entropy: f64,
    pub remaining_count: u32,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub top_remaining: Option<TopRemaining>,
    #[serde(default)]
    pub remaining_sorted: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entropies: Vec<f64>,
    #[serde(default)]
    pub suggestion_index: usize,
}

impl SessionSnapshot {
    /// Parses the guess this snapshot asks the player to type.
    pub fn validate(&self) -> Result<Word, ProtocolError> {
        if self.step == 0 {
            return Err(ProtocolError::InvalidStep);
        }
        Word::parse(&self.current_guess)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReply {
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectRequest {
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub feedback: FeedbackVector,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarkState;

    #[test]
    fn decodes_fresh_session_payload() {
        let raw = r#"{
            "step": 1,
            "current_guess": "RAISE",
            "current_entropy": 5.91,
            "remaining_count": 2315,
            "suggestions": ["RAISE", "SOARE"],
            "top_remaining": null,
            "remaining_sorted": []
        }"#;
        let snapshot: SessionSnapshot = serde_json::from_str(raw).expect("decode");
        assert_eq!(snapshot.step, 1);
        assert_eq!(snapshot.suggestions.len(), 2);
        assert!(snapshot.top_remaining.is_none());
        assert_eq!(snapshot.validate().expect("guess").to_string(), "RAISE");
    }

    #[test]
    fn submit_reply_carries_optional_answer() {
        let raw = r#"{
            "step": 6,
            "current_guess": "CRANE",
            "current_entropy": 0.0,
            "remaining_count": 1,
            "suggestions": ["crane"],
            "entropies": [0.0],
            "suggestion_index": 0,
            "top_remaining": {"word": "crane", "entropy": 0.0},
            "remaining_sorted": ["CRANE"],
            "answer": "CRANE"
        }"#;
        let reply: SubmitReply = serde_json::from_str(raw).expect("decode");
        assert_eq!(reply.answer.as_deref(), Some("CRANE"));
        assert_eq!(reply.snapshot.remaining_count, 1);

        let unsolved = r#"{"step":2,"current_guess":"CLOTH","current_entropy":3.02,
            "remaining_count":42,"answer":null,"suggestions":["CLOTH","TORCH"]}"#;
        let reply: SubmitReply = serde_json::from_str(unsolved).expect("decode");
        assert!(reply.answer.is_none());
        assert!(reply.snapshot.remaining_sorted.is_empty());
    }

    #[test]
    fn rejects_snapshot_with_unusable_guess() {
        let snapshot = SessionSnapshot {
            step: 0,
            current_guess: "RAISE".into(),
            current_entropy: 1.0,
            remaining_count: 3,
            suggestions: Vec::new(),
            top_remaining: None,
            remaining_sorted: Vec::new(),
            entropies: Vec::new(),
            suggestion_index: 0,
        };
        assert_eq!(snapshot.validate(), Err(ProtocolError::InvalidStep));

        let snapshot = SessionSnapshot {
            step: 2,
            current_guess: "RAISED".into(),
            ..snapshot
        };
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn submit_request_encodes_feedback_as_integers() {
        let body = SubmitRequest {
            feedback: [
                MarkState::Unset,
                MarkState::Correct,
                MarkState::Present,
                MarkState::Unset,
                MarkState::Correct,
            ],
        };
        assert_eq!(
            serde_json::to_string(&body).expect("encode"),
            r#"{"feedback":[0,2,1,0,2]}"#
        );
    }
}
