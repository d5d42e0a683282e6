use std::time::Duration;

use async_trait::async_trait;
use shared::{
    domain::FeedbackVector,
    error::ProtocolError,
    protocol::{SessionSnapshot, SubmitReply},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("session service unreachable: {0}")]
    Transport(String),
    #[error("session service timed out after {0:?}")]
    Timeout(Duration),
    #[error("session service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed session service response: {0}")]
    Decode(String),
    #[error("invalid session state: {0}")]
    Protocol(#[from] ProtocolError),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InjectReply {
    Accepted(SessionSnapshot),
    Rejected { reason: Option<String> },
}

/// Remote solving session. Every call returns the full authoritative state.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn fetch_state(&self) -> Result<SessionSnapshot, ServiceError>;
    async fn new_game(&self) -> Result<SessionSnapshot, ServiceError>;
    async fn switch_suggestion(&self) -> Result<SessionSnapshot, ServiceError>;
    async fn inject_word(&self, word: &str) -> Result<InjectReply, ServiceError>;
    async fn submit_feedback(&self, feedback: FeedbackVector) -> Result<SubmitReply, ServiceError>;
}
