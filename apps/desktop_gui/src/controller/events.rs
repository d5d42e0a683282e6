//! UI/backend events and error modeling for the desktop GUI controller.

use client_core::{ActionOutcome, IgnoreReason, ServiceError};

pub enum UiEvent {
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Restore,
    NewGame,
    Switch,
    Inject,
    Submit,
    General,
}

impl UiErrorContext {
    pub fn for_command(name: &str) -> Self {
        match name {
            "restore" => UiErrorContext::Restore,
            "new_game" => UiErrorContext::NewGame,
            "switch" => UiErrorContext::Switch,
            "inject" => UiErrorContext::Inject,
            "submit" => UiErrorContext::Submit,
            _ => UiErrorContext::General,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("rejected")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_service_error(context: UiErrorContext, err: &ServiceError) -> Self {
        let category = match err {
            ServiceError::Transport(_) | ServiceError::Timeout(_) | ServiceError::Status { .. } => {
                UiErrorCategory::Transport
            }
            ServiceError::Decode(_) | ServiceError::Protocol(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Status-line event for a finished command, if it has anything to say.
pub fn describe_outcome(command: &str, outcome: &ActionOutcome) -> Option<UiEvent> {
    let context = UiErrorContext::for_command(command);
    match outcome {
        ActionOutcome::Applied => None,
        ActionOutcome::Solved { answer } => Some(UiEvent::Info(format!("Solved: {answer}"))),
        ActionOutcome::Rejected { reason } => Some(UiEvent::Error(UiError {
            category: UiErrorCategory::Validation,
            context,
            message: format!(
                "Word rejected: {}",
                reason.as_deref().unwrap_or("not usable")
            ),
        })),
        ActionOutcome::Ignored(IgnoreReason::Busy(op)) => {
            Some(UiEvent::Info(format!("Waiting for {op} to finish")))
        }
        ActionOutcome::Ignored(IgnoreReason::Stale) => None,
        ActionOutcome::Ignored(reason) => {
            tracing::debug!(command, ?reason, "command ignored");
            None
        }
        ActionOutcome::Failed(err) => Some(UiEvent::Error(UiError::from_service_error(context, err))),
    }
}
