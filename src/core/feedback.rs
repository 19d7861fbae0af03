use thiserror::Error;

use super::context::ContextError;

/// Why an action attempt did not complete.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    /// Client-side rejection; nothing was sent anywhere.
    #[error("{0}")]
    Invalid(String),
    /// A platform capability this action needs failed or is missing.
    #[error("{0}")]
    Capability(String),
    /// Network or backend failure; the underlying description is surfaced.
    #[error("{0}")]
    Service(String),
}

impl ActionError {
    /// A capability that is flatly absent on this device, by name.
    pub fn unavailable(capability: &str) -> Self {
        Self::Capability(format!("{} is not available on this device", capability))
    }
}

impl From<ContextError> for ActionError {
    fn from(e: ContextError) -> Self {
        Self::Invalid(e.to_string())
    }
}

/// User-facing banner shown after an action attempt. Nothing is fatal; every
/// failure ends in a dismissable banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success { message: String },
    Error { message: String, retryable: bool },
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    /// Only service failures offer a manual retry; validation and capability
    /// problems won't change on a second attempt.
    pub fn from_error(e: &ActionError) -> Self {
        Self::Error {
            message: e.to_string(),
            retryable: matches!(e, ActionError::Service(_)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } => message,
            Self::Error { message, .. } => message,
        }
    }
}
