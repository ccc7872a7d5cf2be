//! Error types shared between the host and the add-in

use std::time::Duration;

use thiserror::Error;

use crate::types::{LifecycleEvent, LifecycleState};

/// Failures reported by the host's data API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The host answered but refused the request
    #[error("Host rejected request: {0}")]
    Rejected(String),

    /// The request never got an answer
    #[error("Host transport error: {0}")]
    Transport(String),

    /// The answer could not be read as the expected record
    #[error("Unexpected host response: {0}")]
    Decode(String),
}

impl HostError {
    /// Create a rejection error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors an add-in can return to the host
#[derive(Error, Debug)]
pub enum AddInError {
    /// A lifecycle callback arrived out of order
    #[error("Invalid lifecycle transition: {event:?} while {from:?}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },

    /// Host API failure that could not be absorbed
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse error in the host-supplied configuration
    #[error("TOML error: {0}")]
    Toml(String),

    /// Shutdown did not resolve inside the host's budget
    #[error("Shutdown exceeded its {0:?} budget")]
    ShutdownTimedOut(Duration),
}

impl AddInError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        assert_eq!(
            HostError::rejected("InvalidUserException").to_string(),
            "Host rejected request: InvalidUserException"
        );
        assert_eq!(
            HostError::transport("offline").to_string(),
            "Host transport error: offline"
        );
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let host_err: HostError = json_err.into();
        assert!(matches!(host_err, HostError::Decode(_)));
    }

    #[test]
    fn test_invalid_transition_names_state_and_event() {
        let err = AddInError::InvalidTransition {
            from: LifecycleState::Unstarted,
            event: LifecycleEvent::Focus,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unstarted"));
        assert!(msg.contains("Focus"));
    }

    #[test]
    fn test_host_error_conversion() {
        let err: AddInError = HostError::transport("timeout").into();
        assert!(matches!(err, AddInError::Host(HostError::Transport(_))));
    }

    #[test]
    fn test_shutdown_timeout_display() {
        let err = AddInError::ShutdownTimedOut(Duration::from_secs(15));
        assert_eq!(err.to_string(), "Shutdown exceeded its 15s budget");
    }
}
