//! Observation error types.

use thiserror::Error;

/// Coarse classification used when deciding whether a failure is soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    DecodeFailure,
    ContractViolation,
}

#[derive(Error, Debug)]
pub enum ObservationError {
    /// Connection failure, timeout, or non-2xx status after the last attempt.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode failure: {0}")]
    Decode(String),

    /// A key the provider must always send was missing or had the wrong type.
    #[error("Contract violation: {0}")]
    Contract(String),
}

impl ObservationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::TransportFailure,
            Self::Decode(_) => ErrorKind::DecodeFailure,
            Self::Contract(_) => ErrorKind::ContractViolation,
        }
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) if e.is_timeout() => {
                "The weather service did not respond in time.".to_string()
            }
            Self::Transport(e) => match e.status() {
                Some(status) => format!("The weather service returned an error ({}).", status),
                None => "Unable to reach the weather service. Check your connection.".to_string(),
            },
            Self::Decode(_) => "The weather service sent data that could not be read.".to_string(),
            Self::Contract(_) => "The weather service sent incomplete data.".to_string(),
        }
    }
}
