//! Error types for the history actor.

use thiserror::Error;

/// Errors that can occur while loading, recording or persisting history.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HistoryError {
    /// The history file could not be read or written.
    #[error("Persistence error on {path}: {message}")]
    Persistence { path: String, message: String },

    /// A row of the history file could not be understood.
    #[error("Malformed history at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Every order id has been handed out.
    #[error("No order ids left after {0}")]
    IdsExhausted(crate::model::OrderId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl HistoryError {
    pub(crate) fn persistence(path: &std::path::Path, error: std::io::Error) -> Self {
        HistoryError::Persistence {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<String> for HistoryError {
    fn from(msg: String) -> Self {
        HistoryError::ActorCommunicationError(msg)
    }
}
