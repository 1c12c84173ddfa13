//! Errors returned by [`EngineClient`](super::EngineClient).

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors from engine requests.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Another request is still running on the same client. Nothing was sent.
    #[error("a request is already in flight on this client")]
    Concurrency,

    /// The job did not validate. Nothing was sent.
    #[error("job is not valid ({} problem(s))", .0.len())]
    InvalidJob(Vec<ValidationError>),

    #[error("failed to connect to engine at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("engine I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("unexpected engine response: {0}")]
    Protocol(String),

    /// The engine closed the connection before sending what was expected.
    #[error("engine closed the connection")]
    ConnectionClosed,
}

impl ClientError {
    /// Validation problems, if this is [`ClientError::InvalidJob`].
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            ClientError::InvalidJob(errors) => Some(errors),
            _ => None,
        }
    }

    /// True for failures reaching or talking to the engine.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Connect { .. }
                | ClientError::Io(_)
                | ClientError::Timeout { .. }
                | ClientError::ConnectionClosed
        )
    }
}
