use thiserror::Error;

/// Failure classes surfaced by the remote message API client.
///
/// The client only classifies; recovery is the caller's job. The dispatch
/// handler reverts or holds local state, the reconciliation worker retries
/// through its polling cycle.
#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request rejected ({status}): {message}")]
    Client { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Protocol(String),
}

impl ApiFailure {
    /// Provider-supplied message, if one was parsed out of the response.
    /// Operator-facing text may include this and nothing else.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            ApiFailure::Client { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        ApiFailure::Transport(err.to_string())
    }
}
