use thiserror::Error;

/// Failures reported by a [`RemoteUserService`](crate::remote::RemoteUserService).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        /// The `error` field of the response body, when the server sent one.
        message: Option<String>,
    },
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// The server's structured error message, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            RemoteError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Errors surfaced to holders of a [`UserListClient`](crate::clients::UserListClient).
///
/// Remote failures never appear here; the store turns them into notices.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
