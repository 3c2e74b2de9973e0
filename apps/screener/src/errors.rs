use std::fmt;

use thiserror::Error;

/// Fallback shown when the server fails without a `message` field.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "Execution failed";
pub const MALFORMED_BODY_MESSAGE: &str = "malformed response body";

/// The coarse failure category, used by callers that apply policy per kind
/// (the aggregator treats every kind of ranking failure the same way).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Api,
    Decode,
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "TRANSPORT_ERROR",
            ErrorKind::Api => "API_ERROR",
            ErrorKind::Decode => "DECODE_ERROR",
            ErrorKind::InvalidInput => "INVALID_INPUT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-level error type.
/// Every repository call returns `Result<T, ClientError>` and propagates it unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Api { .. } => ErrorKind::Api,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Text for the transient error notification.
    /// API errors carry the server message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(msg) => format!("Connection issue: {msg}"),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::InvalidInput(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Transport(format!("request timed out: {e}"))
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::InvalidInput(format!("could not read file: {e}"))
    }
}
