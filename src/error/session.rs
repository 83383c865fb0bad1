//! Errors raised while running one conversation request.
//!
//! None of these reach the caller of `send_message`: the session records
//! the [`ErrorKind`] for diagnostics and raises its `is_error` flag.

use thiserror::Error;

use crate::sse::SseParseError;
use crate::traits::HttpError;

/// Failure of a single request/response cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The query could not be serialised into a request body.
    #[error("Failed to encode request: {0}")]
    EncodeRequest(String),

    /// Server answered with a non-2xx status.
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    /// Request could not be sent or the response never arrived.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// Response had no body to stream.
    #[error("Response carried no event stream")]
    NoStream,

    /// Reading the body failed part-way through.
    #[error("Stream read failed: {0}")]
    StreamRead(String),

    /// A frame payload was missing or was not the expected JSON.
    #[error("Malformed '{event}' frame: {message}")]
    MalformedFrame { event: String, message: String },
}

impl SessionError {
    /// Get the diagnostic kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::EncodeRequest(_) => ErrorKind::EncodeRequest,
            SessionError::RequestFailed { .. } => ErrorKind::RequestFailed,
            SessionError::Transport(_) => ErrorKind::Transport,
            SessionError::NoStream => ErrorKind::NoStream,
            SessionError::StreamRead(_) => ErrorKind::StreamRead,
            SessionError::MalformedFrame { .. } => ErrorKind::MalformedFrame,
        }
    }

    /// Get an error code for logging/debugging.
    pub fn error_code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::EncodeRequest(err.to_string())
    }
}

impl From<SseParseError> for SessionError {
    fn from(err: SseParseError) -> Self {
        SessionError::MalformedFrame {
            event: err.event_type().to_string(),
            message: err.to_string(),
        }
    }
}

/// Copyable classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EncodeRequest,
    RequestFailed,
    Transport,
    NoStream,
    StreamRead,
    MalformedFrame,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::EncodeRequest => "E_REQUEST_ENCODE",
            ErrorKind::RequestFailed => "E_REQUEST_STATUS",
            ErrorKind::Transport => "E_REQUEST_TRANSPORT",
            ErrorKind::NoStream => "E_STREAM_MISSING",
            ErrorKind::StreamRead => "E_STREAM_READ",
            ErrorKind::MalformedFrame => "E_STREAM_FRAME",
        }
    }
}
