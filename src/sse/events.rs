//! SSE record and frame type definitions.

use std::fmt;
use thiserror::Error;

/// Event name carrying a progress update.
pub const STATUS_EVENT: &str = "status_message";
/// Event name carrying a content delta.
pub const CHUNK_EVENT: &str = "message_chunk";
/// Event name announcing the end of the response.
pub const CLOSE_EVENT: &str = "close";

/// Kind of a recognised protocol frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Progress update: `{content, thread_id}`
    Status,
    /// Content delta: `{content}`
    Chunk,
    /// Explicit end-of-response marker, payload ignored
    Close,
}

impl FrameKind {
    /// Map an SSE event name to a frame kind.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            STATUS_EVENT => Some(FrameKind::Status),
            CHUNK_EVENT => Some(FrameKind::Chunk),
            CLOSE_EVENT => Some(FrameKind::Close),
            _ => None,
        }
    }

    /// Wire name of this kind.
    pub fn event_name(&self) -> &'static str {
        match self {
            FrameKind::Status => STATUS_EVENT,
            FrameKind::Chunk => CHUNK_EVENT,
            FrameKind::Close => CLOSE_EVENT,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// One decoded protocol unit. The payload is left as raw text; the
/// session decides how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub data: String,
}

impl Frame {
    pub fn new(kind: FrameKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }
}

/// A dispatched SSE record before it is mapped to a [`Frame`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseRecord {
    /// Value of the last `event:` line, if any
    pub event: Option<String>,
    /// `data:` lines joined with `\n`, `None` when the record had none
    pub data: Option<String>,
}

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: message_chunk")
    Event(String),
    /// Data payload (e.g., "data: {\"content\": \"hello\"}")
    Data(String),
    /// Empty line - signals end of record
    Empty,
    /// Comment line (starts with ':') or a field we do not use
    Comment(String),
}

/// Errors that can occur while turning records into usable payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SseParseError {
    /// Recognised event arrived without any `data:` line
    #[error("Missing data for event type: {event_type}")]
    MissingData { event_type: String },
    /// Payload is not JSON of the expected shape
    #[error("Invalid JSON for event '{event_type}': {message}")]
    InvalidJson { event_type: String, message: String },
}

impl SseParseError {
    /// Event name the error refers to.
    pub fn event_type(&self) -> &str {
        match self {
            SseParseError::MissingData { event_type } => event_type,
            SseParseError::InvalidJson { event_type, .. } => event_type,
        }
    }
}
