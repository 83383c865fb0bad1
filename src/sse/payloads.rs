//! SSE payload deserialization structs
//!
//! JSON bodies carried in the `data:` lines of recognised frames.

use serde::Deserialize;

/// Payload of a `status_message` frame.
///
/// Both fields are optional on the wire: the server may send a status
/// update without repeating the thread id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Payload of a `message_chunk` frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChunkPayload {
    pub content: String,
}

/// Payload of a `close` frame. Any JSON value is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ClosePayload(pub serde_json::Value);
