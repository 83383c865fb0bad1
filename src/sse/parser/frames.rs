//! Record-to-frame mapping and payload parsers

use serde::de::DeserializeOwned;

use crate::sse::events::{Frame, FrameKind, SseParseError, SseRecord};
use crate::sse::payloads::{ChunkPayload, ClosePayload, StatusPayload};

/// Map a dispatched record to a frame.
///
/// Records with an unrecognised (or missing) event name yield `Ok(None)`
/// so newer servers can add events without breaking older clients.
pub fn frame_from_record(record: SseRecord) -> Result<Option<Frame>, SseParseError> {
    let event = record.event.unwrap_or_default();
    let Some(kind) = FrameKind::from_event_name(&event) else {
        tracing::debug!(event = %event, "skipping unrecognised SSE record");
        return Ok(None);
    };

    match record.data {
        Some(data) => Ok(Some(Frame::new(kind, data))),
        None => Err(SseParseError::MissingData { event_type: event }),
    }
}

fn parse_payload<T: DeserializeOwned>(frame: &Frame) -> Result<T, SseParseError> {
    serde_json::from_str(&frame.data).map_err(|e| SseParseError::InvalidJson {
        event_type: frame.kind.event_name().to_string(),
        message: e.to_string(),
    })
}

/// Parse the payload of a status frame
pub fn parse_status(frame: &Frame) -> Result<StatusPayload, SseParseError> {
    parse_payload(frame)
}

/// Parse the payload of a chunk frame
pub fn parse_chunk(frame: &Frame) -> Result<ChunkPayload, SseParseError> {
    parse_payload(frame)
}

/// Parse the payload of a close frame
pub fn parse_close(frame: &Frame) -> Result<ClosePayload, SseParseError> {
    parse_payload(frame)
}
