//! SSE (Server-Sent Events) stream adapter
//!
//! Turns the chunked response body of the nlapi endpoint into a sequence
//! of typed frames. SSE format consists of:
//! - `event: <type>` - event type line
//! - `data: <json>` - data payload line(s)
//! - Empty line - signals end of record
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Frame and record types, SseParseError
//! - `payloads` - JSON payloads of the recognised frames
//! - `parser` - SseParser, record-to-frame mapping, payload parsers
//! - `decoder` - incremental UTF-8 decoding
//! - `stream` - the byte stream to frame stream adapter

mod decoder;
mod events;
mod parser;
mod payloads;
mod stream;

pub use decoder::Utf8Decoder;
pub use events::{
    Frame, FrameKind, SseLine, SseParseError, SseRecord, CHUNK_EVENT, CLOSE_EVENT, STATUS_EVENT,
};
pub use parser::{
    frame_from_record, parse_chunk, parse_close, parse_sse_line, parse_status, SseParser,
};
pub use payloads::{ChunkPayload, ClosePayload, StatusPayload};
pub use stream::{frame_stream, FrameStream};
