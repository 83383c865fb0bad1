//! SSE stream parsing logic
//!
//! Contains the stateful SseParser for accumulating lines into records,
//! plus the conversion from records to typed frames and payloads.

mod frames;

use crate::sse::events::{SseLine, SseRecord};

pub use frames::{frame_from_record, parse_chunk, parse_close, parse_status};

/// Split `field: value` and drop the single optional space after the colon.
fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?;
    if rest.is_empty() {
        return Some("");
    }
    let value = rest.strip_prefix(':')?;
    Some(value.strip_prefix(' ').unwrap_or(value))
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(value) = field_value(line, "event") {
        return SseLine::Event(value.trim().to_string());
    }

    if let Some(value) = field_value(line, "data") {
        return SseLine::Data(value.to_string());
    }

    // id:, retry: and unknown fields - treat as comment
    SseLine::Comment(line.to_string())
}

/// Stateful SSE parser that accumulates lines and emits complete records
#[derive(Debug, Default)]
pub struct SseParser {
    /// Current event type being accumulated
    current_event_type: Option<String>,
    /// Accumulated data lines (SSE allows multiple data: lines)
    data_buffer: Vec<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line (without its terminator) to the parser.
    ///
    /// Returns `Some(record)` when the line was the blank line closing a
    /// record that had an event name or data.
    pub fn feed_line(&mut self, line: &str) -> Option<SseRecord> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                None
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                None
            }
            SseLine::Empty => self.take_record(),
            SseLine::Comment(_) => None,
        }
    }

    /// Whether a record has been started but not yet dispatched.
    pub fn has_partial_record(&self) -> bool {
        self.current_event_type.is_some() || !self.data_buffer.is_empty()
    }

    fn take_record(&mut self) -> Option<SseRecord> {
        if !self.has_partial_record() {
            return None;
        }

        let event = self.current_event_type.take();
        let data = if self.data_buffer.is_empty() {
            None
        } else {
            Some(self.data_buffer.join("\n"))
        };
        self.data_buffer.clear();

        Some(SseRecord { event, data })
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.data_buffer.clear();
    }
}
