//! Frame reduction: how each frame kind changes the session state.

use crate::error::SessionError;
use crate::sse::{parse_chunk, parse_close, parse_status, Frame, FrameKind};

use super::state::{Phase, SessionState};

impl SessionState {
    /// Apply one frame. The payload is parsed before anything is
    /// mutated, so a malformed frame leaves the state untouched.
    pub(crate) fn apply_frame(&mut self, frame: &Frame) -> Result<(), SessionError> {
        match frame.kind {
            FrameKind::Status => {
                let payload = parse_status(frame)?;
                if self.phase == Phase::Idle {
                    self.phase = Phase::Processing;
                }
                if let Some(content) = payload.content {
                    self.status_message = Some(content);
                }
                // The server assigns the thread on the first turn; later
                // frames may omit it
                if let Some(thread_id) = payload.thread_id.filter(|t| !t.is_empty()) {
                    if self.thread_id.as_deref() != Some(thread_id.as_str()) {
                        tracing::debug!(thread_id = %thread_id, "thread assigned");
                        self.thread_id = Some(thread_id);
                    }
                }
            }
            FrameKind::Chunk => {
                let payload = parse_chunk(frame)?;
                self.phase = Phase::Receiving;
                self.is_pending = false;
                self.pending_content
                    .get_or_insert_with(String::new)
                    .push_str(&payload.content);
            }
            FrameKind::Close => {
                // Termination follows the end of the body, not this frame
                parse_close(frame)?;
            }
        }
        Ok(())
    }
}
