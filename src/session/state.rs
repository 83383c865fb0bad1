//! Observable state of a conversation session.

use crate::error::ErrorKind;
use crate::models::Message;

/// Progress of the current request, derived from the frame kinds seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No frame seen yet
    #[default]
    Idle,
    /// A status frame arrived; the backend is working
    Processing,
    /// Content is streaming in
    Receiving,
}

/// Snapshot of everything a renderer needs to draw the conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Conversation log, append-only
    pub messages: Vec<Message>,
    /// Bot message being assembled; `None` until the first chunk
    pub pending_content: Option<String>,
    pub phase: Phase,
    /// Waiting for the first content of the current request
    pub is_pending: bool,
    /// The last request failed
    pub is_error: bool,
    /// Server-assigned thread, sent back with every later query
    pub thread_id: Option<String>,
    /// Last status text reported by the backend
    pub status_message: Option<String>,
    /// Kind of the last failure, for diagnostics only
    pub last_error: Option<ErrorKind>,
}

impl SessionState {
    /// Prepare for a new request and log the user's query.
    pub(crate) fn begin_request(&mut self, query: &str) {
        self.is_error = false;
        self.is_pending = true;
        self.pending_content = None;
        self.phase = Phase::Idle;
        self.last_error = None;
        self.messages
            .push(Message::human(query).in_thread(self.thread_id.clone()));
    }

    /// Flush accumulated content at the natural end of the stream.
    pub(crate) fn complete(&mut self) {
        if let Some(content) = self.pending_content.take() {
            if !content.is_empty() {
                self.messages
                    .push(Message::bot(content).in_thread(self.thread_id.clone()));
            }
        }
        self.is_pending = false;
    }

    /// Record a failed request. Partial content is discarded.
    pub(crate) fn fail(&mut self, kind: ErrorKind) {
        self.is_pending = false;
        self.is_error = true;
        self.pending_content = None;
        self.last_error = Some(kind);
    }

    /// Clear everything except the message log.
    pub(crate) fn clear_transient(&mut self) {
        self.pending_content = None;
        self.phase = Phase::Idle;
        self.is_pending = false;
        self.is_error = false;
        self.thread_id = None;
        self.status_message = None;
        self.last_error = None;
    }
}
