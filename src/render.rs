//! Incremental terminal rendering of a session.
//!
//! A `watch` receiver only sees the latest state, so several updates can
//! collapse into one: the last chunk and the commit of the bot message
//! often arrive together, and a short answer may never be observed as
//! pending at all. [`RenderCursor`] remembers what has already been
//! written and works out the missing text from whatever state it is
//! shown next.

use crate::session::SessionState;

/// Output produced by one [`RenderCursor::render_delta`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderUpdate {
    /// Conversation text for stdout
    pub text: String,
    /// Status and error lines for stderr
    pub notices: Vec<String>,
}

/// What a renderer has printed so far.
#[derive(Debug, Clone, Default)]
pub struct RenderCursor {
    /// Bot text of the current answer already written
    shown: String,
    /// Number of log messages already accounted for
    committed: usize,
    last_status: Option<String>,
    was_error: bool,
}

impl RenderCursor {
    /// Cursor that treats everything already in `state` as printed.
    pub fn starting_at(state: &SessionState) -> Self {
        Self {
            committed: state.messages.len(),
            last_status: state.status_message.clone(),
            was_error: state.is_error,
            ..Default::default()
        }
    }

    /// Text still missing from the terminal for `state`.
    pub fn render_delta(&mut self, state: &SessionState) -> RenderUpdate {
        let mut update = RenderUpdate::default();

        if state.status_message != self.last_status {
            if let Some(status) = &state.status_message {
                update.notices.push(format!("[{}]", status));
            }
            self.last_status = state.status_message.clone();
        }

        let start = self.committed.min(state.messages.len());
        for message in &state.messages[start..] {
            if message.is_bot() {
                self.continue_with(&message.content, &mut update.text);
                update.text.push('\n');
                self.shown.clear();
            } else if message.is_human() && !self.shown.is_empty() {
                // The answer being shown was superseded by a new query
                self.end_line(&mut update.text);
            }
        }
        self.committed = state.messages.len();

        match &state.pending_content {
            Some(content) => {
                self.continue_with(content, &mut update.text);
                self.shown.clone_from(content);
            }
            None => self.end_line(&mut update.text),
        }

        if state.is_error && !self.was_error {
            update.notices.push("request failed, try again".to_string());
        }
        self.was_error = state.is_error;

        update
    }

    /// Append the part of `content` not shown yet. Content that does not
    /// extend what is on screen starts on a fresh line.
    fn continue_with(&self, content: &str, out: &mut String) {
        match content.strip_prefix(self.shown.as_str()) {
            Some(rest) => out.push_str(rest),
            None => {
                out.push('\n');
                out.push_str(content);
            }
        }
    }

    /// Terminate a partially shown answer that will not be completed.
    fn end_line(&mut self, out: &mut String) {
        if !self.shown.is_empty() {
            out.push('\n');
            self.shown.clear();
        }
    }
}
