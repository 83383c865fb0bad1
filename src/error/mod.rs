//! Error types for nlchat.
//!
//! | Type | Raised by |
//! |------|-----------|
//! | [`HttpError`](crate::traits::HttpError) | transport adapters |
//! | [`SseParseError`](crate::sse::SseParseError) | record/payload parsing |
//! | [`SessionError`] | the session's request pipeline |
//!
//! Transport and parse errors convert into [`SessionError`] with `?`.

mod session;

pub use session::{ErrorKind, SessionError};
