//! Shared helpers for integration tests.
//!
//! Builders for SSE response bodies in the nlapi wire format and a
//! session factory pointed at a wiremock server.

#![allow(dead_code)]

use nlchat::adapters::{ReqwestHttpClient, StaticToken};
use nlchat::config::SessionConfig;
use nlchat::session::Session;
use wiremock::{MockServer, ResponseTemplate};

pub const ENDPOINT_PATH: &str = "/nlapi/openapi";
pub const TEST_TOKEN: &str = "Bearer test-auth-token";

/// `status_message` frame.
pub fn status(content: &str, thread_id: Option<&str>) -> String {
    let payload = match thread_id {
        Some(t) => serde_json::json!({ "content": content, "thread_id": t }),
        None => serde_json::json!({ "content": content }),
    };
    format!("event: status_message\ndata: {}\n\n", payload)
}

/// `message_chunk` frame.
pub fn chunk(content: &str) -> String {
    format!(
        "event: message_chunk\ndata: {}\n\n",
        serde_json::json!({ "content": content })
    )
}

/// `close` frame.
pub fn close() -> String {
    "event: close\ndata: {}\n\n".to_string()
}

/// 200 response with an event-stream body.
pub fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/event-stream")
}

/// Session using the real reqwest client against `server`.
pub fn session_for(server: &MockServer) -> Session {
    Session::new(
        ReqwestHttpClient::new(),
        StaticToken::new(TEST_TOKEN),
        SessionConfig::new().with_base_url(server.uri()),
    )
}
