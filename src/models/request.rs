use serde::{Deserialize, Serialize};

/// Request options sent with every query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryOptions {
    /// Ask the backend for an SSE response instead of a single JSON body
    pub stream: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { stream: true }
    }
}

/// Body of `POST /nlapi/openapi`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The query typed by the user
    pub user_input: String,
    /// Thread to continue - None lets the server start a new one.
    /// Serialized as `null` rather than omitted.
    pub thread_id: Option<String>,
    pub options: QueryOptions,
}

impl QueryRequest {
    /// Create a streaming request for a new thread
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            thread_id: None,
            options: QueryOptions::default(),
        }
    }

    /// Continue an existing thread (no-op for `None`)
    pub fn with_thread(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_serialization() {
        let request = QueryRequest::new("hi");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_input": "hi",
                "thread_id": null,
                "options": {"stream": true}
            })
        );
    }

    #[test]
    fn test_request_with_thread() {
        let request = QueryRequest::new("and then?").with_thread(Some("t1".to_string()));
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""thread_id":"t1""#));
        assert!(json.contains(r#""stream":true"#));
    }
}
