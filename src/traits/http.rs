//! HTTP client trait abstraction.
//!
//! The session only ever needs one kind of call: a POST whose response
//! body is consumed incrementally. Keeping that behind a trait lets the
//! session run against reqwest in production and a scripted client in
//! tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Incrementally delivered response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Response whose body has not been read yet.
pub struct StreamingResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body, `None` when the server sent nothing to stream
    pub body: Option<ByteStream>,
}

impl StreamingResponse {
    /// Create a response with a streaming body.
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Some(body),
        }
    }

    /// Create a response that carries no body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: None,
        }
    }

    /// Attach response headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Value of the `Content-Type` header, matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for StreamingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Error while reading the body
    #[error("IO error: {0}")]
    Io(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use nlchat::traits::{Headers, HttpClient};
///
/// async fn status_of<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.post_stream("http://localhost/x", "{}", &Headers::new()).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and hand back the body unread.
    ///
    /// Implementations must not fail on non-2xx statuses; the caller
    /// inspects [`StreamingResponse::status`] itself. Dropping the
    /// returned body aborts the transfer.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError>;
}
