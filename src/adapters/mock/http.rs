//! Mock HTTP client for testing.
//!
//! Provides a scripted [`HttpClient`] that returns predefined streaming
//! responses or errors and records every request it receives.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use futures_util::StreamExt;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, StreamingResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Respond with `status` and a body delivered as these chunks
    Stream { status: u16, chunks: Vec<Bytes> },
    /// Deliver the chunks, then never end the body
    Stall { status: u16, chunks: Vec<Bytes> },
    /// Deliver the chunks, then fail the body read
    BrokenStream { chunks: Vec<Bytes>, error: HttpError },
    /// Respond with `status` and no body at all
    Empty(u16),
    /// Fail before any response arrives
    Error(HttpError),
    /// Never produce a response
    Hang,
}

impl MockResponse {
    /// 200 response carrying `body` in one chunk.
    pub fn sse(body: &str) -> Self {
        MockResponse::Stream {
            status: 200,
            chunks: vec![Bytes::from(body.to_string())],
        }
    }

    /// 200 response carrying each part as its own chunk.
    pub fn sse_chunks(parts: &[&str]) -> Self {
        MockResponse::Stream {
            status: 200,
            chunks: parts.iter().map(|p| Bytes::from(p.to_string())).collect(),
        }
    }

    /// 200 response that delivers `body` and then stalls.
    pub fn stall_after(body: &str) -> Self {
        MockResponse::Stall {
            status: 200,
            chunks: vec![Bytes::from(body.to_string())],
        }
    }

    /// Response with the given status and an empty streaming body.
    pub fn status(status: u16) -> Self {
        MockResponse::Stream {
            status,
            chunks: Vec::new(),
        }
    }
}

/// Decrements the live-body counter when a body stream is dropped.
struct BodyGuard(Arc<AtomicUsize>);

impl Drop for BodyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up per URL: one-shot responses queued with
/// [`push_response`](Self::push_response) are used first, in order, then
/// the sticky response from [`set_response`](Self::set_response).
///
/// # Example
///
/// ```ignore
/// use nlchat::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.push_response(
///     "http://localhost:8000/nlapi/openapi",
///     MockResponse::sse("event: close\ndata: {}\n\n"),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Sticky responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// One-shot responses by URL
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Bodies handed out and not yet dropped
    live_bodies: Arc<AtomicUsize>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response used for every request to `url`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Queue a response used for the next unanswered request to `url`.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        let mut queued = self.queued.lock().unwrap();
        queued
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of response bodies still held by a consumer.
    pub fn live_bodies(&self) -> usize {
        self.live_bodies.load(Ordering::SeqCst)
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
        {
            return Some(response);
        }

        self.responses.lock().unwrap().get(url).cloned()
    }

    fn tracked<S>(&self, stream: S) -> ByteStream
    where
        S: Stream<Item = Result<Bytes, HttpError>> + Send + 'static,
    {
        self.live_bodies.fetch_add(1, Ordering::SeqCst);
        let guard = BodyGuard(self.live_bodies.clone());
        Box::pin(stream.map(move |item| {
            let _keep = &guard;
            item
        }))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError> {
        self.record_request(url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Stream { status, chunks }) => {
                let body = self.tracked(futures::stream::iter(chunks.into_iter().map(Ok)));
                Ok(StreamingResponse::new(status, body))
            }
            Some(MockResponse::Stall { status, chunks }) => {
                let body = self.tracked(
                    futures::stream::iter(chunks.into_iter().map(Ok))
                        .chain(futures::stream::pending()),
                );
                Ok(StreamingResponse::new(status, body))
            }
            Some(MockResponse::BrokenStream { chunks, error }) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(error)));
                let body = self.tracked(futures::stream::iter(items));
                Ok(StreamingResponse::new(200, body))
            }
            Some(MockResponse::Empty(status)) => Ok(StreamingResponse::empty(status)),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Hang) => futures::future::pending().await,
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/nlapi/openapi";

    async fn read_all(response: StreamingResponse) -> Vec<Result<Bytes, HttpError>> {
        response.body.expect("body").collect().await
    }

    #[test]
    fn test_mock_http_client_new() {
        let client = MockHttpClient::new();
        assert!(client.get_requests().is_empty());
        assert_eq!(client.live_bodies(), 0);
    }

    #[tokio::test]
    async fn test_stream_response_and_recording() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::sse_chunks(&["a", "b"]));

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer t".to_string());
        let response = client.post_stream(URL, r#"{"x":1}"#, &headers).await.unwrap();
        assert_eq!(response.status, 200);
        let items = read_all(response).await;
        assert_eq!(items, vec![Ok(Bytes::from("a")), Ok(Bytes::from("b"))]);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, URL);
        assert_eq!(requests[0].json(), serde_json::json!({"x": 1}));
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&"Bearer t".to_string())
        );
    }

    #[tokio::test]
    async fn test_queued_responses_used_in_order_before_sticky() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::status(500));
        client.push_response(URL, MockResponse::status(201));
        client.push_response(URL, MockResponse::status(202));

        let statuses = [
            client.post_stream(URL, "", &Headers::new()).await.unwrap().status,
            client.post_stream(URL, "", &Headers::new()).await.unwrap().status,
            client.post_stream(URL, "", &Headers::new()).await.unwrap().status,
        ];
        assert_eq!(statuses, [201, 202, 500]);
    }

    #[tokio::test]
    async fn test_empty_and_error_responses() {
        let client = MockHttpClient::new();
        client.push_response(URL, MockResponse::Empty(200));
        client.push_response(
            URL,
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let empty = client.post_stream(URL, "", &Headers::new()).await.unwrap();
        assert!(empty.body.is_none());

        let err = client.post_stream(URL, "", &Headers::new()).await.unwrap_err();
        assert_eq!(err, HttpError::ConnectionFailed("refused".to_string()));
    }

    #[tokio::test]
    async fn test_broken_stream_ends_with_error() {
        let client = MockHttpClient::new();
        client.set_response(
            URL,
            MockResponse::BrokenStream {
                chunks: vec![Bytes::from("a")],
                error: HttpError::Io("reset".to_string()),
            },
        );

        let items = read_all(client.post_stream(URL, "", &Headers::new()).await.unwrap()).await;
        assert_eq!(
            items,
            vec![Ok(Bytes::from("a")), Err(HttpError::Io("reset".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_live_body_tracking() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::stall_after("a"));

        let response = client.post_stream(URL, "", &Headers::new()).await.unwrap();
        assert_eq!(client.live_bodies(), 1);
        drop(response);
        assert_eq!(client.live_bodies(), 0);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.post_stream(URL, "", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }
}
