//! Conversation session: request lifecycle and frame reduction loop.
//!
//! A [`Session`] sends one query at a time to the nlapi endpoint,
//! consumes the SSE response through [`frame_stream`] and folds the frames
//! into a [`SessionState`] that callers observe through a `watch` channel.
//!
//! Only one request is live per session. Starting a new one, or calling
//! [`Session::reset`], cancels the previous request: its partial content
//! is dropped and it never sets the error flag.

mod reducer;
mod state;

pub use state::{Phase, SessionState};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::SessionConfig;
use crate::error::{ErrorKind, SessionError};
use crate::models::{Message, QueryRequest};
use crate::sse::{frame_stream, Frame};
use crate::traits::{Headers, HttpClient, TokenProvider};

/// The request currently owning the session.
struct ActiveRequest {
    id: u64,
    cancel: CancellationToken,
}

struct Inner {
    client: Arc<dyn HttpClient>,
    tokens: Arc<dyn TokenProvider>,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    /// Lock order: `active` before `state`
    active: Mutex<Option<ActiveRequest>>,
    next_request_id: AtomicU64,
}

/// Handle to one conversation. Clones share the same state.
///
/// # Example
///
/// ```ignore
/// use nlchat::adapters::{ReqwestHttpClient, StaticToken};
/// use nlchat::config::SessionConfig;
/// use nlchat::session::Session;
///
/// let session = Session::new(
///     ReqwestHttpClient::new(),
///     StaticToken::bearer("secret"),
///     SessionConfig::from_env(),
/// );
/// session.send_message("hi").await;
/// for message in session.messages() {
///     println!("{:?}: {}", message.speaker, message.content);
/// }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// Create a session with an empty log.
    pub fn new<C, T>(client: C, tokens: T, config: SessionConfig) -> Self
    where
        C: HttpClient + 'static,
        T: TokenProvider + 'static,
    {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner {
                client: Arc::new(client),
                tokens: Arc::new(tokens),
                config,
                state,
                active: Mutex::new(None),
                next_request_id: AtomicU64::new(1),
            }),
        }
    }

    /// Send `query` and consume the streamed answer.
    ///
    /// Resolves once the response has been fully consumed, has failed, or
    /// has been cancelled by [`reset`](Self::reset) or a newer call.
    /// Failures are reported through [`SessionState::is_error`] only.
    pub async fn send_message(&self, query: impl Into<String>) {
        let query = query.into();
        let (request, thread_id) = self.begin(&query);
        tracing::info!(request_id = request.id, thread_id = ?thread_id, "sending query");

        let outcome = tokio::select! {
            biased;
            _ = request.cancel.cancelled() => None,
            result = self.stream_response(&query, thread_id, &request.cancel) => Some(result),
        };

        match outcome {
            None => {
                tracing::debug!(request_id = request.id, "request cancelled");
            }
            Some(Ok(())) => {
                self.commit(&request.cancel, SessionState::complete);
                tracing::info!(request_id = request.id, "response complete");
            }
            Some(Err(err)) => {
                tracing::warn!(
                    request_id = request.id,
                    code = err.error_code(),
                    "request failed: {}",
                    err
                );
                let kind = err.kind();
                self.commit(&request.cancel, |state| state.fail(kind));
            }
        }

        self.release(request.id);
    }

    /// Cancel any in-flight request and clear transient state.
    ///
    /// The message log is kept. Calling this repeatedly is harmless.
    pub fn reset(&self) {
        let mut active = self.lock_active();
        if let Some(previous) = active.take() {
            tracing::debug!(request_id = previous.id, "cancelling request on reset");
            previous.cancel.cancel();
        }
        self.inner.state.send_modify(SessionState::clear_transient);
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.state.borrow().messages.clone()
    }

    pub fn pending_content(&self) -> Option<String> {
        self.inner.state.borrow().pending_content.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().is_pending
    }

    pub fn is_error(&self) -> bool {
        self.inner.state.borrow().is_error
    }

    pub fn thread_id(&self) -> Option<String> {
        self.inner.state.borrow().thread_id.clone()
    }

    pub fn status_message(&self) -> Option<String> {
        self.inner.state.borrow().status_message.clone()
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.inner.state.borrow().last_error
    }

    /// Whether a request currently owns the session.
    pub fn has_active_request(&self) -> bool {
        self.lock_active().is_some()
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveRequest>> {
        self.inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Supersede the previous request, reset per-request state and log
    /// the query. Returns the new request and the thread to continue.
    fn begin(&self, query: &str) -> (ActiveRequest, Option<String>) {
        let id = self.inner.next_request_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();

        let mut active = self.lock_active();
        if let Some(previous) = active.replace(ActiveRequest {
            id,
            cancel: cancel.clone(),
        }) {
            tracing::debug!(request_id = previous.id, "superseding request");
            previous.cancel.cancel();
        }

        let mut thread_id = None;
        self.inner.state.send_modify(|state| {
            state.begin_request(query);
            thread_id = state.thread_id.clone();
        });
        drop(active);

        (ActiveRequest { id, cancel }, thread_id)
    }

    /// Drop the handle if it still belongs to request `id`.
    fn release(&self, id: u64) {
        let mut active = self.lock_active();
        if active.as_ref().is_some_and(|a| a.id == id) {
            *active = None;
        }
    }

    /// Mutate state unless the request has been cancelled. The check runs
    /// under the state lock, so nothing lands after a reset has cleared.
    fn commit<F>(&self, cancel: &CancellationToken, f: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        self.inner.state.send_if_modified(|state| {
            if cancel.is_cancelled() {
                return false;
            }
            f(state);
            true
        })
    }

    fn apply(&self, cancel: &CancellationToken, frame: &Frame) -> Result<(), SessionError> {
        let mut result = Ok(());
        self.inner.state.send_if_modified(|state| {
            if cancel.is_cancelled() {
                return false;
            }
            result = state.apply_frame(frame);
            result.is_ok()
        });
        result
    }

    async fn request_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        if let Some(token) = self.inner.tokens.access_token().await {
            headers.insert("Authorization".to_string(), token);
        }
        headers
    }

    async fn stream_response(
        &self,
        query: &str,
        thread_id: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<(), SessionError> {
        let request = QueryRequest::new(query).with_thread(thread_id);
        let body = serde_json::to_string(&request)?;
        let headers = self.request_headers().await;
        let url = self.inner.config.endpoint_url();

        let response = self.inner.client.post_stream(&url, &body, &headers).await?;
        tracing::debug!(
            status = response.status,
            content_type = response.content_type().unwrap_or("-"),
            "response received"
        );
        if !response.is_success() {
            return Err(SessionError::RequestFailed {
                status: response.status,
            });
        }
        let body = response.body.ok_or(SessionError::NoStream)?;

        let mut frames = frame_stream(body);
        while let Some(frame) = frames.next().await {
            let frame = frame?;
            tracing::debug!(kind = %frame.kind, "frame");
            self.apply(cancel, &frame)?;
        }
        Ok(())
    }
}
