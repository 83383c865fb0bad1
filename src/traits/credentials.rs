//! Access token provider trait abstraction.
//!
//! Token retrieval belongs to whatever authenticates the user. The
//! session only asks for the current value each time it sends.

use async_trait::async_trait;

/// Supplies the `Authorization` header value for outbound requests.
///
/// The returned string is sent verbatim, so providers that hold a raw
/// token should include the scheme (`Bearer ...`) themselves.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current header value, or `None` to send the request unauthenticated.
    async fn access_token(&self) -> Option<String>;
}
