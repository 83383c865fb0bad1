//! Simple [`TokenProvider`] implementations.

use async_trait::async_trait;

use crate::traits::TokenProvider;

/// Environment variable read by [`EnvToken`].
pub const TOKEN_ENV: &str = "NLAPI_TOKEN";

/// Provider returning a fixed header value (or none).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Use `value` verbatim as the `Authorization` header.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// Wrap a raw token as `Bearer <token>`.
    pub fn bearer(token: impl AsRef<str>) -> Self {
        Self(Some(format!("Bearer {}", token.as_ref())))
    }

    /// Send requests without an `Authorization` header.
    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Provider reading `NLAPI_TOKEN` on every request, so a token rotated
/// by the surrounding process is picked up without restarting.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvToken;

#[async_trait]
impl TokenProvider for EnvToken {
    async fn access_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
