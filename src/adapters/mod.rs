//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`StaticToken`] / [`EnvToken`] - token providers
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides a scripted HTTP client for tests.

pub mod mock;
pub mod reqwest_http;
pub mod static_token;

pub use mock::{MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
pub use static_token::{EnvToken, StaticToken, TOKEN_ENV};
