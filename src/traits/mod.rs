//! Trait abstractions for external collaborators.
//!
//! - [`HttpClient`] - streaming POST transport
//! - [`TokenProvider`] - source of the `Authorization` header value

pub mod credentials;
pub mod http;

pub use credentials::TokenProvider;
pub use http::{ByteStream, Headers, HttpClient, HttpError, StreamingResponse};
