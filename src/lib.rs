//! nlchat - streaming conversation client for the nlapi backend
//!
//! This library exposes modules for use in integration tests and the
//! `nlchat` binary.

pub mod adapters;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod session;
pub mod sse;
pub mod traits;
