//! # Logweave HTTP
//!
//! axum middleware for request correlation:
//! - resolves a correlation id per inbound request (header or generated)
//! - binds it into the ambient context for the handler's whole future, so
//!   every log call made while handling the request carries the id
//! - echoes the id on the response and emits one http-level completion
//!   record with method, url, status, and duration

pub mod middleware;

pub use middleware::{correlation_middleware, REQUEST_ID_HEADER};
