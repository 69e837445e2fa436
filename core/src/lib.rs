//! Core components for the lakeload ingestion client.
//!
//! This crate provides the service-independent pieces shared by the ADLS
//! client: a typed error with a retryable classification, hashing and time
//! helpers for shared-key request signing, the [`SigningRequest`]
//! canonicalization context, the [`HttpSend`] transport seam, and the
//! bounded exponential-backoff [`retry_with_backoff`] wrapper.
//!
//! ## Overview
//!
//! - [`Error`] / [`ErrorKind`]: every failure carries a kind; whether an
//!   operation is worth retrying is decided at the kind level, not by
//!   catching exception types.
//! - [`SigningRequest`]: a canonicalization context built from
//!   `http::request::Parts`. Signers mutate it (stamp `x-ms-date`, insert
//!   `Authorization`) and apply it back onto the request as the last step
//!   before transmission.
//! - [`HttpSend`]: the transport trait. A process owns a single reusable
//!   implementation and shares it across calls; tests substitute a mock.
//! - [`retry_with_backoff`]: wraps a fallible async operation with bounded
//!   exponential backoff. Sleeps are plain `tokio::time::sleep` calls, so
//!   dropping the future cancels both the in-flight call and any pending
//!   backoff.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod error;
pub use error::{Error, ErrorKind, Result};
mod http;
pub use http::HttpSend;
mod request;
pub use request::SigningRequest;
mod retry;
pub use retry::{retry_with_backoff, retry_with_backoff_notify, RetryPolicy};
