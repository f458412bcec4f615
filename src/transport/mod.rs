//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! RequestDescriptor
//!     → Transport::execute (one attempt, per-attempt timeout)
//!     → Ok(TransportResponse)  body fully read, status untouched
//!     → Err(TransportError)    classified fault from error.rs
//! ```
//!
//! # Design Decisions
//! - The trait seam exists so the dispatcher's retry state machine is
//!   testable without sockets
//! - One call is one attempt; retry policy belongs to the dispatcher

pub mod error;
pub mod http;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::request::RequestDescriptor;

pub use error::TransportError;
pub use http::HttpTransport;

/// A response returned by the transport, body already read.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// A single-attempt request executor.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one attempt of `request` and read the full response body.
    async fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> Result<TransportResponse, TransportError>;
}
