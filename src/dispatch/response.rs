//! Dispatch results and the empty-response placeholder.
//!
//! # Design Decisions
//! - Callers never see an absent or half-built response: a dispatch yields
//!   either the transport's response or `EmptyResponse`
//! - `EmptyResponse` carries a fixed `{}` body so downstream JSON parsing
//!   never breaks on a suppressed failure

use reqwest::StatusCode;

use crate::transport::TransportResponse;

/// The body every suppressed failure presents to callers.
pub const EMPTY_BODY: &str = "{}";

/// Null object standing in for "no usable response".
///
/// Stateless; exposes the same read surface a real response would.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyResponse;

impl EmptyResponse {
    /// Always the literal `{}`. No error conditions, no side effects.
    pub fn body(&self) -> &'static str {
        EMPTY_BODY
    }
}

/// What a dispatch hands back: a real response or the empty placeholder.
#[derive(Debug, Clone)]
pub enum RelayResponse {
    /// The transport's response, status in the success class.
    Success(TransportResponse),
    /// Some failure was suppressed; details went to diagnostics.
    Empty(EmptyResponse),
}

impl RelayResponse {
    pub(crate) fn empty() -> Self {
        RelayResponse::Empty(EmptyResponse)
    }

    /// The response body, or `{}` for a suppressed failure.
    pub fn body(&self) -> &str {
        match self {
            RelayResponse::Success(response) => &response.body,
            RelayResponse::Empty(empty) => empty.body(),
        }
    }

    /// Consume the response, yielding its body.
    pub fn into_body(self) -> String {
        match self {
            RelayResponse::Success(response) => response.body,
            RelayResponse::Empty(empty) => empty.body().to_string(),
        }
    }

    /// Status of a successful response; `None` when empty.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RelayResponse::Success(response) => Some(response.status),
            RelayResponse::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RelayResponse::Empty(_))
    }
}
