//! Transport failure taxonomy.
//!
//! # Responsibilities
//! - Define the closed set of transport faults the dispatcher handles
//! - Classify `reqwest` errors into that set
//!
//! # Design Decisions
//! - The set is deliberately small and matched exhaustively by the
//!   dispatcher; a fault that fits no other variant becomes `Other`
//! - Classification walks the error's cause chain: io error kinds are
//!   authoritative, message text is the fallback

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Faults that can occur while executing a request over the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The attempt exceeded the per-attempt timeout. The only retryable
    /// fault.
    #[error("request timed out")]
    Timeout,

    /// The connection closed before a complete response arrived.
    #[error("connection closed before a complete response arrived")]
    EndOfStream,

    /// TLS handshake or certificate failure.
    #[error("TLS failure: {0}")]
    Tls(String),

    /// The endpoint refused the connection.
    #[error("connection refused")]
    ConnectionRefused,

    /// Anything the other variants do not cover.
    #[error("transport failure: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout;
        }
        match err.source().and_then(classify_cause_chain) {
            Some(classified) => classified,
            None => TransportError::Other(err.to_string()),
        }
    }
}

/// Walk a cause chain looking for a fault we recognize.
fn classify_cause_chain(err: &(dyn StdError + 'static)) -> Option<TransportError> {
    let mut cause: Option<&(dyn StdError + 'static)> = Some(err);

    while let Some(current) = cause {
        if let Some(io_err) = current.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => {
                    return Some(TransportError::ConnectionRefused)
                }
                io::ErrorKind::UnexpectedEof => return Some(TransportError::EndOfStream),
                io::ErrorKind::TimedOut => return Some(TransportError::Timeout),
                _ => {}
            }
        }

        let text = current.to_string().to_ascii_lowercase();
        if text.contains("certificate")
            || text.contains("handshake")
            || text.contains("tls")
            || text.contains("ssl")
        {
            return Some(TransportError::Tls(current.to_string()));
        }
        if text.contains("connection refused") {
            return Some(TransportError::ConnectionRefused);
        }
        if text.contains("connection closed")
            || text.contains("unexpected eof")
            || text.contains("incomplete message")
        {
            return Some(TransportError::EndOfStream);
        }

        cause = current.source();
    }

    None
}
