//! Request dispatch with bounded retry and failure suppression.
//!
//! # Responsibilities
//! - Execute a built descriptor against the transport
//! - Retry timed-out attempts up to the policy bound, with no delay between
//!   attempts
//! - Suppress every other transport fault into an empty response
//! - Publish a diagnostic for every notable event
//!
//! # State Machine
//! ```text
//! Initial → Sent → ┬ Success2xx ──────────────→ Done(response)
//!                  ├ SuccessNon2xx ───────────→ Done(empty)
//!                  ├ Timeout ── retries < limit → Sent (no backoff)
//!                  │          └ retries ≥ limit → Done(empty)
//!                  └ EndOfStream / Tls /
//!                    ConnectionRefused / Other → Done(empty)
//! ```
//!
//! # Design Decisions
//! - Fixed-count retry, no backoff, no jitter: worst-case blocking is a
//!   hard ceiling of (retry_limit + 1) * timeout
//! - The retry counter lives on the stack of one dispatch call; nothing is
//!   shared between concurrent dispatches except policy and diagnostics
//! - Transport faults never escape to the caller; only descriptor
//!   construction can fail, and that happens before dispatch is reached

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::diagnostics::Diagnostics;
use crate::dispatch::response::RelayResponse;
use crate::request::RequestDescriptor;
use crate::transport::{Transport, TransportError};

/// Executes descriptors under the relay's retry and suppression policy.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    diagnostics: Diagnostics,
    retry_limit: u32,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, diagnostics: Diagnostics, retry_limit: u32) -> Self {
        Self {
            transport,
            diagnostics,
            retry_limit,
        }
    }

    /// Dispatch one logical request.
    ///
    /// The SSL flag is applied to the target before anything is sent:
    /// `https` when true, `http` when false; an explicit port is preserved.
    /// Returns the transport's response when the status is 2xx, the empty
    /// placeholder for every suppressed failure.
    pub async fn dispatch(&self, mut request: RequestDescriptor, ssl: bool) -> RelayResponse {
        apply_scheme(&mut request.url, ssl);

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "dispatch",
            %request_id,
            method = %request.method,
            url = %request.url,
        );

        self.run(request, ssl).instrument(span).await
    }

    async fn run(&self, request: RequestDescriptor, ssl: bool) -> RelayResponse {
        let protocol = if ssl { "HTTPS" } else { "HTTP" };
        let host = request.url.host_str().unwrap_or("").to_string();

        self.diagnostics.publish(&format!(
            "Requesting from host [{}] {}",
            host,
            request.request_line()
        ));

        let mut retries: u32 = 0;

        loop {
            match self.transport.execute(&request).await {
                Ok(response) => {
                    if response.status.is_success() {
                        tracing::debug!(status = %response.status, "Request succeeded");
                        return RelayResponse::Success(response);
                    }
                    tracing::warn!(
                        status = %response.status,
                        "Unsuccessful response, returning empty"
                    );
                    self.diagnostics.publish(&format!(
                        "An unsuccessful {} request for {} was attempted. Endpoint answered {} - returning an empty response",
                        protocol, request.url, response.status
                    ));
                    return RelayResponse::empty();
                }
                Err(TransportError::Timeout) => {
                    if retries >= self.retry_limit {
                        tracing::warn!(retries, "Timeout retry budget exhausted");
                        self.diagnostics.publish(&format!(
                            "Request for {} ({}) timed out {} time(s) - returning an empty response",
                            request.url, protocol, retries
                        ));
                        return RelayResponse::empty();
                    }
                    retries += 1;
                    tracing::debug!(retries, "Attempt timed out, retrying");
                    self.diagnostics.publish(&format!(
                        "Request for {} ({}) timed out {} time(s) - retrying",
                        request.url, protocol, retries
                    ));
                }
                Err(TransportError::EndOfStream) => {
                    tracing::warn!("Connection closed mid-response, returning empty");
                    self.diagnostics.publish(&format!(
                        "Error while processing an {} request for {} - endpoint may require SSL - returning an empty response",
                        protocol, request.url
                    ));
                    return RelayResponse::empty();
                }
                Err(TransportError::Tls(detail)) => {
                    tracing::warn!(error = %detail, "TLS failure, returning empty");
                    self.diagnostics.publish(&format!(
                        "Error while processing an {} request for {} - SSL configuration mismatch - returning an empty response",
                        protocol, request.url
                    ));
                    return RelayResponse::empty();
                }
                Err(TransportError::ConnectionRefused) => {
                    tracing::warn!("Connection refused, returning empty");
                    self.diagnostics.publish(&format!(
                        "Connection refused for {} - returning an empty response",
                        request.summary()
                    ));
                    return RelayResponse::empty();
                }
                Err(TransportError::Other(detail)) => {
                    tracing::warn!(error = %detail, "Transport failure, returning empty");
                    self.diagnostics.publish(&format!(
                        "Error while processing an {} request for {}: {} - returning an empty response",
                        protocol, request.url, detail
                    ));
                    return RelayResponse::empty();
                }
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("retry_limit", &self.retry_limit)
            .finish()
    }
}

/// Force the target's scheme to match the SSL flag.
fn apply_scheme(url: &mut url::Url, ssl: bool) {
    let scheme = if ssl { "https" } else { "http" };
    if url.scheme() != scheme {
        // http and https are both "special" schemes, so this cannot fail
        // for the targets this layer accepts.
        let _ = url.set_scheme(scheme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{self, Payload};
    use crate::transport::TransportResponse;
    use async_trait::async_trait;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport that replays a scripted sequence of attempt outcomes and
    /// records every URL it was asked to hit.
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        seen: Mutex<Vec<url::Url>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<TransportResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn attempts(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(
            &self,
            request: &RequestDescriptor,
        ) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(request.url.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport called more times than scripted")
        }
    }

    fn ok(body: &str) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.to_string(),
        })
    }

    fn status(code: u16) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse {
            status: StatusCode::from_u16(code).unwrap(),
            headers: HeaderMap::new(),
            body: String::new(),
        })
    }

    fn descriptor() -> RequestDescriptor {
        request::get("http://api.example.com/usage", &Payload::new()).unwrap()
    }

    fn recording_diagnostics() -> (Diagnostics, Arc<Mutex<Vec<String>>>) {
        let diagnostics = Diagnostics::new();
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        diagnostics.subscribe(move |msg| sink.lock().unwrap().push(msg.to_string()));
        (diagnostics, messages)
    }

    fn dispatcher(transport: Arc<ScriptedTransport>, retry_limit: u32) -> (Dispatcher, Arc<Mutex<Vec<String>>>) {
        let (diagnostics, messages) = recording_diagnostics();
        (
            Dispatcher::new(transport, diagnostics, retry_limit),
            messages,
        )
    }

    #[tokio::test]
    async fn success_response_is_returned_as_is() {
        let transport = ScriptedTransport::new(vec![ok(r#"{"usage":118}"#)]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(!response.is_empty());
        assert_eq!(response.body(), r#"{"usage":118}"#);
        assert_eq!(transport.attempts(), 1);

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Requesting from host [api.example.com]"));
    }

    #[tokio::test]
    async fn non_2xx_is_suppressed_to_empty() {
        let transport = ScriptedTransport::new(vec![status(404)]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert_eq!(response.body(), "{}");
        assert_eq!(transport.attempts(), 1);
        assert!(messages.lock().unwrap()[1].contains("unsuccessful HTTP request"));
    }

    #[tokio::test]
    async fn redirect_is_treated_as_unsuccessful() {
        let transport = ScriptedTransport::new(vec![status(301)]);
        let (dispatcher, _) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test]
    async fn test_success_on_final_allowed_attempt() {
        // retry_limit timeouts then a success: the boundary must not be
        // treated as exhausted.
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            ok("late"),
        ]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(!response.is_empty());
        assert_eq!(response.body(), "late");
        assert_eq!(transport.attempts(), 5);

        let messages = messages.lock().unwrap();
        assert!(messages[1].contains("timed out 1 time(s) - retrying"));
        assert!(messages[4].contains("timed out 4 time(s) - retrying"));
    }

    #[tokio::test]
    async fn test_timeout_budget_exhausted() {
        // One more timeout than the limit allows: empty, and no further
        // attempt (the script has exactly five entries).
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
        ]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert_eq!(transport.attempts(), 5);
        assert!(messages
            .lock()
            .unwrap()
            .last()
            .unwrap()
            .contains("timed out 4 time(s) - returning an empty response"));
    }

    #[tokio::test]
    async fn zero_retry_limit_still_makes_one_attempt() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Timeout)]);
        let (dispatcher, _) = dispatcher(Arc::clone(&transport), 0);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert_eq!(transport.attempts(), 1);
    }

    #[tokio::test]
    async fn tls_failure_is_not_retried() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Tls(
            "invalid peer certificate".to_string(),
        ))]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), true).await;

        assert!(response.is_empty());
        assert_eq!(transport.attempts(), 1);
        assert!(messages.lock().unwrap()[1].contains("SSL configuration mismatch"));
    }

    #[tokio::test]
    async fn end_of_stream_suggests_ssl() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::EndOfStream)]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert!(messages.lock().unwrap()[1].contains("endpoint may require SSL"));
    }

    #[tokio::test]
    async fn connection_refused_names_the_request() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::ConnectionRefused)]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert!(messages
            .lock()
            .unwrap()[1]
            .contains("Connection refused for <GET http://api.example.com/usage>"));
    }

    #[tokio::test]
    async fn unknown_fault_carries_its_description() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Other(
            "dns failure".to_string(),
        ))]);
        let (dispatcher, messages) = dispatcher(Arc::clone(&transport), 4);

        let response = dispatcher.dispatch(descriptor(), false).await;

        assert!(response.is_empty());
        assert!(messages.lock().unwrap()[1].contains("dns failure"));
    }

    #[tokio::test]
    async fn ssl_flag_rewrites_the_scheme() {
        let transport = ScriptedTransport::new(vec![ok("")]);
        let (dispatcher, _) = dispatcher(Arc::clone(&transport), 4);

        dispatcher.dispatch(descriptor(), true).await;

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].scheme(), "https");
    }

    #[tokio::test]
    async fn explicit_port_survives_scheme_rewrite() {
        let transport = ScriptedTransport::new(vec![ok("")]);
        let (dispatcher, _) = dispatcher(Arc::clone(&transport), 4);

        let request =
            request::get("http://api.example.com:8545/usage", &Payload::new()).unwrap();
        dispatcher.dispatch(request, true).await;

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].scheme(), "https");
        assert_eq!(seen[0].port(), Some(8545));
    }

    #[tokio::test]
    async fn retry_counter_is_per_dispatch() {
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::Timeout),
            ok("first"),
            Err(TransportError::Timeout),
            ok("second"),
        ]);
        let (dispatcher, _) = dispatcher(Arc::clone(&transport), 1);

        let first = dispatcher.dispatch(descriptor(), false).await;
        let second = dispatcher.dispatch(descriptor(), false).await;

        assert_eq!(first.body(), "first");
        assert_eq!(second.body(), "second");
        assert_eq!(transport.attempts(), 4);
    }
}
