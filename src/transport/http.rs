//! Production transport over `reqwest`.
//!
//! # Responsibilities
//! - Hold a `reqwest::Client` configured from relay policy
//! - Execute descriptors and read the full response body
//! - Map every `reqwest` failure into the transport taxonomy
//!
//! # Design Decisions
//! - Per-attempt timeouts live here, on the client, not on an outer timer
//! - Redirects are disabled: a 3xx is an unsuccessful response to classify,
//!   never a hop to follow
//! - The body is read inside the fault boundary, so a failure mid-body is
//!   classified like any other transport fault

use async_trait::async_trait;

use crate::config::RelayConfig;
use crate::request::{Method, RequestDescriptor};
use crate::transport::{Transport, TransportError, TransportResponse};

/// `Transport` implementation backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from relay policy.
    pub fn new(config: &RelayConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self
            .client
            .request(method, request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(TransportError::from)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(TransportError::from)?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
