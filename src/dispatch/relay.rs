//! Caller-facing relay surface.
//!
//! # Responsibilities
//! - Wire policy, diagnostics, and transport into a dispatcher
//! - Offer the verb convenience calls endpoint-access clients consume
//!
//! # Design Decisions
//! - Verb calls return `Result`: an unparsable URI propagates, everything
//!   transport-level is already suppressed into the empty response
//! - `*_body` shortcuts project straight to the body string, which is all
//!   most endpoint-access clients read

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::diagnostics::Diagnostics;
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::response::RelayResponse;
use crate::request::{self, BuildError, Payload};
use crate::transport::{HttpTransport, Transport, TransportError};

/// Outbound HTTP relay: uniform timeout, retry, and failure suppression
/// for GET/POST/PUT against arbitrary endpoints.
#[derive(Debug)]
pub struct Relay {
    dispatcher: Dispatcher,
}

impl Relay {
    /// Build a relay over the production HTTP transport.
    pub fn new(config: RelayConfig, diagnostics: Diagnostics) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(&config, transport, diagnostics))
    }

    /// Build a relay over a caller-supplied transport.
    pub fn with_transport(
        config: &RelayConfig,
        transport: Arc<dyn Transport>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport, diagnostics, config.retry_limit),
        }
    }

    /// GET `uri` with `data` as the query string.
    pub async fn get(
        &self,
        uri: &str,
        data: &Payload,
        ssl: bool,
    ) -> Result<RelayResponse, BuildError> {
        Ok(self.dispatcher.dispatch(request::get(uri, data)?, ssl).await)
    }

    /// POST `uri` with `data` form-encoded as the body.
    pub async fn post(
        &self,
        uri: &str,
        data: &Payload,
        ssl: bool,
    ) -> Result<RelayResponse, BuildError> {
        Ok(self
            .dispatcher
            .dispatch(request::post(uri, data)?, ssl)
            .await)
    }

    /// PUT `uri` with `data` JSON-encoded as the body.
    pub async fn put(
        &self,
        uri: &str,
        data: &Payload,
        ssl: bool,
    ) -> Result<RelayResponse, BuildError> {
        Ok(self.dispatcher.dispatch(request::put(uri, data)?, ssl).await)
    }

    /// GET and project the response body.
    pub async fn get_body(
        &self,
        uri: &str,
        data: &Payload,
        ssl: bool,
    ) -> Result<String, BuildError> {
        Ok(self.get(uri, data, ssl).await?.into_body())
    }

    /// POST and project the response body.
    pub async fn post_body(
        &self,
        uri: &str,
        data: &Payload,
        ssl: bool,
    ) -> Result<String, BuildError> {
        Ok(self.post(uri, data, ssl).await?.into_body())
    }

    /// PUT and project the response body.
    pub async fn put_body(
        &self,
        uri: &str,
        data: &Payload,
        ssl: bool,
    ) -> Result<String, BuildError> {
        Ok(self.put(uri, data, ssl).await?.into_body())
    }
}
