//! Configuration schema definitions.
//!
//! This module defines the relay's policy configuration. All types derive
//! Serde traits for deserialization from config files, and the defaults
//! alone produce a usable configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy configuration for the outbound relay.
///
/// Shared read-only across all dispatches; fixed once constructed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RelayConfig {
    /// Number of times a timed-out attempt is retried before giving up.
    /// Zero is legal: every dispatch still makes one attempt.
    pub retry_limit: u32,

    /// Per-attempt timeout in seconds, applied to both connection open
    /// and the request/response exchange.
    pub timeout_secs: u64,

    /// User agent presented to endpoints.
    pub user_agent: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            retry_limit: 4,
            timeout_secs: 30,
            user_agent: default_user_agent(),
        }
    }
}

impl RelayConfig {
    /// Per-attempt timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_user_agent() -> String {
    format!("endpoint-relay/{}", env!("CARGO_PKG_VERSION"))
}
