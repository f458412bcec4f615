//! Resilient outbound HTTP request layer.
//!
//! Issues GET/POST/PUT requests against arbitrary endpoints under a uniform
//! timeout and retry policy, classifies transport-level failures, and
//! guarantees callers a response-shaped value: the endpoint's response on
//! success, an empty placeholder (body `{}`) for every suppressed failure.
//!
//! ```text
//! caller → request builders → dispatcher ──→ transport (reqwest)
//!              (descriptor)      │  ▲ retry on timeout
//!                                │  └───────────┘
//!                                ├→ diagnostics channel (status strings)
//!                                └→ RelayResponse (success | empty)
//! ```
//!
//! Suppressed failures are only distinguishable through the diagnostics
//! channel; subscribe before dispatching if the reason matters.

// Core subsystems
pub mod dispatch;
pub mod request;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod diagnostics;
pub mod observability;
pub mod validation;

pub use config::{load_config, RelayConfig};
pub use diagnostics::Diagnostics;
pub use dispatch::{EmptyResponse, Relay, RelayResponse};
pub use request::{BuildError, Payload};
pub use transport::{Transport, TransportError, TransportResponse};
