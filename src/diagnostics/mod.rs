//! Diagnostics subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher events (request start, retry, failure class, outcome)
//!     → channel.rs (synchronous fan-out to subscribers)
//!     → whatever the embedding application registered
//!       (log sink, test recorder, alerting hook)
//! ```
//!
//! # Design Decisions
//! - String-typed notifications, no structured fields or severity levels;
//!   structured telemetry goes through `tracing` instead
//! - Delivery is synchronous and ordered, and never fails

pub mod channel;

pub use channel::Diagnostics;
