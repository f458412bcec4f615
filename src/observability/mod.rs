//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher and transport produce:
//!     → tracing events (structured fields, per-dispatch span)
//!     → diagnostics channel (human-readable strings, see diagnostics/)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, RUST_LOG filtered)
//!     → whatever the embedding application registers
//! ```
//!
//! # Design Decisions
//! - Each dispatch carries a UUID request id on its span
//! - No metrics exposition; structured logs are the telemetry surface

pub mod logging;

pub use logging::init_logging;
