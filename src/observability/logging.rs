//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for embedding applications
//! - Respect `RUST_LOG` when set, fall back to a caller-provided filter
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging; the diagnostics
//!   channel stays string-typed and separate
//! - Idempotent: repeated initialization (tests, multiple components) is
//!   a no-op rather than a panic

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a global subscriber with env-filter support.
///
/// `default_filter` applies when `RUST_LOG` is unset, e.g.
/// `"endpoint_relay=debug"`.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
