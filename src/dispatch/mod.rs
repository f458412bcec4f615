//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Relay verb call (get / post / put)
//!     → request builders (descriptor, may fail on a bad URI)
//!     → dispatcher.rs (retry state machine over the transport)
//!     → RelayResponse (transport response, or empty placeholder)
//! ```
//!
//! # Design Decisions
//! - Every suppressed failure is surfaced on the diagnostics channel only;
//!   the return value does not say why a dispatch came back empty

pub mod dispatcher;
pub mod relay;
pub mod response;

pub use dispatcher::Dispatcher;
pub use relay::Relay;
pub use response::{EmptyResponse, RelayResponse, EMPTY_BODY};
