//! Endpoint argument validation.
//!
//! Pure precondition checks callers run before building payloads. Nothing
//! here touches the network or the dispatcher; failures are immediate
//! invalid-argument errors, in contrast to the transport faults the
//! dispatcher suppresses.

pub mod args;

pub use args::{check_date, check_date_range, check_for_nils, ArgumentError, CheckedDate};
