//! Request construction subsystem.
//!
//! # Data Flow
//! ```text
//! caller picks a verb (get / post / put)
//!     → descriptor.rs (parse URI, encode payload for that verb)
//!     → RequestDescriptor (verb + target + headers + body, fully resolved)
//!     → handed to the dispatcher for execution
//! ```

pub mod descriptor;

pub use descriptor::{get, post, put, BuildError, Method, Payload, RequestDescriptor};
