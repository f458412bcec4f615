//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared read-only by every dispatch
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; policy never changes mid-process
//! - All fields have defaults, so `RelayConfig::default()` is the documented
//!   stock policy (4 retries, 30 second timeout)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::RelayConfig;
