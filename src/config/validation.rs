//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, user agent non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::RelayConfig;
use std::fmt;

/// A single semantic violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the violation refers to.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub reason: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "timeout_secs",
            reason: "must be greater than zero".to_string(),
        });
    }

    if config.user_agent.trim().is_empty() {
        errors.push(ValidationError {
            field: "user_agent",
            reason: "must not be empty".to_string(),
        });
    }

    // retry_limit of zero is a valid policy: one attempt, no retries.

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
