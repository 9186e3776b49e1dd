//! Error types for the rating engine
//!
//! The numeric core is total and never fails. Errors only arise when building
//! a configuration or when validating untrusted match input.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },
}
