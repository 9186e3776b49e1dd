//! Configuration management for the rating engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod rating;

// Re-export commonly used types
pub use rating::{BalanceConfig, RatingModelConfig, DEFAULT_BETA, DEFAULT_KAPPA, DEFAULT_TAU};
