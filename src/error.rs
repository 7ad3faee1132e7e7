//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Volatility bracket search found no sign change within {steps} steps")]
    VolatilityDivergence { steps: usize },
}
