//! Glicko Engine - Glicko-2 rating calculations
//!
//! This crate computes updated skill ratings for pairwise games: a
//! competitor's rating, rating deviation, and volatility are recalculated
//! from the outcomes of one rating period against any number of opponents.

pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{Glicko2Calculator, Glicko2Config, NoOpRatingCalculator, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
