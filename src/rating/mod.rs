//! Rating system implementation using the Glicko-2 algorithm
//!
//! This module provides the rating calculator interface and a Glicko-2
//! implementation that updates a player's rating, deviation, and
//! volatility from one rating period of game outcomes.

pub mod calculator;
pub mod glicko2;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator};
pub use glicko2::{Glicko2Calculator, Glicko2Config};
