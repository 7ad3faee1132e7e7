//! Rating calculator trait and implementations
//!
//! This module defines the interface for rating-period calculations and
//! provides a no-op implementation for testing or fallback.

use crate::types::{GameOutcome, PlayerRating, VolatilityUpdate};

/// Trait for updating a player's rating from one rating period
pub trait RatingCalculator: Send + Sync {
    /// Compute the player's updated rating state from a period of games
    ///
    /// # Arguments
    /// * `competitor` - The player's rating state entering the period
    /// * `outcomes` - Every game the player completed during the period
    /// * `volatility` - Whether to solve for the new volatility or pin it
    ///
    /// # Returns
    /// The player's rating state after the period. Inputs are not modified;
    /// the caller decides whether to overwrite stored state.
    fn rate_period(
        &self,
        competitor: &PlayerRating,
        outcomes: &[GameOutcome],
        volatility: VolatilityUpdate,
    ) -> crate::error::Result<PlayerRating>;

    /// Get the initial rating for new players
    fn initial_rating(&self) -> PlayerRating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}

/// Simple rating calculator for testing or fallback
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: PlayerRating,
}

impl NoOpRatingCalculator {
    /// Create a new no-op rating calculator
    pub fn new(initial_rating: PlayerRating) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(PlayerRating::default())
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn rate_period(
        &self,
        competitor: &PlayerRating,
        _outcomes: &[GameOutcome],
        _volatility: VolatilityUpdate,
    ) -> crate::error::Result<PlayerRating> {
        // No-op: the period changes nothing
        Ok(*competitor)
    }

    fn initial_rating(&self) -> PlayerRating {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating.rating,
            "initial_deviation": self.initial_rating.deviation,
            "initial_volatility": self.initial_rating.volatility,
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_f64()) {
            self.initial_rating.rating = rating;
        }
        if let Some(deviation) = config.get("initial_deviation").and_then(|v| v.as_f64()) {
            self.initial_rating.deviation = deviation;
        }
        if let Some(volatility) = config.get("initial_volatility").and_then(|v| v.as_f64()) {
            self.initial_rating.volatility = volatility;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameResult;

    #[test]
    fn test_noop_calculator() {
        let calculator = NoOpRatingCalculator::default();
        let competitor = PlayerRating::new(1600.0, 120.0, 0.05);

        let outcomes = vec![GameOutcome::new(PlayerRating::default(), GameResult::Win)];
        let updated = calculator
            .rate_period(&competitor, &outcomes, VolatilityUpdate::Computed)
            .unwrap();

        // Ratings should be unchanged
        assert_eq!(updated, competitor);
    }

    #[test]
    fn test_noop_calculator_config() {
        let mut calculator = NoOpRatingCalculator::default();

        let initial = calculator.initial_rating();
        assert_eq!(initial.rating, 1500.0);

        // Update config
        let new_config = serde_json::json!({
            "initial_rating": 1400.0,
            "initial_deviation": 180.0
        });

        calculator.update_config(new_config).unwrap();

        let updated = calculator.initial_rating();
        assert_eq!(updated.rating, 1400.0);
        assert_eq!(updated.deviation, 180.0);
        assert_eq!(updated.volatility, 0.06);
    }
}
