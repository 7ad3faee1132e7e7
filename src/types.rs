//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Conversion factor between the display rating scale (centered at 1500)
/// and the internal Glicko-2 scale (centered at 0).
pub const GLICKO_SCALE: f64 = 173.7178;

/// Default rating for a player with no game history
pub const DEFAULT_RATING: f64 = 1500.0;

/// Default rating deviation for a player with no game history
/// (maximum uncertainty)
pub const DEFAULT_DEVIATION: f64 = 350.0;

/// Default volatility for a player with no game history
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// Rating information for a player/bot
///
/// All fields are on the display scale. The engine never modifies a
/// `PlayerRating` it is handed; an updated state comes back as a new value
/// and the caller decides whether to overwrite stored state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl Default for PlayerRating {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            deviation: DEFAULT_DEVIATION,
            volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl PlayerRating {
    /// Create a rating state with explicit values
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            rating,
            deviation,
            volatility,
        }
    }

    /// Rating on the internal Glicko-2 scale (mu)
    pub fn internal_rating(&self) -> f64 {
        (self.rating - DEFAULT_RATING) / GLICKO_SCALE
    }

    /// Rating deviation on the internal Glicko-2 scale (phi)
    pub fn internal_deviation(&self) -> f64 {
        self.deviation / GLICKO_SCALE
    }

    /// Down-weighting factor applied to results against this player.
    ///
    /// Uses this player's own deviation: the less certain this rating is,
    /// the less an outcome against it should move an opponent's rating.
    pub fn g(&self) -> f64 {
        let phi = self.internal_deviation();
        1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
    }

    /// 95% confidence interval for the rating, on the display scale
    pub fn rating_interval(&self) -> (f64, f64) {
        (
            self.rating - 1.96 * self.deviation,
            self.rating + 1.96 * self.deviation,
        )
    }
}

/// Outcome of a single game from the rated player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Loss,
    Draw,
    Win,
}

impl GameResult {
    /// Score value used by the rating formulas
    pub fn score(&self) -> f64 {
        match self {
            GameResult::Loss => 0.0,
            GameResult::Draw => 0.5,
            GameResult::Win => 1.0,
        }
    }
}

/// One game inside a rating period: the opponent's rating snapshot at game
/// time plus the result from the rated player's perspective.
///
/// Several outcomes against the same opponent snapshot are legal and count
/// as repeated games within the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub opponent: PlayerRating,
    pub result: GameResult,
}

impl GameOutcome {
    pub fn new(opponent: PlayerRating, result: GameResult) -> Self {
        Self { opponent, result }
    }

    /// A win against `opponent`
    pub fn win(opponent: PlayerRating) -> Self {
        Self::new(opponent, GameResult::Win)
    }

    /// A draw against `opponent`
    pub fn draw(opponent: PlayerRating) -> Self {
        Self::new(opponent, GameResult::Draw)
    }

    /// A loss against `opponent`
    pub fn loss(opponent: PlayerRating) -> Self {
        Self::new(opponent, GameResult::Loss)
    }
}

/// How the volatility for a rating period should be resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VolatilityUpdate {
    /// Solve for the new volatility from the period's outcomes
    Computed,
    /// Use the supplied value verbatim, skipping the solver
    Override(f64),
}
