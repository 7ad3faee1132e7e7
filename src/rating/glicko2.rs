//! Glicko-2 rating system implementation
//!
//! This module implements the Glicko-2 algorithm described in Glickman's
//! paper (<http://www.glicko.net/glicko/glicko2.pdf>): a player's rating,
//! rating deviation, and volatility are updated from one rating period of
//! game outcomes. The volatility step solves a one-dimensional root-finding
//! problem with the Illinois variant of false position.
//!
//! All arithmetic is f64. Non-finite inputs are a caller precondition and
//! propagate through the formulas rather than being rejected up front.

use crate::error::RatingError;
use crate::rating::calculator::RatingCalculator;
use crate::types::{
    GameOutcome, PlayerRating, VolatilityUpdate, DEFAULT_DEVIATION, DEFAULT_RATING,
    DEFAULT_VOLATILITY, GLICKO_SCALE,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// System constant (tau) constraining how much volatility can change in
/// one rating period. Smaller values keep volatility more stable.
pub const VOLATILITY_CHANGE: f64 = 0.5;

/// Convergence tolerance for the volatility solver
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Iteration cap for the false-position loop. Realistic inputs converge in
/// well under 30 iterations; past the cap the current estimate is used.
const MAX_SOLVER_ITERATIONS: usize = 100;

/// Step cap for the downhill bracket search. Each step lowers the bracket
/// by tau on the log-variance scale, so 64 steps covers far more than any
/// representable volatility.
const MAX_BRACKET_STEPS: usize = 64;

/// Configuration for the Glicko-2 rating system
///
/// These are the entity-construction defaults handed out for new players.
/// The scale conversion, tau, and solver tolerances are fixed properties
/// of the algorithm and are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glicko2Config {
    /// Initial rating for new players
    pub initial_rating: f64,
    /// Initial rating deviation for new players
    pub initial_deviation: f64,
    /// Initial volatility for new players
    pub initial_volatility: f64,
}

impl Default for Glicko2Config {
    fn default() -> Self {
        Self {
            initial_rating: DEFAULT_RATING,
            initial_deviation: DEFAULT_DEVIATION,
            initial_volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl Glicko2Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        if !self.initial_deviation.is_finite() || self.initial_deviation < 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Initial deviation must be non-negative".to_string(),
            }
            .into());
        }

        if !self.initial_volatility.is_finite() || self.initial_volatility <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Initial volatility must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn sq(x: f64) -> f64 {
    x * x
}

/// Expected score of a player at internal rating `mu` against one opponent.
///
/// The opponent's own uncertainty enters through its g factor, pulling the
/// expectation toward 0.5 when the opponent's rating is unreliable.
fn expected_outcome(mu: f64, opponent: &PlayerRating) -> f64 {
    1.0 / (1.0 + (-opponent.g() * (mu - opponent.internal_rating())).exp())
}

/// Estimated variance of the player's rating from the period's games.
///
/// `None` when the period is empty: an empty sum has no reciprocal, and the
/// deviation update treats the missing term as contributing nothing.
fn estimate_variance(mu: f64, outcomes: &[GameOutcome]) -> Option<f64> {
    if outcomes.is_empty() {
        return None;
    }

    let sum: f64 = outcomes
        .iter()
        .map(|game| {
            let e = expected_outcome(mu, &game.opponent);
            sq(game.opponent.g()) * e * (1.0 - e)
        })
        .sum();

    Some(1.0 / sum)
}

/// Sum of down-weighted score surprises across the period
fn outcome_sum(mu: f64, outcomes: &[GameOutcome]) -> f64 {
    outcomes
        .iter()
        .map(|game| {
            game.opponent.g() * (game.result.score() - expected_outcome(mu, &game.opponent))
        })
        .sum()
}

/// The function whose root on the log-variance scale is the new volatility
fn volatility_fn(x: f64, delta_sq: f64, phi_sq: f64, variance: f64, a: f64) -> f64 {
    let ex = x.exp();
    let num = ex * (delta_sq - phi_sq - variance - ex);
    let den = 2.0 * sq(phi_sq + variance + ex);

    num / den - (x - a) / sq(VOLATILITY_CHANGE)
}

/// Solve for the period's new volatility.
///
/// Brackets the root starting from `a = ln(sigma^2)` and runs the Illinois
/// variant of false position until the bracket is narrower than
/// [`CONVERGENCE_TOLERANCE`]. Hitting [`MAX_SOLVER_ITERATIONS`] first logs
/// a warning and uses the current estimate; failing to bracket at all
/// (possible only with non-finite inputs) is an error.
fn solve_volatility(sigma: f64, delta: f64, phi: f64, variance: f64) -> crate::error::Result<f64> {
    let a = sq(sigma).ln();
    let delta_sq = sq(delta);
    let phi_sq = sq(phi);

    let mut lower = a;
    let mut upper = if delta_sq > phi_sq + variance {
        (delta_sq - phi_sq - variance).ln()
    } else {
        // Walk downhill in tau-sized steps until the function turns
        // non-negative.
        let mut k = 1;
        loop {
            let x = a - k as f64 * VOLATILITY_CHANGE;
            if volatility_fn(x, delta_sq, phi_sq, variance, a) >= 0.0 {
                break x;
            }
            k += 1;
            if k > MAX_BRACKET_STEPS {
                return Err(RatingError::VolatilityDivergence {
                    steps: MAX_BRACKET_STEPS,
                }
                .into());
            }
        }
    };

    let mut f_lower = volatility_fn(lower, delta_sq, phi_sq, variance, a);
    let mut f_upper = volatility_fn(upper, delta_sq, phi_sq, variance, a);

    let mut iterations = 0;
    while (upper - lower).abs() > CONVERGENCE_TOLERANCE {
        if iterations >= MAX_SOLVER_ITERATIONS {
            warn!(
                iterations,
                bracket = (upper - lower).abs(),
                "volatility solver hit iteration cap before tolerance"
            );
            break;
        }
        iterations += 1;

        let c = lower + (lower - upper) * f_lower / (f_upper - f_lower);
        let f_c = volatility_fn(c, delta_sq, phi_sq, variance, a);

        if f_c * f_upper < 0.0 {
            lower = upper;
            f_lower = f_upper;
        } else {
            // Illinois step: halve the retained endpoint's weight so the
            // bracket cannot stall on one side.
            f_lower /= 2.0;
        }

        upper = c;
        f_upper = f_c;
    }

    Ok((lower / 2.0).exp())
}

/// Glicko-2 rating calculator
#[derive(Debug, Clone)]
pub struct Glicko2Calculator {
    config: Glicko2Config,
}

impl Glicko2Calculator {
    /// Create a new Glicko-2 calculator
    pub fn new(config: Glicko2Config) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Expected score of `player` against a single opponent.
    ///
    /// Equal ratings give 0.5 regardless of either side's uncertainty.
    pub fn expected_score(&self, player: &PlayerRating, opponent: &PlayerRating) -> f64 {
        expected_outcome(player.internal_rating(), opponent)
    }
}

impl RatingCalculator for Glicko2Calculator {
    fn rate_period(
        &self,
        competitor: &PlayerRating,
        outcomes: &[GameOutcome],
        volatility: VolatilityUpdate,
    ) -> crate::error::Result<PlayerRating> {
        let mu = competitor.internal_rating();
        let phi = competitor.internal_deviation();

        let variance = estimate_variance(mu, outcomes);

        let new_volatility = match (volatility, variance) {
            (VolatilityUpdate::Override(value), _) => value,
            // Nothing was observed this period, so the expected
            // fluctuation stays as it was.
            (VolatilityUpdate::Computed, None) => competitor.volatility,
            (VolatilityUpdate::Computed, Some(v)) => {
                let delta = v * outcome_sum(mu, outcomes);
                solve_volatility(competitor.volatility, delta, phi, v)?
            }
        };

        // The deviation first widens with volatility, then tightens with
        // the period's information.
        let pre_period_deviation = (sq(phi) + sq(new_volatility)).sqrt();
        let new_deviation = match variance {
            Some(v) => 1.0 / (1.0 / sq(pre_period_deviation) + 1.0 / v).sqrt(),
            None => pre_period_deviation,
        };

        // An empty period still widens the deviation, but the rating and
        // volatility carry over untouched.
        if outcomes.is_empty() {
            return Ok(PlayerRating {
                deviation: new_deviation * GLICKO_SCALE,
                ..*competitor
            });
        }

        let new_rating = mu + sq(new_deviation) * outcome_sum(mu, outcomes);

        let updated = PlayerRating {
            rating: new_rating * GLICKO_SCALE + DEFAULT_RATING,
            deviation: new_deviation * GLICKO_SCALE,
            volatility: new_volatility,
        };

        debug!(
            games = outcomes.len(),
            rating = updated.rating,
            deviation = updated.deviation,
            volatility = updated.volatility,
            "rating period applied"
        );

        Ok(updated)
    }

    fn initial_rating(&self) -> PlayerRating {
        PlayerRating::new(
            self.config.initial_rating,
            self.config.initial_deviation,
            self.config.initial_volatility,
        )
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: Glicko2Config =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid Glicko-2 configuration: {}", e),
            })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}
