//! Property tests for the rating calculations

use glicko_engine::rating::{Glicko2Calculator, Glicko2Config, RatingCalculator};
use glicko_engine::types::{GameOutcome, GameResult, PlayerRating, VolatilityUpdate};
use proptest::prelude::*;

fn calculator() -> Glicko2Calculator {
    Glicko2Calculator::new(Glicko2Config::default()).unwrap()
}

fn arb_result() -> impl Strategy<Value = GameResult> {
    prop_oneof![
        Just(GameResult::Loss),
        Just(GameResult::Draw),
        Just(GameResult::Win),
    ]
}

proptest! {
    #[test]
    fn expected_score_is_a_probability(
        rating in 0.0..3000.0f64,
        opp_rating in 0.0..3000.0f64,
        opp_deviation in 0.0..350.0f64,
    ) {
        let calculator = calculator();
        let player = PlayerRating::new(rating, 200.0, 0.06);
        let opponent = PlayerRating::new(opp_rating, opp_deviation, 0.06);

        let expected = calculator.expected_score(&player, &opponent);
        prop_assert!((0.0..=1.0).contains(&expected));
    }

    #[test]
    fn equal_ratings_are_a_coin_flip(
        rating in 0.0..3000.0f64,
        deviation in 0.0..350.0f64,
    ) {
        let calculator = calculator();
        let player = PlayerRating::new(rating, 200.0, 0.06);
        let opponent = PlayerRating::new(rating, deviation, 0.06);

        let expected = calculator.expected_score(&player, &opponent);
        prop_assert!((expected - 0.5).abs() < 1e-12);
    }

    #[test]
    fn g_decreases_with_deviation(
        deviation in 0.0..340.0f64,
        extra in 1.0..200.0f64,
    ) {
        let tighter = PlayerRating::new(1500.0, deviation, 0.06);
        let wider = PlayerRating::new(1500.0, deviation + extra, 0.06);

        prop_assert!(tighter.g() > wider.g());
        prop_assert!(tighter.g() <= 1.0);
        prop_assert!(wider.g() > 0.0);
    }

    #[test]
    fn deviation_is_never_negative(
        rating in 500.0..2500.0f64,
        deviation in 1.0..350.0f64,
        opp_rating in 500.0..2500.0f64,
        opp_deviation in 1.0..350.0f64,
        result in arb_result(),
    ) {
        let calculator = calculator();
        let competitor = PlayerRating::new(rating, deviation, 0.06);
        let opponent = PlayerRating::new(opp_rating, opp_deviation, 0.06);
        let outcomes = vec![GameOutcome::new(opponent, result)];

        let updated = calculator
            .rate_period(&competitor, &outcomes, VolatilityUpdate::Computed)
            .unwrap();
        prop_assert!(updated.deviation >= 0.0);
        prop_assert!(updated.volatility > 0.0);
    }

    #[test]
    fn empty_period_only_widens_deviation(
        rating in 500.0..2500.0f64,
        deviation in 0.0..350.0f64,
    ) {
        let calculator = calculator();
        let competitor = PlayerRating::new(rating, deviation, 0.06);

        let updated = calculator
            .rate_period(&competitor, &[], VolatilityUpdate::Computed)
            .unwrap();
        prop_assert_eq!(updated.rating, competitor.rating);
        prop_assert_eq!(updated.volatility, competitor.volatility);
        prop_assert!(updated.deviation >= competitor.deviation);
    }

    #[test]
    fn override_is_always_echoed(
        override_volatility in 0.001..0.5f64,
        opp_rating in 500.0..2500.0f64,
        result in arb_result(),
    ) {
        let calculator = calculator();
        let competitor = PlayerRating::new(1500.0, 200.0, 0.06);
        let opponent = PlayerRating::new(opp_rating, 150.0, 0.06);
        let outcomes = vec![GameOutcome::new(opponent, result)];

        let updated = calculator
            .rate_period(
                &competitor,
                &outcomes,
                VolatilityUpdate::Override(override_volatility),
            )
            .unwrap();
        prop_assert_eq!(updated.volatility, override_volatility);
    }
}
