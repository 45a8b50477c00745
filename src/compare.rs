//! Head-to-head scoring of two computed routes.

use serde::Serialize;

use crate::cost::{CostSettings, InvalidConfiguration, compute_cost};
use crate::dispatch::{Algorithm, RouteResult};

/// Verdict of comparing two routes on total operating cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonOutcome {
    pub winner: Algorithm,
    /// Absolute cost gap between the two routes.
    pub savings_amount: f64,
    /// Gap relative to the more expensive route, as a percentage.
    pub savings_percent: f64,
}

/// Scores two routes under one cost settings set.
///
/// The cheaper total cost wins; an exact tie names the second operand's
/// algorithm. Savings are relative to the more expensive route and are 0
/// when both routes cost nothing.
pub fn compare(
    first: &RouteResult,
    second: &RouteResult,
    settings: &CostSettings,
) -> Result<ComparisonOutcome, InvalidConfiguration> {
    let first_cost = compute_cost(first.distance, settings)?.total_cost;
    let second_cost = compute_cost(second.distance, settings)?.total_cost;

    let winner = if first_cost < second_cost {
        first.algorithm
    } else {
        second.algorithm
    };

    let savings_amount = (first_cost - second_cost).abs();
    let max_cost = first_cost.max(second_cost);
    let savings_percent = if max_cost > 0.0 {
        savings_amount / max_cost * 100.0
    } else {
        0.0
    };

    Ok(ComparisonOutcome {
        winner,
        savings_amount,
        savings_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(algorithm: Algorithm, distance: f64) -> RouteResult {
        RouteResult {
            algorithm,
            path: vec!["a".to_string(), "b".to_string()],
            distance,
            execution_time: 0.5,
            route_geometry: None,
        }
    }

    #[test]
    fn test_cheaper_route_wins() {
        // 100 km => 1225.0 total, 80 km => 980.0 total at default settings.
        let outcome = compare(
            &route(Algorithm::Dijkstra, 100.0),
            &route(Algorithm::Qaoa, 80.0),
            &CostSettings::default(),
        )
        .expect("valid settings");

        assert_eq!(outcome.winner, Algorithm::Qaoa);
        assert!((outcome.savings_amount - 245.0).abs() < 1e-9);
        assert!((outcome.savings_percent - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_operand_can_win() {
        let outcome = compare(
            &route(Algorithm::Genetic, 50.0),
            &route(Algorithm::TwoOpt, 70.0),
            &CostSettings::default(),
        )
        .expect("valid settings");

        assert_eq!(outcome.winner, Algorithm::Genetic);
    }

    #[test]
    fn test_tie_resolves_to_second_algorithm() {
        let outcome = compare(
            &route(Algorithm::Dijkstra, 42.0),
            &route(Algorithm::AntColony, 42.0),
            &CostSettings::default(),
        )
        .expect("valid settings");

        assert_eq!(outcome.winner, Algorithm::AntColony);
        assert_eq!(outcome.savings_amount, 0.0);
        assert_eq!(outcome.savings_percent, 0.0);
    }

    #[test]
    fn test_zero_cost_pair_has_zero_percent() {
        let outcome = compare(
            &route(Algorithm::Dijkstra, 0.0),
            &route(Algorithm::Qaoa, 0.0),
            &CostSettings::default(),
        )
        .expect("valid settings");

        assert_eq!(outcome.winner, Algorithm::Qaoa);
        assert_eq!(outcome.savings_percent, 0.0, "no NaN from a 0/0 ratio");
    }

    #[test]
    fn test_operand_order_does_not_change_the_verdict() {
        let dijkstra = route(Algorithm::Dijkstra, 90.0);
        let genetic = route(Algorithm::Genetic, 60.0);
        let settings = CostSettings::default();

        let forward = compare(&dijkstra, &genetic, &settings).expect("valid");
        let reversed = compare(&genetic, &dijkstra, &settings).expect("valid");

        assert_eq!(forward.winner, reversed.winner);
        assert_eq!(forward.savings_amount, reversed.savings_amount);
        assert_eq!(forward.savings_percent, reversed.savings_percent);
    }

    #[test]
    fn test_invalid_settings_propagate() {
        let settings = CostSettings {
            vehicle_speed_kmh: 0.0,
            ..CostSettings::default()
        };
        let err = compare(
            &route(Algorithm::Dijkstra, 10.0),
            &route(Algorithm::Qaoa, 12.0),
            &settings,
        )
        .expect_err("zero speed");
        assert_eq!(err.field, "vehicle_speed_kmh");
    }
}
