//! Route cost model.
//!
//! Prices a route distance under the operator's cost settings. The
//! computation is pure; settings live wherever the caller keeps them and
//! are replaced wholesale when edited.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operator-tunable cost parameters.
///
/// All three values must be finite and strictly positive. Matches the
/// `/api/settings` payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSettings {
    pub fuel_cost_per_km: f64,
    pub driver_wage_per_hour: f64,
    pub vehicle_speed_kmh: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            fuel_cost_per_km: 8.5,
            driver_wage_per_hour: 150.0,
            vehicle_speed_kmh: 40.0,
        }
    }
}

impl CostSettings {
    /// Rejects settings the cost model is undefined for, naming the
    /// first offending field.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        let fields = [
            ("fuel_cost_per_km", self.fuel_cost_per_km),
            ("driver_wage_per_hour", self.driver_wage_per_hour),
            ("vehicle_speed_kmh", self.vehicle_speed_kmh),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidConfiguration { field, value });
            }
        }
        Ok(())
    }
}

/// A cost setting the model cannot price under. Distinct from transport
/// failures: nothing was sent anywhere.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid cost configuration: {field} must be a positive number (got {value})")]
pub struct InvalidConfiguration {
    pub field: &'static str,
    pub value: f64,
}

/// Cost estimate for a route distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub fuel_cost: f64,
    pub driver_cost: f64,
    pub total_cost: f64,
    pub eta_minutes: f64,
}

/// Prices `distance_km` under `settings`.
///
/// Fails with [`InvalidConfiguration`] rather than dividing by a
/// non-positive vehicle speed.
pub fn compute_cost(
    distance_km: f64,
    settings: &CostSettings,
) -> Result<CostBreakdown, InvalidConfiguration> {
    settings.validate()?;

    let fuel_cost = distance_km * settings.fuel_cost_per_km;
    let travel_hours = distance_km / settings.vehicle_speed_kmh;
    let driver_cost = travel_hours * settings.driver_wage_per_hour;

    Ok(CostBreakdown {
        fuel_cost,
        driver_cost,
        total_cost: fuel_cost + driver_cost,
        eta_minutes: travel_hours * 60.0,
    })
}
