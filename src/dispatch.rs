//! Route-request building, dispatch, and result normalization.
//!
//! The dispatcher turns the operator's stop selection into outbound
//! optimization requests, fans comparison mode out to two concurrent
//! calls, and settles every response into a tagged
//! `Result<RouteResult, DispatchError>` exactly once. Nothing downstream
//! ever looks at payload shapes again.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::TransportError;
use crate::polyline::Polyline;
use crate::stops::StopList;
use crate::traits::RouteOptimizer;

/// The optimization algorithms the service understands.
///
/// Wire identifiers are the snake_case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Dijkstra,
    Qaoa,
    Genetic,
    SimulatedAnnealing,
    TwoOpt,
    AntColony,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Dijkstra,
        Algorithm::Qaoa,
        Algorithm::Genetic,
        Algorithm::SimulatedAnnealing,
        Algorithm::TwoOpt,
        Algorithm::AntColony,
    ];

    /// The wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Qaoa => "qaoa",
            Algorithm::Genetic => "genetic",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::TwoOpt => "two_opt",
            Algorithm::AntColony => "ant_colony",
        }
    }

    /// Human-readable name for notifications and labels.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Qaoa => "QAOA",
            Algorithm::Genetic => "Genetic Algorithm",
            Algorithm::SimulatedAnnealing => "Simulated Annealing",
            Algorithm::TwoOpt => "2-Opt",
            Algorithm::AntColony => "Ant Colony",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub stops: Vec<String>,
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot_id: Option<String>,
}

/// A computed route as returned by the optimizer.
///
/// Consumed read-only. `path` lists node ids in travel order (the first
/// and last entry may both be the depot); `route_geometry`, when present,
/// carries road-following coordinates for the whole path. Extra server
/// fields (record ids, endpoints, timestamps) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub algorithm: Algorithm,
    pub path: Vec<String>,
    pub distance: f64,
    pub execution_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_geometry: Option<Polyline>,
}

/// Preconditions checked before any request leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Dispatch needs at least two selected stops.
    #[error("insufficient_stops")]
    InsufficientStops,
    /// Comparison mode needs two distinct algorithms.
    #[error("identical_algorithms")]
    IdenticalAlgorithms,
}

/// The optimizer answered with its error shape instead of a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OptimizationError {
    pub message: String,
}

/// Everything a dispatch can fail with, decided once at the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Optimization(#[from] OptimizationError),
}

/// Settles a raw optimize payload into the tagged outcome.
///
/// The service reports failures as `{"error": ...}` or `{"detail": ...}`
/// bodies, sometimes under a success status, so the body shape is the
/// only signal that matters. A body that is neither a route nor a known
/// error shape is a transport failure.
pub fn normalize_payload(payload: Value) -> Result<RouteResult, DispatchError> {
    for key in ["error", "detail"] {
        if let Some(value) = payload.get(key) {
            let message = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            return Err(OptimizationError { message }.into());
        }
    }

    serde_json::from_value(payload).map_err(|err| {
        DispatchError::from(TransportError::new(format!(
            "malformed optimizer response: {err}"
        )))
    })
}

/// Builds the outbound request for one algorithm.
///
/// Validates the displayed selection (two stops minimum) and applies the
/// depot injection rule via [`StopList::effective_stops`].
pub fn build_request(
    stops: &StopList,
    algorithm: Algorithm,
) -> Result<RouteRequest, ValidationError> {
    if stops.len() < 2 {
        return Err(ValidationError::InsufficientStops);
    }

    Ok(RouteRequest {
        stops: stops.effective_stops(),
        algorithm,
        depot_id: stops.depot().map(str::to_string),
    })
}

/// Dispatches one algorithm.
///
/// Every call issues a fresh outbound request; there is no caching or
/// deduplication, so identical dispatches hit the service again.
pub fn dispatch<O>(
    optimizer: &O,
    stops: &StopList,
    algorithm: Algorithm,
) -> Result<RouteResult, DispatchError>
where
    O: RouteOptimizer + ?Sized,
{
    let request = build_request(stops, algorithm)?;
    info!(
        algorithm = %algorithm,
        stops = request.stops.len(),
        depot = ?request.depot_id,
        "dispatching route request"
    );

    let started = Instant::now();
    let outcome = optimizer.optimize(&request);
    match &outcome {
        Ok(result) => info!(
            algorithm = %algorithm,
            distance_km = result.distance,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "route request settled"
        ),
        Err(err) => warn!(algorithm = %algorithm, error = %err, "route request failed"),
    }
    outcome
}

/// Both sides of a comparison dispatch, settled independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonDispatch {
    pub first: Result<RouteResult, DispatchError>,
    pub second: Result<RouteResult, DispatchError>,
}

impl ComparisonDispatch {
    /// Both results, when both sides succeeded.
    pub fn both(&self) -> Option<(&RouteResult, &RouteResult)> {
        match (&self.first, &self.second) {
            (Ok(first), Ok(second)) => Some((first, second)),
            _ => None,
        }
    }
}

/// Dispatches the same stop selection to two algorithms concurrently.
///
/// Validation happens before anything is sent: identical algorithms or an
/// undersized selection issue zero requests. The two calls fork-join and
/// settle independently; a failure on one side never cancels or masks the
/// other, and no completion order is assumed.
pub fn dispatch_comparison<O>(
    optimizer: &O,
    stops: &StopList,
    first: Algorithm,
    second: Algorithm,
) -> Result<ComparisonDispatch, ValidationError>
where
    O: RouteOptimizer + Sync + ?Sized,
{
    if first == second {
        return Err(ValidationError::IdenticalAlgorithms);
    }
    let first_request = build_request(stops, first)?;
    let second_request = build_request(stops, second)?;

    info!(
        first = %first,
        second = %second,
        stops = first_request.stops.len(),
        "dispatching comparison"
    );

    let (first_outcome, second_outcome) = rayon::join(
        || optimizer.optimize(&first_request),
        || optimizer.optimize(&second_request),
    );

    for (algorithm, outcome) in [(first, &first_outcome), (second, &second_outcome)] {
        match outcome {
            Ok(result) => info!(
                algorithm = %algorithm,
                distance_km = result.distance,
                "comparison side settled"
            ),
            Err(err) => warn!(algorithm = %algorithm, error = %err, "comparison side failed"),
        }
    }

    Ok(ComparisonDispatch {
        first: first_outcome,
        second: second_outcome,
    })
}
