//! Polyline representation for route geometries.
//!
//! This module provides a type for working with route geometry as a
//! decoded coordinate sequence. The optimizer ships geometry as a bare
//! JSON array of `[lat, lng]` pairs, so the type serializes transparently
//! to that shape; no compact encoding is used anywhere in the core.

use serde::{Deserialize, Serialize};

/// A polyline representing a route geometry as decoded coordinates.
///
/// Stores latitude/longitude points directly for internal processing.
/// On the wire this is exactly the optimizer's `[[lat, lng], ...]` form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether there are enough points to draw a line segment.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

impl From<Vec<(f64, f64)>> for Polyline {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}
