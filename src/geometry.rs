//! Route geometry resolution and geodesy helpers.
//!
//! Distances use great-circle math; positions along a line are linear
//! interpolations between vertices, which is accurate at the segment
//! lengths a road polyline carries.

use serde::Serialize;
use tracing::warn;

use crate::dispatch::RouteResult;
use crate::node::NodeIndex;
use crate::polyline::Polyline;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// First arrowhead sits this fraction along the line.
pub const ARROW_FIRST_OFFSET: f64 = 0.10;

/// Later arrowheads repeat at this fraction of the total length.
pub const ARROW_REPEAT: f64 = 0.15;

/// Hard ceiling on arrowheads for a single line.
pub const MAX_ARROWS_PER_LINE: usize = 256;

/// Great-circle distance between two `(lat, lng)` points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Total great-circle length of a point chain in kilometers.
pub fn path_length_km(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

/// Coordinate midpoint of two points.
///
/// Planar average, which matches where a map pane centers a label
/// between two markers.
pub fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Initial great-circle bearing from one point toward another.
///
/// Degrees clockwise from north, in `[0, 360)`.
pub fn bearing_deg(from: (f64, f64), to: (f64, f64)) -> f64 {
    let lat1 = from.0.to_radians();
    let lat2 = to.0.to_radians();
    let delta_lng = (to.1 - from.1).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();
    let degrees = y.atan2(x).to_degrees();

    (degrees + 360.0) % 360.0
}

/// Picks the drawable line for a computed route.
///
/// Server geometry wins whenever it is present and non-empty, verbatim
/// and regardless of what the path would yield. Otherwise the path falls
/// back to straight lines between node coordinates; ids missing from the
/// working set are dropped, and a fallback that resolves fewer than two
/// points yields an empty, non-drawable line.
pub fn resolve_route_geometry(result: &RouteResult, nodes: &NodeIndex) -> Polyline {
    if let Some(geometry) = &result.route_geometry {
        if !geometry.is_empty() {
            return geometry.clone();
        }
    }

    let mut points = Vec::with_capacity(result.path.len());
    let mut dropped = 0usize;
    for id in &result.path {
        match nodes.coords(id) {
            Some(coords) => points.push(coords),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(
            dropped,
            algorithm = %result.algorithm,
            "route path references ids missing from the working set"
        );
    }

    if points.len() < 2 {
        return Polyline::default();
    }
    Polyline::new(points)
}

/// Placement for one directional arrowhead along a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowAnchor {
    pub position: (f64, f64),
    /// Direction of travel at this point, degrees clockwise from north.
    pub bearing: f64,
}

/// Computes arrowhead placements along a drawable line.
///
/// Anchors sit at `first_offset`, then every `repeat`, as fractions of
/// the total length. Fractions at or past the end are skipped: the end
/// of the line already carries the destination marker. At most
/// [`MAX_ARROWS_PER_LINE`] anchors are placed, however small `repeat`
/// is. Non-drawable or zero-length lines get no anchors.
pub fn arrow_anchors(line: &Polyline, first_offset: f64, repeat: f64) -> Vec<ArrowAnchor> {
    let points = line.points();
    if points.len() < 2 || !(repeat > 0.0) || !first_offset.is_finite() {
        return Vec::new();
    }

    // Segments of zero length cannot orient an arrow; skip them.
    struct Segment {
        from: (f64, f64),
        to: (f64, f64),
        start_km: f64,
        len_km: f64,
    }

    let mut segments = Vec::with_capacity(points.len() - 1);
    let mut total_km = 0.0;
    for pair in points.windows(2) {
        let len_km = haversine_km(pair[0], pair[1]);
        if len_km > 0.0 {
            segments.push(Segment {
                from: pair[0],
                to: pair[1],
                start_km: total_km,
                len_km,
            });
        }
        total_km += len_km;
    }
    if segments.is_empty() {
        return Vec::new();
    }

    let mut anchors = Vec::new();
    for step in 0..MAX_ARROWS_PER_LINE {
        let fraction = first_offset + step as f64 * repeat;
        if fraction >= 1.0 - 1e-9 {
            break;
        }
        if fraction < 0.0 {
            continue;
        }

        let target_km = fraction * total_km;
        let segment = segments
            .iter()
            .find(|s| target_km <= s.start_km + s.len_km)
            .unwrap_or(&segments[segments.len() - 1]);
        let t = ((target_km - segment.start_km) / segment.len_km).clamp(0.0, 1.0);

        anchors.push(ArrowAnchor {
            position: (
                segment.from.0 + (segment.to.0 - segment.from.0) * t,
                segment.from.1 + (segment.to.1 - segment.from.1) * t,
            ),
            bearing: bearing_deg(segment.from, segment.to),
        });
    }

    anchors
}
