//! Real Coimbatore locations for realistic test fixtures.
//!
//! The first group mirrors the sample city the service seeds on demand;
//! the rest are additional real places around the metro area for larger
//! working sets.

use route_planner::node::Node;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Sample city (what POST /api/nodes/sample seeds)
// ============================================================================

pub const SAMPLE_CITY: &[Location] = &[
    Location::new("Gandhipuram Central Bus Stand", 11.0183, 76.9685),
    Location::new("Coimbatore Junction Railway Station", 10.9945, 76.9654),
    Location::new("Annapoorna Restaurant, RS Puram", 11.0072, 76.9515),
    Location::new("Warehouse, SIDCO Industrial Estate", 10.9580, 76.9298),
    Location::new("Distribution Center, Peelamedu", 11.0305, 77.0301),
    Location::new("Customer 1, Saibaba Colony", 11.0286, 76.9500),
    Location::new("Customer 2, Race Course Road", 11.0008, 76.9792),
    Location::new("Textile Mill, Avinashi Road", 11.0451, 77.0655),
    Location::new("BrookeFields Mall", 11.0084, 76.9598),
    Location::new("Tidel Park Coimbatore", 11.0238, 77.0294),
];

// ============================================================================
// Wider metro area (good for bigger working sets)
// ============================================================================

pub const METRO_LOCATIONS: &[Location] = &[
    Location::new("Town Hall", 10.9925, 76.9608),
    Location::new("Ukkadam Bus Stand", 10.9893, 76.9563),
    Location::new("Singanallur Bus Stand", 11.0045, 77.0277),
    Location::new("Saravanampatti", 11.0770, 77.0048),
    Location::new("Kuniyamuthur", 10.9703, 76.9454),
    Location::new("PSG College, Peelamedu", 11.0245, 77.0028),
    Location::new("Codissia Trade Fair Complex", 11.0343, 77.0432),
    Location::new("Perur Pateeswarar Temple", 10.9763, 76.9119),
];

/// Sample city as ready-made nodes with stable ids `n1..n10`.
pub fn sample_city_nodes() -> Vec<Node> {
    SAMPLE_CITY
        .iter()
        .enumerate()
        .map(|(index, location)| Node {
            id: format!("n{}", index + 1),
            name: location.name.to_string(),
            lat: location.lat,
            lng: location.lng,
            is_depot: false,
        })
        .collect()
}

/// Sample city plus the wider metro area, ids continuing `n11..`.
pub fn all_locations() -> Vec<Node> {
    let mut nodes = sample_city_nodes();
    nodes.extend(METRO_LOCATIONS.iter().enumerate().map(|(index, location)| Node {
        id: format!("n{}", SAMPLE_CITY.len() + index + 1),
        name: location.name.to_string(),
        lat: location.lat,
        lng: location.lng,
        is_depot: false,
    }));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_city_count() {
        assert_eq!(SAMPLE_CITY.len(), 10, "the service seeds exactly 10 nodes");
    }

    #[test]
    fn test_coordinates_in_coimbatore_area() {
        for node in all_locations() {
            assert!(
                node.lat > 10.9 && node.lat < 11.1,
                "{} lat out of range: {}",
                node.name,
                node.lat
            );
            assert!(
                node.lng > 76.8 && node.lng < 77.2,
                "{} lng out of range: {}",
                node.name,
                node.lng
            );
        }
    }

    #[test]
    fn test_node_ids_are_unique() {
        let nodes = all_locations();
        let mut ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), nodes.len());
    }
}
