//! Test fixtures for route-planner.
//!
//! Provides realistic test data including:
//! - Real Coimbatore locations (the service's bundled sample city)
//! - A scripted local HTTP server for client tests

pub mod coimbatore_locations;
pub mod mock_api;

pub use coimbatore_locations::*;
