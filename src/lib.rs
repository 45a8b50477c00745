//! route-planner client core
//!
//! Stop selection, dispatch to a remote route-optimization service,
//! cost comparison, and map layer lifecycle for planning UIs.

pub mod api;
pub mod compare;
pub mod cost;
pub mod dispatch;
pub mod geometry;
pub mod layers;
pub mod node;
pub mod polyline;
pub mod render;
pub mod stops;
pub mod traits;
pub mod workbench;
