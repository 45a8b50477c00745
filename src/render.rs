//! Map rendering lifecycle.
//!
//! The renderer owns its surface and every handle it created, grouped by
//! purpose: the node marker set and one layer group per route slot. A
//! group is always replaced as a unit: its old handles are removed
//! before any new layer is drawn, so re-renders never leak handles and
//! never interleave stale and fresh layers. Callers simply do not
//! re-render on upstream failure, which leaves the previous picture
//! intact.

use tracing::debug;

use crate::dispatch::{Algorithm, RouteResult};
use crate::geometry::{self, ARROW_FIRST_OFFSET, ARROW_REPEAT};
use crate::layers::{ArrowDecorator, Layer, Marker, MarkerIcon, RouteLine, SegmentLabel};
use crate::node::{Node, NodeIndex};
use crate::stops::StopList;
use crate::traits::{LayerHandle, MapSurface};

const NODE_COLOR: &str = "#64748b";
const NODE_SELECTED_COLOR: &str = "#16a34a";
const DEPOT_COLOR: &str = "#7c3aed";
const START_COLOR: &str = "#16a34a";
const END_COLOR: &str = "#dc2626";

const ROUTE_WEIGHT: f64 = 5.0;
const ROUTE_OPACITY: f64 = 0.8;

/// Which display slot a route occupies. Single-route mode uses
/// [`RouteSlot::Primary`]; comparison mode fills both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSlot {
    Primary,
    Secondary,
}

/// Line and accent color for an algorithm's route.
pub fn route_color(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Dijkstra => "#2563eb",
        Algorithm::Qaoa => "#8b5cf6",
        Algorithm::Genetic => "#10b981",
        Algorithm::SimulatedAnnealing => "#f59e0b",
        Algorithm::TwoOpt => "#06b6d4",
        Algorithm::AntColony => "#ef4444",
    }
}

/// Drives one map surface through node and route redraws.
#[derive(Debug)]
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    node_layers: Vec<LayerHandle>,
    primary_layers: Vec<LayerHandle>,
    secondary_layers: Vec<LayerHandle>,
}

impl<S: MapSurface> MapRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            node_layers: Vec::new(),
            primary_layers: Vec::new(),
            secondary_layers: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Redraws the node marker set for the whole working set.
    ///
    /// Selection and depot state come from the stop list; every call
    /// replaces the previous marker set wholesale.
    pub fn render_nodes(&mut self, nodes: &[Node], stops: &StopList) {
        Self::clear_group(&mut self.surface, &mut self.node_layers);

        for node in nodes {
            let selected = stops.contains(&node.id);
            let depot = stops.depot() == Some(node.id.as_str());
            let color = if depot {
                DEPOT_COLOR
            } else if selected {
                NODE_SELECTED_COLOR
            } else {
                NODE_COLOR
            };
            let handle = self.surface.add_layer(Layer::Marker(Marker {
                position: node.coords(),
                icon: MarkerIcon::Node { selected, depot },
                title: node.name.clone(),
                color,
            }));
            self.node_layers.push(handle);
        }

        debug!(markers = self.node_layers.len(), "node markers redrawn");
    }

    /// Draws one computed route into a slot.
    ///
    /// The slot's previous layers are removed first. The line comes from
    /// [`geometry::resolve_route_geometry`]; route markers and segment
    /// labels always follow node coordinates, so they stay meaningful
    /// even under road-following server geometry. A route whose line
    /// cannot draw still shows its resolvable stop markers.
    pub fn render_route(&mut self, slot: RouteSlot, result: &RouteResult, nodes: &NodeIndex) {
        let line = geometry::resolve_route_geometry(result, nodes);
        let color = route_color(result.algorithm);

        let mut layers: Vec<Layer> = Vec::new();
        if line.is_drawable() {
            layers.push(Layer::Line(RouteLine {
                points: line.points().to_vec(),
                color,
                weight: ROUTE_WEIGHT,
                opacity: ROUTE_OPACITY,
                dashed: slot == RouteSlot::Secondary,
            }));
            let anchors = geometry::arrow_anchors(&line, ARROW_FIRST_OFFSET, ARROW_REPEAT);
            if !anchors.is_empty() {
                layers.push(Layer::Decorator(ArrowDecorator { anchors, color }));
            }
        } else {
            debug!(
                algorithm = %result.algorithm,
                "route line not drawable, slot shows markers only"
            );
        }

        let path = &result.path;
        for (position, id) in path.iter().enumerate() {
            let Some(coords) = nodes.coords(id) else {
                continue;
            };
            let icon = if position == 0 {
                MarkerIcon::Start
            } else if position == path.len() - 1 {
                MarkerIcon::End
            } else {
                MarkerIcon::Stop(position)
            };
            let marker_color = match icon {
                MarkerIcon::Start => START_COLOR,
                MarkerIcon::End => END_COLOR,
                _ => color,
            };
            layers.push(Layer::Marker(Marker {
                position: coords,
                icon,
                title: nodes.name_or_id(id).to_string(),
                color: marker_color,
            }));
        }

        for (index, pair) in path.windows(2).enumerate() {
            let (Some(from), Some(to)) = (nodes.coords(&pair[0]), nodes.coords(&pair[1])) else {
                continue;
            };
            layers.push(Layer::Label(SegmentLabel {
                position: geometry::midpoint(from, to),
                text: format!(
                    "{}. {} → {}",
                    index + 1,
                    nodes.name_or_id(&pair[0]),
                    nodes.name_or_id(&pair[1])
                ),
            }));
        }

        let group = match slot {
            RouteSlot::Primary => &mut self.primary_layers,
            RouteSlot::Secondary => &mut self.secondary_layers,
        };
        Self::clear_group(&mut self.surface, group);
        for layer in layers {
            group.push(self.surface.add_layer(layer));
        }

        debug!(slot = ?slot, layers = group.len(), "route slot redrawn");
    }

    /// Removes one slot's layers.
    pub fn clear_route(&mut self, slot: RouteSlot) {
        let group = match slot {
            RouteSlot::Primary => &mut self.primary_layers,
            RouteSlot::Secondary => &mut self.secondary_layers,
        };
        Self::clear_group(&mut self.surface, group);
    }

    /// Removes both route slots, keeping node markers.
    pub fn clear_routes(&mut self) {
        self.clear_route(RouteSlot::Primary);
        self.clear_route(RouteSlot::Secondary);
    }

    /// Removes everything this renderer ever drew.
    pub fn clear(&mut self) {
        Self::clear_group(&mut self.surface, &mut self.node_layers);
        self.clear_routes();
    }

    /// Tears down all layers and hands the bare surface back.
    pub fn unmount(mut self) -> S {
        self.clear();
        self.surface
    }

    fn clear_group(surface: &mut S, handles: &mut Vec<LayerHandle>) {
        for handle in handles.drain(..) {
            surface.remove_layer(handle);
        }
    }
}
