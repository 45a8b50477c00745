//! One planning session wired end to end.
//!
//! The workbench owns the working set, the stop selection, the cost
//! settings, the latest outcomes, and the renderer, and sequences them
//! the way a planning page does: edit the selection, dispatch, redraw.
//! A failed step returns its error and leaves both the stored state and
//! the displayed picture exactly as they were.

use tracing::{info, warn};

use crate::compare::{self, ComparisonOutcome};
use crate::cost::{CostBreakdown, CostSettings, InvalidConfiguration, compute_cost};
use crate::dispatch::{
    self, Algorithm, ComparisonDispatch, DispatchError, RouteResult, ValidationError,
};
use crate::node::{Node, NodeIndex};
use crate::render::{MapRenderer, RouteSlot};
use crate::stops::StopList;
use crate::traits::{MapSurface, RouteOptimizer};

/// Display state of the latest comparison.
///
/// Both sides settle independently; `outcome` is present only when both
/// routes arrived, and tracks the live cost settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub dispatch: ComparisonDispatch,
    pub outcome: Option<ComparisonOutcome>,
}

pub struct Workbench<O, S: MapSurface> {
    optimizer: O,
    renderer: MapRenderer<S>,
    nodes: Vec<Node>,
    index: NodeIndex,
    stops: StopList,
    settings: CostSettings,
    current_route: Option<RouteResult>,
    comparison: Option<ComparisonView>,
}

impl<O, S> Workbench<O, S>
where
    O: RouteOptimizer,
    S: MapSurface,
{
    pub fn new(optimizer: O, surface: S) -> Self {
        Self {
            optimizer,
            renderer: MapRenderer::new(surface),
            nodes: Vec::new(),
            index: NodeIndex::default(),
            stops: StopList::new(),
            settings: CostSettings::default(),
            current_route: None,
            comparison: None,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The optimizer this workbench dispatches through, for callers that
    /// need its wider surface (a client also fetches nodes and history).
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn stops(&self) -> &StopList {
        &self.stops
    }

    pub fn settings(&self) -> &CostSettings {
        &self.settings
    }

    pub fn current_route(&self) -> Option<&RouteResult> {
        self.current_route.as_ref()
    }

    pub fn comparison(&self) -> Option<&ComparisonView> {
        self.comparison.as_ref()
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    /// Tears down every drawn layer and hands the bare surface back.
    pub fn unmount(self) -> S {
        self.renderer.unmount()
    }

    /// Replaces the working set and redraws its markers.
    ///
    /// Stop ids and the depot are pruned if their node disappeared from
    /// the new set; the displayed routes are left alone.
    pub fn load_nodes(&mut self, nodes: Vec<Node>) {
        self.index = NodeIndex::from_nodes(nodes.iter().cloned());
        self.nodes = nodes;

        let before = self.stops.len();
        let mut pruned = StopList::new();
        for id in self.stops.ids() {
            if self.index.get(id).is_some() {
                pruned.add(id.clone());
            }
        }
        pruned.set_depot(
            self.stops
                .depot()
                .filter(|id| self.index.get(id).is_some())
                .map(str::to_string),
        );
        let dropped = before - pruned.len();
        self.stops = pruned;

        if dropped > 0 {
            warn!(dropped, "stop selection pruned after node reload");
        }
        info!(nodes = self.nodes.len(), "working set loaded");
        self.renderer.render_nodes(&self.nodes, &self.stops);
    }

    /// Marker-click behavior: adds a known node to the stop selection.
    /// Clicks on an already-selected node are ignored, as are unknown
    /// ids.
    pub fn add_stop(&mut self, id: &str) -> bool {
        if self.index.get(id).is_none() {
            warn!(id, "ignoring stop for unknown node");
            return false;
        }
        let added = self.stops.add(id);
        if added {
            self.renderer.render_nodes(&self.nodes, &self.stops);
        }
        added
    }

    /// Flips a node's membership in the selection, for list panels that
    /// deselect on a second activation. Returns whether the node is
    /// selected afterwards.
    pub fn toggle_stop(&mut self, id: &str) -> bool {
        if let Some(position) = self.stops.ids().iter().position(|stop| stop == id) {
            self.stops.remove(position);
            self.renderer.render_nodes(&self.nodes, &self.stops);
            return false;
        }
        self.add_stop(id)
    }

    pub fn remove_stop(&mut self, index: usize) -> Option<String> {
        let removed = self.stops.remove(index);
        if removed.is_some() {
            self.renderer.render_nodes(&self.nodes, &self.stops);
        }
        removed
    }

    pub fn move_stop_up(&mut self, index: usize) -> bool {
        self.stops.move_up(index)
    }

    pub fn move_stop_down(&mut self, index: usize) -> bool {
        self.stops.move_down(index)
    }

    pub fn clear_stops(&mut self) {
        self.stops.clear();
        self.renderer.render_nodes(&self.nodes, &self.stops);
    }

    /// Sets or clears the depot. A depot must reference a known node.
    pub fn set_depot(&mut self, id: Option<String>) -> bool {
        if let Some(id) = &id {
            if self.index.get(id).is_none() {
                warn!(id, "ignoring depot for unknown node");
                return false;
            }
        }
        self.stops.set_depot(id);
        self.renderer.render_nodes(&self.nodes, &self.stops);
        true
    }

    /// Dispatches one algorithm and displays the result in the primary
    /// slot, leaving comparison mode.
    ///
    /// On failure the previous picture and stored route survive.
    pub fn optimize(&mut self, algorithm: Algorithm) -> Result<&RouteResult, DispatchError> {
        let result = dispatch::dispatch(&self.optimizer, &self.stops, algorithm)?;

        self.comparison = None;
        self.renderer.clear_route(RouteSlot::Secondary);
        self.renderer
            .render_route(RouteSlot::Primary, &result, &self.index);
        Ok(self.current_route.insert(result))
    }

    /// Dispatches two algorithms concurrently and displays whichever
    /// sides arrived.
    ///
    /// Validation failures send nothing and change nothing. A failed
    /// side clears its slot; the surviving side still displays, and the
    /// cost verdict appears only when both arrived.
    pub fn compare_routes(
        &mut self,
        first: Algorithm,
        second: Algorithm,
    ) -> Result<&ComparisonView, ValidationError>
    where
        O: Sync,
    {
        let outcome =
            dispatch::dispatch_comparison(&self.optimizer, &self.stops, first, second)?;

        self.current_route = None;
        match &outcome.first {
            Ok(result) => self
                .renderer
                .render_route(RouteSlot::Primary, result, &self.index),
            Err(err) => {
                warn!(algorithm = %first, error = %err, "comparison side not displayed");
                self.renderer.clear_route(RouteSlot::Primary);
            }
        }
        match &outcome.second {
            Ok(result) => self
                .renderer
                .render_route(RouteSlot::Secondary, result, &self.index),
            Err(err) => {
                warn!(algorithm = %second, error = %err, "comparison side not displayed");
                self.renderer.clear_route(RouteSlot::Secondary);
            }
        }

        let verdict = outcome
            .both()
            .and_then(|(a, b)| compare::compare(a, b, &self.settings).ok());
        Ok(self.comparison.insert(ComparisonView {
            dispatch: outcome,
            outcome: verdict,
        }))
    }

    /// Replaces the cost settings after validation.
    ///
    /// Invalid settings are rejected wholesale and the previous set
    /// stays live. A displayed comparison verdict is re-scored under the
    /// new settings.
    pub fn update_settings(&mut self, settings: CostSettings) -> Result<(), InvalidConfiguration> {
        settings.validate()?;
        self.settings = settings;

        if let Some(view) = &mut self.comparison {
            view.outcome = view
                .dispatch
                .both()
                .and_then(|(a, b)| compare::compare(a, b, &self.settings).ok());
        }
        Ok(())
    }

    /// Cost breakdown of the displayed single route under the live
    /// settings.
    pub fn current_cost(&self) -> Option<CostBreakdown> {
        // Settings are validated before they are stored, so scoring a
        // stored route cannot fail.
        self.current_route
            .as_ref()
            .and_then(|route| compute_cost(route.distance, &self.settings).ok())
    }

    /// Removes both displayed routes and forgets the outcomes.
    pub fn clear_routes(&mut self) {
        self.current_route = None;
        self.comparison = None;
        self.renderer.clear_routes();
    }
}
