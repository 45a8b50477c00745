//! HTTP adapter for the optimization service.
//!
//! Thin blocking client over the service's REST surface. Every method
//! maps to one endpoint; the only interpretation done here is on the
//! optimize call, whose body is settled through
//! [`normalize_payload`](crate::dispatch::normalize_payload) no matter
//! what status code it arrived under.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::cost::CostSettings;
use crate::dispatch::{DispatchError, RouteRequest, RouteResult, normalize_payload};
use crate::node::{GraphVisualization, Node, NodeDraft};
use crate::traits::RouteOptimizer;

/// A request that never produced a usable service payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// All nodes the service currently knows.
    pub fn fetch_nodes(&self) -> Result<Vec<Node>, TransportError> {
        let nodes = self
            .client
            .get(self.url("/nodes"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(nodes)
    }

    pub fn create_node(&self, draft: &NodeDraft) -> Result<Node, TransportError> {
        let node = self
            .client
            .post(self.url("/nodes"))
            .json(draft)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(node)
    }

    pub fn update_node(&self, id: &str, draft: &NodeDraft) -> Result<Node, TransportError> {
        let node = self
            .client
            .put(self.url(&format!("/nodes/{id}")))
            .json(draft)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(node)
    }

    pub fn delete_node(&self, id: &str) -> Result<(), TransportError> {
        self.client
            .delete(self.url(&format!("/nodes/{id}")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// Loads the service's bundled sample city and returns the new set.
    pub fn seed_sample_nodes(&self) -> Result<Vec<Node>, TransportError> {
        #[derive(Debug, Deserialize)]
        struct SeedResponse {
            nodes: Vec<Node>,
        }

        let response: SeedResponse = self
            .client
            .post(self.url("/nodes/sample"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.nodes)
    }

    /// The working set as a graph overlay: every node plus a
    /// distance-weighted edge per node pair.
    pub fn fetch_graph_visualization(&self) -> Result<GraphVisualization, TransportError> {
        let graph = self
            .client
            .get(self.url("/graph/visualization"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(graph)
    }

    /// Previously computed routes, as the service orders them.
    pub fn fetch_results(&self) -> Result<Vec<RouteResult>, TransportError> {
        let results = self
            .client
            .get(self.url("/route/results"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(results)
    }

    pub fn fetch_settings(&self) -> Result<CostSettings, TransportError> {
        let settings = self
            .client
            .get(self.url("/settings"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(settings)
    }

    /// Replaces the service-side cost settings, returning the stored set.
    pub fn push_settings(&self, settings: &CostSettings) -> Result<CostSettings, TransportError> {
        let stored = self
            .client
            .put(self.url("/settings"))
            .json(settings)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(stored)
    }
}

impl RouteOptimizer for ApiClient {
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, DispatchError> {
        let response = self
            .client
            .post(self.url("/route/optimize"))
            .json(request)
            .send()
            .map_err(TransportError::from)?;

        // The body shape decides the outcome; the status only flavors
        // logs. Optimizer failures arrive as error payloads under
        // success and failure statuses alike.
        let status = response.status();
        let payload: Value = response.json().map_err(TransportError::from)?;
        debug!(status = status.as_u16(), "optimize response received");

        normalize_payload(payload)
    }
}
