//! Node model and session working set.
//!
//! Nodes are owned by the external node-management service. Once fetched
//! they are immutable for the rest of the planning session; edits go
//! through the service and a fresh fetch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A geographic stop candidate.
///
/// Wire payloads may carry extra server-side fields (record ids,
/// timestamps); those are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub is_depot: bool,
}

impl Node {
    /// Location as a (lat, lng) pair.
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Payload for creating or updating a node through the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDraft {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub is_depot: bool,
}

/// Distance-weighted link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(rename = "from")]
    pub from_id: String,
    #[serde(rename = "to")]
    pub to_id: String,
    /// Great-circle distance in kilometers.
    pub weight: f64,
}

/// The working set as the service lays it out for map overlays: every
/// node, plus one weighted edge per unordered node pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphVisualization {
    pub nodes: Vec<Node>,
    pub edges: Vec<GraphEdge>,
}

/// Id lookup over the session's working set of nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    by_id: HashMap<String, Node>,
}

impl NodeIndex {
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let by_id = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id)
    }

    pub fn coords(&self, id: &str) -> Option<(f64, f64)> {
        self.by_id.get(id).map(Node::coords)
    }

    /// Display name for an id, falling back to the id itself.
    pub fn name_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id.get(id).map_or(id, |node| node.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
