//! Layer vocabulary for map surfaces.
//!
//! A [`Layer`](crate::layers::Layer) is one drawable unit: a marker, a
//! route line, its arrowhead decorator, or a segment label. Surfaces only
//! create and destroy layers; everything about which layers exist at a
//! given moment is the renderer's business.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::geometry::ArrowAnchor;
use crate::traits::{LayerHandle, MapSurface};

/// Glyph shown for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    /// A working-set node; selection and depot state drive the glyph.
    Node { selected: bool, depot: bool },
    /// First stop of a displayed route.
    Start,
    /// Final stop of a displayed route.
    End,
    /// Interior route stop, numbered from 1 in travel order after the
    /// start.
    Stop(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: (f64, f64),
    pub icon: MarkerIcon,
    pub title: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub points: Vec<(f64, f64)>,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub dashed: bool,
}

/// Arrowheads drawn along a route line to show travel direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowDecorator {
    pub anchors: Vec<ArrowAnchor>,
    pub color: &'static str,
}

/// Per-leg annotation centered between two consecutive route stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentLabel {
    pub position: (f64, f64),
    pub text: String,
}

/// One drawable unit on a map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Marker(Marker),
    Line(RouteLine),
    Decorator(ArrowDecorator),
    Label(SegmentLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Marker,
    Line,
    Decorator,
    Label,
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Marker(_) => LayerKind::Marker,
            Layer::Line(_) => LayerKind::Line,
            Layer::Decorator(_) => LayerKind::Decorator,
            Layer::Label(_) => LayerKind::Label,
        }
    }
}

/// In-memory [`MapSurface`] retaining the live layer set.
///
/// Serves as the test double and as the handoff encoder: a GUI binding
/// can mirror [`MemorySurface::layers`] directly or take a
/// [`MemorySurface::geojson`] snapshot wholesale.
#[derive(Debug, Default)]
pub struct MemorySurface {
    layers: BTreeMap<u64, Layer>,
    next_handle: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn count_of(&self, kind: LayerKind) -> usize {
        self.layers.values().filter(|l| l.kind() == kind).count()
    }

    /// Live layers in creation order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// GeoJSON snapshot of everything currently displayed.
    pub fn geojson(&self) -> Value {
        let features: Vec<Value> = self.layers.values().map(feature_for).collect();
        json!({"type": "FeatureCollection", "features": features})
    }
}

impl MapSurface for MemorySurface {
    fn add_layer(&mut self, layer: Layer) -> LayerHandle {
        let raw = self.next_handle;
        self.next_handle += 1;
        self.layers.insert(raw, layer);
        LayerHandle::new(raw)
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.layers.remove(&handle.raw());
    }
}

// GeoJSON positions are [lng, lat].
fn lng_lat((lat, lng): (f64, f64)) -> Value {
    json!([lng, lat])
}

fn icon_value(icon: MarkerIcon) -> Value {
    match icon {
        MarkerIcon::Node { selected, depot } => {
            json!({"node": {"selected": selected, "depot": depot}})
        }
        MarkerIcon::Start => json!("start"),
        MarkerIcon::End => json!("end"),
        MarkerIcon::Stop(position) => json!({"stop": position}),
    }
}

fn feature_for(layer: &Layer) -> Value {
    match layer {
        Layer::Marker(marker) => json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": lng_lat(marker.position)},
            "properties": {
                "kind": "marker",
                "icon": icon_value(marker.icon),
                "title": marker.title,
                "color": marker.color,
            },
        }),
        Layer::Line(line) => json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": line.points.iter().map(|p| lng_lat(*p)).collect::<Vec<_>>(),
            },
            "properties": {
                "kind": "route",
                "color": line.color,
                "weight": line.weight,
                "opacity": line.opacity,
                "dashed": line.dashed,
            },
        }),
        Layer::Decorator(decorator) => json!({
            "type": "Feature",
            "geometry": {
                "type": "MultiPoint",
                "coordinates": decorator
                    .anchors
                    .iter()
                    .map(|a| lng_lat(a.position))
                    .collect::<Vec<_>>(),
            },
            "properties": {
                "kind": "arrows",
                "color": decorator.color,
                "bearings": decorator.anchors.iter().map(|a| a.bearing).collect::<Vec<_>>(),
            },
        }),
        Layer::Label(label) => json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": lng_lat(label.position)},
            "properties": {"kind": "label", "text": label.text},
        }),
    }
}
