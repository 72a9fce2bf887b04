//! Bulk attribute helpers: label every element from its data, or set/clear one attribute on
//! every node or edge at once.

use crate::attrs::{AttrValue, LabelPosition, PlotGraph};
use crate::color::Color;

/// A node attribute that [`unset_nodes`] can clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAttr {
    Size,
    Color,
    LabelPosition,
    Label,
    Position,
    Data(String),
}

/// An edge attribute that [`unset_edges`] can clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeAttr {
    Width,
    Color,
    Label,
    LabelFraction,
    LabelDistance,
    LabelFlip,
    Data(String),
}

/// Sets every node label.
///
/// With `key == None` the label is the node id. Otherwise it is taken from `data[key]`, and nodes
/// without that key lose their label.
pub fn label_nodes(graph: &mut PlotGraph, key: Option<&str>) {
    graph.for_each_node_mut(|id, attrs| {
        attrs.label = match key {
            None => Some(id.to_string()),
            Some(key) => attrs.data.get(key).map(AttrValue::to_label),
        };
    });
}

/// Sets every edge label from `data[key]`; edges without that key lose their label.
pub fn label_edges(graph: &mut PlotGraph, key: &str) {
    graph.for_each_edge_mut(|_, attrs| {
        attrs.label = attrs.data.get(key).map(AttrValue::to_label);
    });
}

pub fn set_nodes_size(graph: &mut PlotGraph, size: f64) {
    graph.for_each_node_mut(|_, attrs| attrs.size = Some(size));
}

pub fn set_nodes_color(graph: &mut PlotGraph, color: Color) {
    graph.for_each_node_mut(|_, attrs| attrs.color = Some(color));
}

pub fn set_nodes_label_position(graph: &mut PlotGraph, position: LabelPosition) {
    graph.for_each_node_mut(|_, attrs| attrs.label_position = Some(position));
}

pub fn set_nodes_data(graph: &mut PlotGraph, key: &str, value: impl Into<AttrValue>) {
    let value = value.into();
    graph.for_each_node_mut(|_, attrs| {
        attrs.data.insert(key.to_string(), value.clone());
    });
}

pub fn set_edges_width(graph: &mut PlotGraph, width: f64) {
    graph.for_each_edge_mut(|_, attrs| attrs.width = Some(width));
}

pub fn set_edges_color(graph: &mut PlotGraph, color: Color) {
    graph.for_each_edge_mut(|_, attrs| attrs.color = Some(color));
}

pub fn set_edges_label_fraction(graph: &mut PlotGraph, fraction: f64) {
    graph.for_each_edge_mut(|_, attrs| attrs.label_fraction = Some(fraction));
}

pub fn set_edges_label_distance(graph: &mut PlotGraph, distance: f64) {
    graph.for_each_edge_mut(|_, attrs| attrs.label_distance = Some(distance));
}

pub fn set_edges_label_flip(graph: &mut PlotGraph, flip: bool) {
    graph.for_each_edge_mut(|_, attrs| attrs.label_flip = Some(flip));
}

pub fn set_edges_data(graph: &mut PlotGraph, key: &str, value: impl Into<AttrValue>) {
    let value = value.into();
    graph.for_each_edge_mut(|_, attrs| {
        attrs.data.insert(key.to_string(), value.clone());
    });
}

/// Clears `attr` on every node so it falls back to the configured default again.
pub fn unset_nodes(graph: &mut PlotGraph, attr: &NodeAttr) {
    graph.for_each_node_mut(|_, attrs| match attr {
        NodeAttr::Size => attrs.size = None,
        NodeAttr::Color => attrs.color = None,
        NodeAttr::LabelPosition => attrs.label_position = None,
        NodeAttr::Label => attrs.label = None,
        NodeAttr::Position => attrs.position = None,
        NodeAttr::Data(key) => {
            attrs.data.shift_remove(key);
        }
    });
}

/// Clears `attr` on every edge.
pub fn unset_edges(graph: &mut PlotGraph, attr: &EdgeAttr) {
    graph.for_each_edge_mut(|_, attrs| match attr {
        EdgeAttr::Width => attrs.width = None,
        EdgeAttr::Color => attrs.color = None,
        EdgeAttr::Label => attrs.label = None,
        EdgeAttr::LabelFraction => attrs.label_fraction = None,
        EdgeAttr::LabelDistance => attrs.label_distance = None,
        EdgeAttr::LabelFlip => attrs.label_flip = None,
        EdgeAttr::Data(key) => {
            attrs.data.shift_remove(key);
        }
    });
}
