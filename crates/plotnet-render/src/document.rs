//! JSON graph documents and loading them into a positioned [`PlotGraph`].
//!
//! Short attribute names (`labpos`, `labfrac`, `labdist`, `labflip`) match the keys graph files
//! conventionally use; keys that are not recognized are kept as free-form element data.

use crate::attrs::{AttrValue, EdgeAttrs, GraphAttrs, LabelPosition, NodeAttrs, PlotGraph};
use crate::color::Color;
use crate::config::RenderConfig;
use crate::geom::point;
use crate::layout::{LayoutProvider, place};
use crate::normalize::normalize_graph;
use crate::{Error, Result};
use indexmap::IndexMap;
use plotnet_graph::{EdgeKey, GraphOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: GraphAttrs,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Any scalar; the graph keys nodes by its text form, so `1` and `1.0` name the same node
    /// and an edge endpoint of `"1"` finds it. Two records whose ids only collide as text
    /// (`1` and `"1"`) are rejected.
    pub id: AttrValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labpos: Option<LabelPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<AttrValue>,
    #[serde(flatten)]
    pub data: IndexMap<String, AttrValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: AttrValue,
    pub target: AttrValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labfrac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labdist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labflip: Option<AttrValue>,
    #[serde(flatten)]
    pub data: IndexMap<String, AttrValue>,
}

/// Parses a JSON graph document and loads it.
pub fn load_str(
    text: &str,
    provider: &dyn LayoutProvider,
    config: &RenderConfig,
) -> Result<PlotGraph> {
    let doc: GraphDocument = serde_json::from_str(text)?;
    load(&doc, provider, config)
}

/// Builds a positioned graph from `doc`.
///
/// If every node carries both `x` and `y` those positions are used; otherwise `provider` places
/// all nodes. Positions are normalized either way.
pub fn load(
    doc: &GraphDocument,
    provider: &dyn LayoutProvider,
    config: &RenderConfig,
) -> Result<PlotGraph> {
    if doc.multigraph {
        return Err(Error::UnsupportedGraphKind {
            reason: "multigraphs are not supported".to_string(),
        });
    }

    let options = if doc.directed {
        GraphOptions::directed()
    } else {
        GraphOptions::undirected()
    };
    let mut graph = PlotGraph::new(options);
    graph.set_graph(doc.graph.clone());

    for record in &doc.nodes {
        let id = record.id.to_label();
        if graph.has_node(&id) {
            let first = doc.nodes.iter().map(|r| &r.id).find(|v| v.to_label() == id);
            if first != Some(&record.id) {
                return Err(Error::InvalidAttributeValue {
                    element: format!("node {id}"),
                    attribute: "id",
                    expected: "an id that stays distinct once written as text",
                    value: serde_json::to_string(&record.id).unwrap_or_else(|_| id.clone()),
                });
            }
            return Err(Error::UnsupportedGraphKind {
                reason: format!("node {id} is declared more than once"),
            });
        }
        graph.set_node(id, node_attrs(record));
    }

    for record in &doc.edges {
        let key = EdgeKey::new(
            record.source.to_label(),
            record.target.to_label(),
            None::<String>,
        );
        if !(graph.has_node(&key.v) && graph.has_node(&key.w)) {
            return Err(Error::MissingEndpoint {
                edge: key.to_string(),
            });
        }
        if graph.has_edge(&key.v, &key.w, None) {
            return Err(Error::UnsupportedGraphKind {
                reason: format!("edge {key} is declared more than once"),
            });
        }
        let attrs = edge_attrs(record, &key)?;
        graph.set_edge_with_label(key.v, key.w, attrs);
    }

    if graph.node_count() == 0 {
        return Ok(graph);
    }

    let positioned = graph.node_entries().all(|(_, n)| n.position.is_some());
    if positioned {
        normalize_graph(&mut graph, config.degenerate_axis)?;
    } else {
        place(&mut graph, provider, config.degenerate_axis)?;
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        provided = !positioned,
        "loaded graph document"
    );
    Ok(graph)
}

fn node_attrs(record: &NodeRecord) -> NodeAttrs {
    NodeAttrs {
        position: match (record.x, record.y) {
            (Some(x), Some(y)) => Some(point(x, y)),
            _ => None,
        },
        size: record.size,
        color: record.color,
        label_position: record.labpos,
        label: record.label.as_ref().map(AttrValue::to_label),
        data: record.data.clone(),
    }
}

fn edge_attrs(record: &EdgeRecord, key: &EdgeKey) -> Result<EdgeAttrs> {
    let label_flip = match &record.labflip {
        None => None,
        Some(AttrValue::Bool(b)) => Some(*b),
        Some(AttrValue::Number(n)) if *n == 0.0 => Some(false),
        Some(AttrValue::Number(n)) if *n == 1.0 => Some(true),
        Some(other) => {
            return Err(Error::InvalidAttributeValue {
                element: format!("edge {key}"),
                attribute: "labflip",
                expected: "0 or 1",
                value: other.to_string(),
            });
        }
    };
    Ok(EdgeAttrs {
        width: record.width,
        color: record.color,
        label: record.label.as_ref().map(AttrValue::to_label),
        label_fraction: record.labfrac,
        label_distance: record.labdist,
        label_flip,
        data: record.data.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CircularLayout;

    fn load_json(text: &str) -> Result<PlotGraph> {
        load_str(text, &CircularLayout, &RenderConfig::default())
    }

    #[test]
    fn document_positions_are_normalized() {
        let g = load_json(
            r#"{
                "directed": true,
                "nodes": [
                    { "id": "A", "x": 10, "y": -5, "color": [200, 0, 0], "weight": 3 },
                    { "id": 7, "x": 20, "y": 5, "labpos": "top center" }
                ],
                "edges": [ { "source": "A", "target": 7, "labflip": 1, "cost": 1.5 } ]
            }"#,
        )
        .unwrap();

        assert!(g.is_directed());
        let a = g.node("A").unwrap();
        assert_eq!(a.position, Some(point(0.0, 0.0)));
        assert_eq!(a.color, Some(Color::rgb(200, 0, 0)));
        assert_eq!(a.data["weight"], AttrValue::Number(3.0));
        let seven = g.node("7").unwrap();
        assert_eq!(seven.position, Some(point(1.0, 1.0)));
        assert_eq!(seven.label_position, Some(LabelPosition::TopCenter));

        let e = g.edge("A", "7", None).unwrap();
        assert_eq!(e.label_flip, Some(true));
        assert_eq!(e.data["cost"], AttrValue::Number(1.5));
    }

    #[test]
    fn partial_positions_fall_back_to_the_provider() {
        let g = load_json(
            r#"{ "nodes": [ { "id": "a", "x": 3, "y": 3 }, { "id": "b" }, { "id": "c" } ] }"#,
        )
        .unwrap();
        assert_eq!(g.node("a").unwrap().position.unwrap().x, 1.0);
        assert!(g.node_entries().all(|(_, n)| n.position.is_some()));
    }

    #[test]
    fn multigraphs_and_duplicate_edges_are_rejected() {
        let err = load_json(r#"{ "multigraph": true }"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedGraphKind { .. }));

        let err = load_json(
            r#"{ "nodes": [ { "id": "a" }, { "id": "b" } ],
                 "edges": [ { "source": "a", "target": "b" }, { "source": "b", "target": "a" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedGraphKind { .. }));
    }

    #[test]
    fn ids_are_keyed_by_their_text_form() {
        let g = load_json(
            r#"{ "nodes": [ { "id": 1, "x": 0, "y": 0 }, { "id": "b", "x": 1, "y": 1 } ],
                 "edges": [ { "source": "1", "target": "b" } ] }"#,
        )
        .unwrap();
        assert!(g.has_node("1"));
        assert!(g.has_edge("1", "b", None));

        let err = load_json(r#"{ "nodes": [ { "id": 1 }, { "id": 1.0 } ] }"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedGraphKind { .. }));

        let err = load_json(r#"{ "nodes": [ { "id": 1 }, { "id": "1" } ] }"#).unwrap_err();
        let Error::InvalidAttributeValue {
            element,
            attribute,
            value,
            ..
        } = err
        else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(element, "node 1");
        assert_eq!(attribute, "id");
        assert_eq!(value, r#""1""#);
    }

    #[test]
    fn undeclared_endpoints_are_reported() {
        let err = load_json(
            r#"{ "nodes": [ { "id": "a" } ], "edges": [ { "source": "a", "target": "z" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint { edge } if edge == "(a, z)"));
    }

    #[test]
    fn labflip_must_be_zero_or_one() {
        let err = load_json(
            r#"{ "nodes": [ { "id": "a" }, { "id": "b" } ],
                 "edges": [ { "source": "a", "target": "b", "labflip": 2 } ] }"#,
        )
        .unwrap_err();
        let Error::InvalidAttributeValue {
            element,
            attribute,
            value,
            ..
        } = err
        else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(element, "edge (a, b)");
        assert_eq!(attribute, "labflip");
        assert_eq!(value, "2");
    }

    #[test]
    fn empty_document_loads_an_empty_graph() {
        let g = load_json("{}").unwrap();
        assert_eq!(g.node_count(), 0);
        assert!(!g.is_directed());
    }
}
