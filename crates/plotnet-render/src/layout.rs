//! Layout providers: anything that can assign raw positions to a graph's nodes.
//!
//! Providers only place nodes; [`place`] stores the result on the graph and normalizes it.

use crate::attrs::PlotGraph;
use crate::geom::{Point, point};
use crate::normalize::{DegenerateAxis, normalize};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::f64::consts::TAU;

pub trait LayoutProvider {
    /// Returns a position for every node of `graph`, in any coordinate system.
    fn place(&self, graph: &PlotGraph) -> Result<IndexMap<String, Point>>;
}

/// Spaces nodes evenly on the unit circle, in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularLayout;

impl LayoutProvider for CircularLayout {
    fn place(&self, graph: &PlotGraph) -> Result<IndexMap<String, Point>> {
        let n = graph.node_count();
        if n == 1 {
            return Ok(graph.nodes().map(|id| (id.to_string(), point(0.0, 0.0))).collect());
        }
        Ok(graph
            .nodes()
            .enumerate()
            .map(|(i, id)| {
                let theta = TAU * i as f64 / n as f64;
                (id.to_string(), point(snap(theta.cos()), snap(theta.sin())))
            })
            .collect())
    }
}

// Exact multiples of a quarter turn come back from `sin`/`cos` as ~1e-16 rather than 0, which
// normalization would otherwise stretch into a full axis.
fn snap(v: f64) -> f64 {
    if v.abs() < 1e-12 { 0.0 } else { v }
}

/// Positions supplied up front by the caller.
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    positions: IndexMap<String, Point>,
}

impl FixedLayout {
    pub fn new(positions: IndexMap<String, Point>) -> Self {
        Self { positions }
    }

    pub fn with(mut self, id: impl Into<String>, x: f64, y: f64) -> Self {
        self.positions.insert(id.into(), point(x, y));
        self
    }
}

impl LayoutProvider for FixedLayout {
    fn place(&self, graph: &PlotGraph) -> Result<IndexMap<String, Point>> {
        let mut out = IndexMap::with_capacity(graph.node_count());
        for id in graph.nodes() {
            let Some(p) = self.positions.get(id) else {
                return Err(Error::UnplacedNode {
                    node: id.to_string(),
                });
            };
            out.insert(id.to_string(), *p);
        }
        Ok(out)
    }
}

/// Runs `provider` on `graph`, normalizes the result and stores it on the nodes.
///
/// Nothing is written back unless every node was placed and normalization succeeded.
pub fn place(
    graph: &mut PlotGraph,
    provider: &dyn LayoutProvider,
    policy: DegenerateAxis,
) -> Result<()> {
    let mut positions = provider.place(graph)?;
    if let Some(node) = graph.nodes().find(|id| !positions.contains_key(*id)) {
        return Err(Error::UnplacedNode {
            node: node.to_string(),
        });
    }
    normalize(&mut positions, policy)?;

    graph.for_each_node_mut(|id, attrs| {
        attrs.position = positions.get(id).copied();
    });
    tracing::debug!(nodes = positions.len(), "placed nodes");
    Ok(())
}
