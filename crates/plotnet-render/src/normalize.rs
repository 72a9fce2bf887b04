//! Rescaling of node positions into the unit square.

use crate::attrs::PlotGraph;
use crate::geom::Point;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// What to do with an axis on which every node has the same coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateAxis {
    /// Place every node at 0.5 on that axis.
    #[default]
    Center,
    /// Fail with [`Error::DegenerateLayout`].
    Reject,
}

#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    extent: f64,
}

impl Span {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        Self {
            min,
            extent: max - min,
        }
    }

    fn map(&self, v: f64) -> f64 {
        if self.extent == 0.0 {
            0.5
        } else {
            (v - self.min) / self.extent
        }
    }
}

/// Maps `positions` into [0,1]² so that the smallest coordinate on each axis becomes 0 and the
/// largest becomes 1.
pub fn normalize(positions: &mut IndexMap<String, Point>, policy: DegenerateAxis) -> Result<()> {
    if positions.is_empty() {
        return Err(Error::EmptyLayout);
    }
    if let Some(node) = positions
        .iter()
        .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        .map(|(id, _)| id.clone())
    {
        return Err(Error::InvalidPosition { node });
    }

    let xs = Span::of(positions.values().map(|p| p.x));
    let ys = Span::of(positions.values().map(|p| p.y));

    for (axis, span) in [(Axis::X, xs), (Axis::Y, ys)] {
        if span.extent != 0.0 {
            continue;
        }
        match policy {
            DegenerateAxis::Reject => return Err(Error::DegenerateLayout { axis }),
            DegenerateAxis::Center => {
                tracing::warn!(%axis, "all nodes share one coordinate; centering on that axis");
            }
        }
    }

    for p in positions.values_mut() {
        p.x = xs.map(p.x);
        p.y = ys.map(p.y);
    }
    Ok(())
}

/// Normalizes the positions stored on the graph's nodes in place.
pub fn normalize_graph(graph: &mut PlotGraph, policy: DegenerateAxis) -> Result<()> {
    let mut positions: IndexMap<String, Point> = IndexMap::with_capacity(graph.node_count());
    for (id, attrs) in graph.node_entries() {
        let Some(p) = attrs.position else {
            return Err(Error::MissingPosition {
                node: id.to_string(),
            });
        };
        positions.insert(id.to_string(), p);
    }

    normalize(&mut positions, policy)?;

    graph.for_each_node_mut(|id, attrs| {
        if let Some(p) = positions.get(id) {
            attrs.position = Some(*p);
        }
    });
    Ok(())
}
