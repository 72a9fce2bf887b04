//! Primitive builder: resolved styles and normalized positions in, primitive batches out.
//!
//! Batches are emitted in a fixed order: edge lines, the edge-label batch, node markers and
//! finally the invisible corner anchors that stretch the backend's autorange over the margins.

use crate::attrs::{LabelPosition, NodeAttrs, PlotGraph};
use crate::color::Color;
use crate::config::RenderConfig;
use crate::geom::{self, EDGE_SPACING, HEAD_ANGLE, Point, Vector, point, vector};
use crate::model::{
    BatchKind, DisplayConfig, DrawMode, Figure, FigureLayout, FontStyle, HoverInfo, LineStyle,
    MarkerStyle, Outline, PrimitiveBatch,
};
use crate::style::{CanvasStyle, EdgeStyle, NodeStyle, ResolvedEdge, StyleResolver};
use crate::{Error, Result};
use indexmap::IndexMap;
use plotnet_graph::EdgeKey;

// The backend draws inside a plot area smaller than the canvas; these were measured against its
// default chrome (marker borders, autorange padding).
const PLOT_AREA_SCALE: f64 = 0.9;
const PLOT_AREA_INSET: f64 = 24.0;

/// How elements are grouped into batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Batching {
    /// One batch per distinct resolved style.
    #[default]
    ByStyle,
    /// One batch per node and per edge; keeps the batch layout identical across animation
    /// frames even when styles change between frames.
    PerElement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltDiagram {
    pub canvas: CanvasStyle,
    /// Canvas width including margins.
    pub width: f64,
    /// Canvas height including margins.
    pub height: f64,
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub batches: Vec<PrimitiveBatch>,
}

/// Pixel extents of the drawable plot area; all edge geometry is measured in this space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    width: f64,
    height: f64,
}

impl PlotArea {
    pub(crate) fn for_canvas(width: f64, height: f64) -> Result<Self> {
        let invalid = || Error::InvalidCanvas { width, height };
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid());
        }
        let area = Self {
            width: PLOT_AREA_SCALE * width - PLOT_AREA_INSET,
            height: PLOT_AREA_SCALE * height - PLOT_AREA_INSET,
        };
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(invalid());
        }
        Ok(area)
    }

    fn aspect(&self) -> f64 {
        self.width / self.height
    }

    fn scale(&self, v: Vector, length: f64) -> Option<f64> {
        geom::scale_to_length(v, self.width, self.height, length)
    }

    fn rotate(&self, v: Vector, angle: f64) -> Vector {
        geom::rotate(v, self.width, self.height, angle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeShape {
    Undirected,
    Directed { reciprocal: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EdgeGeometry {
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) label_anchor: Point,
    /// Arrowhead strokes, each running from the node rim outwards.
    pub(crate) barbs: Vec<(Point, Point)>,
}

pub(crate) fn edge_geometry(
    area: &PlotArea,
    source: Point,
    target: Point,
    edge: &ResolvedEdge,
    shape: EdgeShape,
) -> EdgeGeometry {
    let aspect = area.aspect();
    // Perpendicular to the edge, corrected for the canvas aspect ratio.
    let normal = vector(
        (source.y - target.y) / aspect,
        (target.x - source.x) * aspect,
    );
    let spacing = (edge.style.width + EDGE_SPACING) / 2.0;

    let mut start = source;
    let mut end = target;
    let reciprocal = shape == EdgeShape::Directed { reciprocal: true };
    if reciprocal {
        if let Some(s) = area.scale(normal, spacing) {
            start += normal * s;
            end += normal * s;
        }
    }

    let side = if edge.style.label_flip {
        -normal
    } else {
        normal
    };
    let mut label_anchor = start.lerp(end, edge.style.label_fraction);
    if let Some(s) = area.scale(side, edge.style.label_distance) {
        label_anchor += side * s;
    }

    let barbs = match shape {
        EdgeShape::Undirected => Vec::new(),
        EdgeShape::Directed { reciprocal } => {
            arrowhead(area, start, end, edge.target_size, reciprocal, spacing)
        }
    };

    EdgeGeometry {
        start,
        end,
        label_anchor,
        barbs,
    }
}

fn arrowhead(
    area: &PlotArea,
    start: Point,
    end: Point,
    target_size: f64,
    reciprocal: bool,
    spacing: f64,
) -> Vec<(Point, Point)> {
    let back = start - end;
    let radius = target_size / 2.0;
    // The offset line meets the rim closer to the line's own endpoint. Barbs keep the full
    // radius so wide reciprocal edges still get a visible head.
    let touch = if reciprocal {
        (radius * radius - spacing * spacing).max(0.0).sqrt()
    } else {
        radius
    };
    let Some(s) = area.scale(back, touch) else {
        return Vec::new();
    };
    let rim = end + back * s;

    // The clockwise flank points away from a reciprocal partner, which draws its own barb on
    // the other side.
    let angles: &[f64] = if reciprocal {
        &[-HEAD_ANGLE]
    } else {
        &[-HEAD_ANGLE, HEAD_ANGLE]
    };
    angles
        .iter()
        .filter_map(|&angle| {
            let flank = area.rotate(back, angle);
            let s = area.scale(flank, radius)?;
            Some((rim, rim + flank * s))
        })
        .collect()
}

fn node_batch(style: &NodeStyle) -> PrimitiveBatch {
    let (mode, hoverinfo) = if style.label_position.is_hover() {
        (DrawMode::Markers, HoverInfo::Text)
    } else {
        (DrawMode::MarkersText, HoverInfo::None)
    };
    let mut batch = PrimitiveBatch::new(BatchKind::Nodes, mode, hoverinfo);
    batch.text = Some(Vec::new());
    batch.textposition = Some(style.label_position.text_anchor());
    batch.marker = Some(MarkerStyle {
        size: Some(style.size),
        color: style.color.to_css(),
        line: Outline {
            width: 1.0,
            color: Some(Color::BLACK.to_css()),
        },
    });
    batch.textfont = Some(FontStyle {
        color: style.font_color().to_css(),
    });
    batch
}

fn edge_batch(style: &EdgeStyle) -> PrimitiveBatch {
    let mut batch = PrimitiveBatch::new(BatchKind::EdgeLines, DrawMode::Lines, HoverInfo::None);
    batch.line = Some(LineStyle {
        width: style.width,
        color: style.color.to_css(),
    });
    batch
}

fn edge_label_batch() -> PrimitiveBatch {
    let mut batch = PrimitiveBatch::new(BatchKind::EdgeLabels, DrawMode::Text, HoverInfo::None);
    batch.text = Some(Vec::new());
    batch.textposition = Some(LabelPosition::MiddleCenter);
    batch.textfont = Some(FontStyle {
        color: Color::BLACK.to_css(),
    });
    batch
}

fn corner_anchor_batch(canvas: &CanvasStyle) -> PrimitiveBatch {
    let (w, h) = (canvas.outer_width(), canvas.outer_height());
    let mut batch =
        PrimitiveBatch::new(BatchKind::CornerAnchor, DrawMode::Markers, HoverInfo::None);
    for p in [
        point(0.5, -canvas.bottom / h),
        point(-canvas.left / w, 0.5),
        point(1.0 + canvas.right / w, 0.5),
        point(0.5, 1.0 + canvas.top / h),
    ] {
        batch.push_point(p);
    }
    batch.marker = Some(MarkerStyle {
        size: None,
        color: Color::TRANSPARENT.to_css(),
        line: Outline {
            width: 0.0,
            color: None,
        },
    });
    batch
}

/// Collects batches either keyed by style or one per element.
struct Batches<K> {
    batching: Batching,
    keyed: IndexMap<K, PrimitiveBatch>,
    single: Vec<PrimitiveBatch>,
}

impl<K: std::hash::Hash + Eq> Batches<K> {
    fn new(batching: Batching) -> Self {
        Self {
            batching,
            keyed: IndexMap::new(),
            single: Vec::new(),
        }
    }

    fn batch_for(&mut self, key: K, create: impl FnOnce() -> PrimitiveBatch) -> &mut PrimitiveBatch {
        match self.batching {
            Batching::ByStyle => self.keyed.entry(key).or_insert_with(create),
            Batching::PerElement => {
                self.single.push(create());
                let last = self.single.len() - 1;
                &mut self.single[last]
            }
        }
    }

    fn into_vec(self) -> Vec<PrimitiveBatch> {
        match self.batching {
            Batching::ByStyle => self.keyed.into_values().collect(),
            Batching::PerElement => self.single,
        }
    }
}

fn position_of(id: &str, attrs: &NodeAttrs) -> Result<Point> {
    attrs.position.ok_or_else(|| Error::MissingPosition {
        node: id.to_string(),
    })
}

fn endpoint<'g>(graph: &'g PlotGraph, key: &EdgeKey, id: &str) -> Result<&'g NodeAttrs> {
    graph.node(id).ok_or_else(|| Error::MissingEndpoint {
        edge: key.to_string(),
    })
}

/// Builds every primitive batch for `graph`.
///
/// Node positions are used as stored; callers normalize them first (see
/// [`normalize_graph`](crate::normalize::normalize_graph)).
pub fn build_primitives(
    graph: &PlotGraph,
    config: &RenderConfig,
    batching: Batching,
) -> Result<BuiltDiagram> {
    if graph.is_multigraph() {
        return Err(Error::UnsupportedGraphKind {
            reason: "multigraphs are not supported".to_string(),
        });
    }

    let resolver = StyleResolver::new(config);
    let canvas = resolver.canvas(graph.graph());
    let (width, height) = (canvas.outer_width(), canvas.outer_height());
    let area = PlotArea::for_canvas(width, height)?;
    let directed = graph.is_directed();

    let mut nodes: Batches<NodeStyle> = Batches::new(batching);
    for (id, attrs) in graph.node_entries() {
        let p = position_of(id, attrs)?;
        let style = resolver.node(attrs);
        let label = attrs.label.clone().unwrap_or_default();
        nodes
            .batch_for(style, || node_batch(&style))
            .push_labeled_point(p, label);
    }

    let mut edges: Batches<EdgeStyle> = Batches::new(batching);
    let mut labels = edge_label_batch();
    for (key, attrs) in graph.edge_entries() {
        let source = endpoint(graph, key, &key.v)?;
        let target = endpoint(graph, key, &key.w)?;
        let p0 = position_of(&key.v, source)?;
        let p1 = position_of(&key.w, target)?;

        let resolved = resolver.edge(attrs, target);
        let shape = if directed {
            EdgeShape::Directed {
                reciprocal: graph.has_reciprocal(key),
            }
        } else {
            EdgeShape::Undirected
        };
        let geometry = edge_geometry(&area, p0, p1, &resolved, shape);

        let batch = edges.batch_for(resolved.style, || edge_batch(&resolved.style));
        batch.push_segment(geometry.start, geometry.end);
        for (from, to) in geometry.barbs {
            batch.push_segment(from, to);
        }
        labels.push_labeled_point(
            geometry.label_anchor,
            attrs.label.clone().unwrap_or_default(),
        );
    }

    let mut batches = edges.into_vec();
    batches.push(labels);
    batches.extend(nodes.into_vec());
    batches.push(corner_anchor_batch(&canvas));

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        batches = batches.len(),
        directed,
        "built primitives"
    );

    Ok(BuiltDiagram {
        canvas,
        width,
        height,
        directed,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        batches,
    })
}

/// Builds a single, style-batched figure for `graph`.
pub fn build_figure(graph: &PlotGraph, config: &RenderConfig) -> Result<Figure> {
    let built = build_primitives(graph, config, Batching::ByStyle)?;

    let mut layout = FigureLayout::bare(built.width, built.height);
    if built.directed {
        // Zooming would detach arrowheads from the node rims they were computed against.
        layout.xaxis.fixedrange = Some(true);
        layout.yaxis.fixedrange = Some(true);
    }

    Ok(Figure {
        data: built.batches,
        layout,
        frames: Vec::new(),
        config: DisplayConfig {
            display_mode_bar: Some(config.toolbar),
            static_plot: None,
        },
    })
}
