//! The declarative document handed to the plotting backend.
//!
//! Field names follow the backend's figure schema, which is why several of them are not
//! snake_case on the wire.

use crate::attrs::LabelPosition;
use crate::geom::Point;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawMode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers+text")]
    MarkersText,
    #[serde(rename = "text")]
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverInfo {
    Text,
    None,
}

/// What a batch draws. Not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    EdgeLines,
    EdgeLabels,
    Nodes,
    CornerAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    pub color: String,
    pub line: Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontStyle {
    pub color: String,
}

/// One style-homogeneous group of markers, line segments or text.
///
/// Line batches separate segments with `None` (serialized as `null`) so unrelated segments in the
/// same batch are not joined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveBatch {
    #[serde(skip)]
    pub kind: BatchKind,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<LabelPosition>,
    pub hoverinfo: HoverInfo,
    pub mode: DrawMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<FontStyle>,
}

impl PrimitiveBatch {
    pub fn new(kind: BatchKind, mode: DrawMode, hoverinfo: HoverInfo) -> Self {
        Self {
            kind,
            x: Vec::new(),
            y: Vec::new(),
            text: None,
            textposition: None,
            hoverinfo,
            mode,
            marker: None,
            line: None,
            textfont: None,
        }
    }

    pub fn push_point(&mut self, p: Point) {
        self.x.push(Some(p.x));
        self.y.push(Some(p.y));
    }

    pub fn push_labeled_point(&mut self, p: Point, text: impl Into<String>) {
        self.push_point(p);
        self.text.get_or_insert_with(Vec::new).push(text.into());
    }

    pub fn push_segment(&mut self, from: Point, to: Point) {
        self.x.extend([Some(from.x), Some(to.x), None]);
        self.y.extend([Some(from.y), Some(to.y), None]);
    }

    /// Number of path-separated segments in a line batch.
    pub fn segment_count(&self) -> usize {
        self.x.iter().filter(|v| v.is_none()).count()
    }

    /// Drawn points, with path breaks skipped.
    pub fn points(&self) -> Vec<Point> {
        self.x
            .iter()
            .zip(&self.y)
            .filter_map(|(x, y)| Some(crate::geom::point((*x)?, (*y)?)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub showgrid: bool,
    pub zeroline: bool,
    pub showticklabels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixedrange: Option<bool>,
}

impl AxisLayout {
    pub fn hidden() -> Self {
        Self {
            showgrid: false,
            zeroline: false,
            showticklabels: false,
            fixedrange: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub b: f64,
    pub l: f64,
    pub r: f64,
    pub t: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameTransition {
    pub redraw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimateOptions {
    pub frame: FrameTransition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fromcurrent: Option<bool>,
}

/// Arguments of the backend's `animate` method: a frame selector and transition options.
/// `None` as the selector plays all frames; `[None]` stops playback.
pub type AnimateArgs = (Option<Vec<Option<usize>>>, AnimateOptions);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub args: AnimateArgs,
    pub label: String,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMenu {
    pub buttons: Vec<Button>,
    pub showactive: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderStep {
    pub args: AnimateArgs,
    pub label: String,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentValue {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    pub currentvalue: CurrentValue,
    pub steps: Vec<SliderStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub showlegend: bool,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub xaxis: AxisLayout,
    pub yaxis: AxisLayout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<UpdateMenu>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<Slider>,
}

impl FigureLayout {
    /// Bare layout: no legend, no page margins, hidden axes.
    pub fn bare(width: f64, height: f64) -> Self {
        Self {
            showlegend: false,
            width,
            height,
            margin: Margin {
                b: 0.0,
                l: 0.0,
                r: 0.0,
                t: 0.0,
            },
            xaxis: AxisLayout::hidden(),
            yaxis: AxisLayout::hidden(),
            updatemenus: Vec::new(),
            sliders: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePayload {
    pub name: usize,
    pub data: Vec<PrimitiveBatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayConfig {
    #[serde(rename = "displayModeBar", skip_serializing_if = "Option::is_none")]
    pub display_mode_bar: Option<bool>,
    #[serde(rename = "staticPlot", skip_serializing_if = "Option::is_none")]
    pub static_plot: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<PrimitiveBatch>,
    pub layout: FigureLayout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FramePayload>,
    pub config: DisplayConfig,
}
