//! Per-element attribute records stored in a [`PlotGraph`].
//!
//! Every visual field is optional; unset fields fall back to the [`RenderConfig`] defaults when
//! styles are resolved.
//!
//! [`RenderConfig`]: crate::config::RenderConfig

use crate::color::Color;
use crate::geom::{Point, point};
use indexmap::IndexMap;
use plotnet_graph::Graph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type PlotGraph = Graph<NodeAttrs, EdgeAttrs, GraphAttrs>;

/// Where a node label sits relative to its marker, or `hover` to show it only on hover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelPosition {
    #[serde(rename = "top left")]
    TopLeft,
    #[serde(rename = "top center")]
    TopCenter,
    #[serde(rename = "top right")]
    TopRight,
    #[serde(rename = "middle left")]
    MiddleLeft,
    #[default]
    #[serde(rename = "middle center")]
    MiddleCenter,
    #[serde(rename = "middle right")]
    MiddleRight,
    #[serde(rename = "bottom left")]
    BottomLeft,
    #[serde(rename = "bottom center")]
    BottomCenter,
    #[serde(rename = "bottom right")]
    BottomRight,
    #[serde(rename = "hover")]
    Hover,
}

impl LabelPosition {
    pub const ALL: [LabelPosition; 10] = [
        LabelPosition::TopLeft,
        LabelPosition::TopCenter,
        LabelPosition::TopRight,
        LabelPosition::MiddleLeft,
        LabelPosition::MiddleCenter,
        LabelPosition::MiddleRight,
        LabelPosition::BottomLeft,
        LabelPosition::BottomCenter,
        LabelPosition::BottomRight,
        LabelPosition::Hover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LabelPosition::TopLeft => "top left",
            LabelPosition::TopCenter => "top center",
            LabelPosition::TopRight => "top right",
            LabelPosition::MiddleLeft => "middle left",
            LabelPosition::MiddleCenter => "middle center",
            LabelPosition::MiddleRight => "middle right",
            LabelPosition::BottomLeft => "bottom left",
            LabelPosition::BottomCenter => "bottom center",
            LabelPosition::BottomRight => "bottom right",
            LabelPosition::Hover => "hover",
        }
    }

    pub fn is_hover(self) -> bool {
        self == LabelPosition::Hover
    }

    /// The text anchor handed to the backend; hover labels are centered.
    pub fn text_anchor(self) -> LabelPosition {
        if self.is_hover() {
            LabelPosition::MiddleCenter
        } else {
            self
        }
    }
}

impl fmt::Display for LabelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LabelPosition::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown label position: {s}"))
    }
}

/// A free-form attribute value (user data carried alongside the typed fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Label text for this value; infinite numbers render as `∞`.
    pub fn to_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Number(n) if n.is_infinite() && *n > 0.0 => f.write_str("∞"),
            AttrValue::Number(n) if n.is_infinite() => f.write_str("-∞"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttrs {
    pub position: Option<Point>,
    /// Marker diameter in pixels.
    pub size: Option<f64>,
    pub color: Option<Color>,
    pub label_position: Option<LabelPosition>,
    pub label: Option<String>,
    pub data: IndexMap<String, AttrValue>,
}

impl NodeAttrs {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some(point(x, y)),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_label_position(mut self, label_position: LabelPosition) -> Self {
        self.label_position = Some(label_position);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAttrs {
    /// Line width in pixels.
    pub width: Option<f64>,
    pub color: Option<Color>,
    pub label: Option<String>,
    /// Where along the edge (0 = source, 1 = target) the label is anchored.
    pub label_fraction: Option<f64>,
    /// Perpendicular label offset in pixels.
    pub label_distance: Option<f64>,
    /// Puts the label on the other side of the edge.
    pub label_flip: Option<bool>,
    pub data: IndexMap<String, AttrValue>,
}

impl EdgeAttrs {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_label_fraction(mut self, fraction: f64) -> Self {
        self.label_fraction = Some(fraction);
        self
    }

    pub fn with_label_distance(mut self, distance: f64) -> Self {
        self.label_distance = Some(distance);
        self
    }

    pub fn with_label_flip(mut self, flip: bool) -> Self {
        self.label_flip = Some(flip);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Canvas overrides for one graph. Margins reserve space around the unit square.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
}
