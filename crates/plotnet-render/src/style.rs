//! Two-level style resolution: element override, then configured default.
//!
//! Resolved styles double as batching keys, so they implement `Eq`/`Hash` by comparing the bit
//! patterns of their float fields.

use crate::attrs::{EdgeAttrs, GraphAttrs, LabelPosition, NodeAttrs};
use crate::color::Color;
use crate::config::RenderConfig;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasStyle {
    pub width: f64,
    pub height: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

impl CanvasStyle {
    /// Canvas width including the left and right margins.
    pub fn outer_width(&self) -> f64 {
        self.width + self.left + self.right
    }

    /// Canvas height including the bottom and top margins.
    pub fn outer_height(&self) -> f64 {
        self.height + self.bottom + self.top
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NodeStyle {
    pub size: f64,
    pub color: Color,
    pub label_position: LabelPosition,
}

impl NodeStyle {
    /// Font color for the node label; only centered labels sit on top of the marker.
    pub fn font_color(&self) -> Color {
        if self.label_position == LabelPosition::MiddleCenter {
            self.color.legible_font_color()
        } else {
            Color::BLACK
        }
    }
}

impl PartialEq for NodeStyle {
    fn eq(&self, other: &Self) -> bool {
        self.size.to_bits() == other.size.to_bits()
            && self.color == other.color
            && self.label_position == other.label_position
    }
}

impl Eq for NodeStyle {}

impl Hash for NodeStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.to_bits().hash(state);
        self.color.hash(state);
        self.label_position.hash(state);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EdgeStyle {
    pub width: f64,
    pub color: Color,
    pub label_fraction: f64,
    pub label_distance: f64,
    pub label_flip: bool,
}

impl PartialEq for EdgeStyle {
    fn eq(&self, other: &Self) -> bool {
        self.width.to_bits() == other.width.to_bits()
            && self.color == other.color
            && self.label_fraction.to_bits() == other.label_fraction.to_bits()
            && self.label_distance.to_bits() == other.label_distance.to_bits()
            && self.label_flip == other.label_flip
    }
}

impl Eq for EdgeStyle {}

impl Hash for EdgeStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.to_bits().hash(state);
        self.color.hash(state);
        self.label_fraction.to_bits().hash(state);
        self.label_distance.to_bits().hash(state);
        self.label_flip.hash(state);
    }
}

/// An edge's batch style plus the resolved size of its target node (arrowhead radius).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEdge {
    pub style: EdgeStyle,
    pub target_size: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    config: &'a RenderConfig,
}

impl<'a> StyleResolver<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    pub fn canvas(&self, attrs: &GraphAttrs) -> CanvasStyle {
        let d = &self.config.graph;
        CanvasStyle {
            width: attrs.width.unwrap_or(d.width),
            height: attrs.height.unwrap_or(d.height),
            bottom: attrs.bottom.unwrap_or(d.bottom),
            left: attrs.left.unwrap_or(d.left),
            right: attrs.right.unwrap_or(d.right),
            top: attrs.top.unwrap_or(d.top),
        }
    }

    pub fn node(&self, attrs: &NodeAttrs) -> NodeStyle {
        let d = &self.config.node;
        NodeStyle {
            size: attrs.size.unwrap_or(d.size),
            color: attrs.color.unwrap_or(d.color),
            label_position: attrs.label_position.unwrap_or(d.label_position),
        }
    }

    pub fn edge(&self, attrs: &EdgeAttrs, target: &NodeAttrs) -> ResolvedEdge {
        let d = &self.config.edge;
        ResolvedEdge {
            style: EdgeStyle {
                width: attrs.width.unwrap_or(d.width),
                color: attrs.color.unwrap_or(d.color),
                label_fraction: attrs.label_fraction.unwrap_or(d.label_fraction),
                label_distance: attrs.label_distance.unwrap_or(d.label_distance),
                label_flip: attrs.label_flip.unwrap_or(d.label_flip),
            },
            target_size: target.size.unwrap_or(self.config.node.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_overrides_win_over_defaults() {
        let cfg = RenderConfig::default();
        let resolver = StyleResolver::new(&cfg);

        let plain = resolver.node(&NodeAttrs::default());
        assert_eq!(plain.size, 20.0);
        assert_eq!(plain.color, Color::WHITE);
        assert_eq!(plain.label_position, LabelPosition::MiddleCenter);

        let custom = resolver.node(&NodeAttrs::default().with_size(8.0).with_color(Color::BLACK));
        assert_eq!(custom.size, 8.0);
        assert_eq!(custom.color, Color::BLACK);
        assert_ne!(plain, custom);
    }

    #[test]
    fn edges_carry_the_target_size_outside_the_batch_key() {
        let cfg = RenderConfig::default();
        let resolver = StyleResolver::new(&cfg);
        let edge = EdgeAttrs::default().with_label_flip(true);

        let small = resolver.edge(&edge, &NodeAttrs::default().with_size(4.0));
        let large = resolver.edge(&edge, &NodeAttrs::default());
        assert_eq!(small.target_size, 4.0);
        assert_eq!(large.target_size, 20.0);
        assert_eq!(small.style, large.style);
        assert!(small.style.label_flip);
        assert_eq!(small.style.label_distance, 10.0);
    }

    #[test]
    fn canvas_margins_inflate_the_outer_size() {
        let cfg = RenderConfig::default();
        let canvas = StyleResolver::new(&cfg).canvas(&GraphAttrs {
            left: Some(10.0),
            top: Some(5.0),
            ..Default::default()
        });
        assert_eq!(canvas.outer_width(), 810.0);
        assert_eq!(canvas.outer_height(), 455.0);
    }

    #[test]
    fn font_color_tracks_centered_labels_only() {
        let dark = NodeStyle {
            size: 20.0,
            color: Color::rgb(10, 10, 10),
            label_position: LabelPosition::MiddleCenter,
        };
        assert_eq!(dark.font_color(), Color::WHITE);
        let beside = NodeStyle {
            label_position: LabelPosition::MiddleRight,
            ..dark
        };
        assert_eq!(beside.font_color(), Color::BLACK);
    }
}
