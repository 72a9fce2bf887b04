#![forbid(unsafe_code)]

//! Headless renderer that turns a positioned graph into a declarative bag of plotting
//! primitives: node markers, edge lines, arrowheads and text labels.
//!
//! The output [`Figure`](model::Figure) follows the figure schema of the plotting backend
//! (traces in `data`, a `layout` descriptor, optional animation `frames`) and is meant to be
//! serialized with `serde_json`.

pub mod animation;
pub mod annotate;
pub mod attrs;
pub mod build;
pub mod color;
pub mod config;
pub mod document;
pub mod geom;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod style;

pub use animation::{Frame, FrameField, Recording};
pub use attrs::{AttrValue, EdgeAttrs, GraphAttrs, LabelPosition, NodeAttrs, PlotGraph};
pub use build::{Batching, BuiltDiagram, build_figure, build_primitives};
pub use color::Color;
pub use config::RenderConfig;
pub use document::{GraphDocument, load, load_str};
pub use layout::{CircularLayout, FixedLayout, LayoutProvider, place};
pub use model::Figure;
pub use normalize::{Axis, DegenerateAxis, normalize, normalize_graph};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported graph kind: {reason}")]
    UnsupportedGraphKind { reason: String },
    #[error("attribute '{attribute}' of {element} must be {expected}, got {value}")]
    InvalidAttributeValue {
        element: String,
        attribute: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("no frames were recorded")]
    EmptyRecording,
    #[error("{field} varies from frame to frame (first divergence at frame {frame})")]
    FrameMismatch { field: FrameField, frame: usize },
    #[error("degenerate layout: every node shares the same {axis} coordinate")]
    DegenerateLayout { axis: Axis },
    #[error("cannot normalize a layout without nodes")]
    EmptyLayout,
    #[error("node {node} has a non-finite position")]
    InvalidPosition { node: String },
    #[error("node {node} has no position")]
    MissingPosition { node: String },
    #[error("edge {edge} references a node that is not in the graph")]
    MissingEndpoint { edge: String },
    #[error("layout provider did not place node {node}")]
    UnplacedNode { node: String },
    #[error("canvas {width}x{height} leaves no drawable area")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("graph document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
