#![forbid(unsafe_code)]

//! Graph container APIs used by `plotnet-render`.
//!
//! The container stores opaque string node ids with a typed label per node, per edge and per
//! graph. Rendering reads it; annotation helpers mutate the labels in place.

pub mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions};
