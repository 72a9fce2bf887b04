//! The core `Graph` container.
//!
//! Nodes and edges are kept in insertion order so that everything derived from a graph
//! (batches, frames, labels) is deterministic. Undirected graphs index edges by their sorted
//! endpoints while each edge keeps the orientation it was inserted with.

mod edge_key;
mod entries;
mod options;

pub use edge_key::EdgeKey;
pub use options::GraphOptions;

use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Graph<N, E, G>
where
    N: Default,
    E: Default,
    G: Default,
{
    options: GraphOptions,
    graph_label: G,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    // Keyed by the canonical form of each edge key (see `canonical_view`).
    edge_index: HashMap<EdgeKey, usize>,
}

impl<N, E, G> Default for Graph<N, E, G>
where
    N: Default,
    E: Default,
    G: Default,
{
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default,
    E: Default,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
        }
    }

    fn canonical_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn canonical_key(&self, key: &EdgeKey) -> EdgeKey {
        let view = self.canonical_view(&key.v, &key.w, key.name.as_deref());
        EdgeKey::new(view.v, view.w, view.name)
    }

    fn edge_index_of(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        let view = self.canonical_view(v, w, name);
        self.edge_index.get(&view).copied()
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Iterates `(id, label)` pairs in insertion order.
    pub fn node_entries(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|n| (n.id.as_str(), &n.label))
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for n in &mut self.nodes {
            f(&n.id, &mut n.label);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    /// Iterates `(key, label)` pairs in insertion order.
    pub fn edge_entries(&self) -> impl Iterator<Item = (&EdgeKey, &E)> {
        self.edges.iter().map(|e| (&e.key, &e.label))
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&EdgeKey, &mut E),
    {
        for e in &mut self.edges {
            f(&e.key, &mut e.label);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Inserts an edge, creating missing endpoints with default labels.
    ///
    /// Re-inserting an existing edge replaces its label (when one is given) and keeps the
    /// original orientation and position.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let name = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };
        let key = EdgeKey { v, w, name };

        if let Some(idx) = self.edge_index_of(&key.v, &key.w, key.name.as_deref()) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        let idx = self.edges.len();
        let canonical = self.canonical_key(&key);
        self.edges.push(EdgeEntry {
            key,
            label: label.unwrap_or_default(),
        });
        self.edge_index.insert(canonical, idx);
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_index_of(v, w, name).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let idx = self.edge_index_of(v, w, name)?;
        Some(&self.edges[idx].label)
    }

    /// Returns `true` when the reverse of `key` is a distinct edge of this directed graph.
    pub fn has_reciprocal(&self, key: &EdgeKey) -> bool {
        self.options.directed && !key.is_self_loop() && self.has_edge(&key.w, &key.v, None)
    }
}
