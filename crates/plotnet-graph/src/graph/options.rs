//! Graph configuration options.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    /// Allows several edges between the same endpoints, told apart by their `name`.
    pub multigraph: bool,
    pub directed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            multigraph: false,
            directed: true,
        }
    }
}

impl GraphOptions {
    pub fn directed() -> Self {
        Self::default()
    }

    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Self::default()
        }
    }
}
