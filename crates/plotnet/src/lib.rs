#![forbid(unsafe_code)]

//! `plotnet` draws networks as declarative plotting figures, headlessly.
//!
//! A graph (built in code or loaded from a JSON graph document) is turned into node markers,
//! edge lines, arrowheads and labels, grouped into batches and wrapped in a figure document that
//! a plotting backend can display. Several graph states can be recorded into an animated
//! playback figure.
//!
//! The building blocks live in [`graph`] and the re-exported renderer modules; [`headless`] has
//! one-call helpers from document text to figure JSON.

pub use plotnet_graph as graph;
pub use plotnet_render::*;

pub mod headless {
    use plotnet_render::{
        CircularLayout, Figure, GraphDocument, LayoutProvider, Recording, RenderConfig,
        build_figure, load, load_str,
    };
    use serde::Serialize;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Render(#[from] plotnet_render::Error),
        #[error(transparent)]
        Json(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Loads one graph document and builds its figure.
    pub fn render_figure_sync(text: &str, config: &RenderConfig) -> Result<Figure> {
        HeadlessRenderer::new(config.clone()).render_figure_sync(text)
    }

    /// Loads one graph document and returns its figure as JSON.
    pub fn render_json_sync(text: &str, config: &RenderConfig, pretty: bool) -> Result<String> {
        HeadlessRenderer::new(config.clone()).render_json_sync(text, pretty)
    }

    /// Loads a JSON array of graph documents, records one frame per document and assembles the
    /// playback figure.
    pub fn playback_figure_sync(text: &str, config: &RenderConfig) -> Result<Figure> {
        HeadlessRenderer::new(config.clone()).playback_figure_sync(text)
    }

    pub fn playback_json_sync(text: &str, config: &RenderConfig, pretty: bool) -> Result<String> {
        HeadlessRenderer::new(config.clone()).playback_json_sync(text, pretty)
    }

    /// Serializes any figure-shaped value.
    pub fn to_json(value: &impl Serialize, pretty: bool) -> Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        })
    }

    /// Bundles a [`RenderConfig`] with the layout provider used for documents that do not carry
    /// positions for every node.
    pub struct HeadlessRenderer {
        pub config: RenderConfig,
        pub layout: Box<dyn LayoutProvider + Send + Sync>,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self::new(RenderConfig::default())
        }
    }

    impl HeadlessRenderer {
        pub fn new(config: RenderConfig) -> Self {
            Self {
                config,
                layout: Box::new(CircularLayout),
            }
        }

        pub fn with_layout(mut self, layout: impl LayoutProvider + Send + Sync + 'static) -> Self {
            self.layout = Box::new(layout);
            self
        }

        pub fn render_figure_sync(&self, text: &str) -> Result<Figure> {
            let graph = load_str(text, self.layout.as_ref(), &self.config)?;
            Ok(build_figure(&graph, &self.config)?)
        }

        pub fn render_json_sync(&self, text: &str, pretty: bool) -> Result<String> {
            to_json(&self.render_figure_sync(text)?, pretty)
        }

        pub fn playback_figure_sync(&self, text: &str) -> Result<Figure> {
            let documents: Vec<GraphDocument> = serde_json::from_str(text)?;
            let mut recording = Recording::new(self.config.clone());
            for doc in &documents {
                let graph = load(doc, self.layout.as_ref(), &self.config)?;
                recording.capture(&graph)?;
            }
            Ok(recording.assemble_playback()?)
        }

        pub fn playback_json_sync(&self, text: &str, pretty: bool) -> Result<String> {
            to_json(&self.playback_figure_sync(text)?, pretty)
        }
    }
}
