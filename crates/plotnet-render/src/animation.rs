//! Frame recording and playback assembly.
//!
//! A [`Recording`] is an explicit session: capture one frame per graph state, then assemble a
//! playback [`Figure`] with play/pause buttons and a step slider.

use crate::attrs::PlotGraph;
use crate::build::{Batching, build_primitives};
use crate::config::RenderConfig;
use crate::model::{
    AnimateOptions, Button, CurrentValue, DisplayConfig, Figure, FigureLayout, FramePayload,
    FrameTransition, PrimitiveBatch, Slider, SliderStep, UpdateMenu,
};
use crate::{Error, Result};
use std::fmt;

// Room for the play/pause buttons and the slider, measured against the backend's default chrome.
const CHROME_WIDTH_SCALE: f64 = 1.05;
const CHROME_WIDTH_PAD: f64 = 72.0;
const CHROME_HEIGHT_SCALE: f64 = 1.0;
const CHROME_HEIGHT_PAD: f64 = 76.0;

/// One captured diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub node_count: usize,
    pub edge_count: usize,
    pub width: f64,
    pub height: f64,
    pub batches: Vec<PrimitiveBatch>,
}

/// A frame property that must stay constant across a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    NodeCount,
    EdgeCount,
    Width,
    Height,
}

impl FrameField {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameField::NodeCount => "nodeCount",
            FrameField::EdgeCount => "edgeCount",
            FrameField::Width => "width",
            FrameField::Height => "height",
        }
    }
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Frame {
    fn first_mismatch(&self, other: &Frame) -> Option<FrameField> {
        if self.node_count != other.node_count {
            Some(FrameField::NodeCount)
        } else if self.edge_count != other.edge_count {
            Some(FrameField::EdgeCount)
        } else if self.width != other.width {
            Some(FrameField::Width)
        } else if self.height != other.height {
            Some(FrameField::Height)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recording {
    config: RenderConfig,
    frames: Vec<Frame>,
}

impl Recording {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            frames: Vec::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Drops every captured frame, starting a new session.
    pub fn reset(&mut self) {
        tracing::debug!(dropped = self.frames.len(), "recording reset");
        self.frames.clear();
    }

    /// Builds `graph` and appends it as the next frame.
    ///
    /// Frames are not compared here; mismatches surface in [`assemble_playback`].
    ///
    /// [`assemble_playback`]: Recording::assemble_playback
    pub fn capture(&mut self, graph: &PlotGraph) -> Result<()> {
        let built = build_primitives(graph, &self.config, Batching::PerElement)?;
        self.frames.push(Frame {
            node_count: built.node_count,
            edge_count: built.edge_count,
            width: built.width,
            height: built.height,
            batches: built.batches,
        });
        tracing::debug!(frame = self.frames.len() - 1, "captured frame");
        Ok(())
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Validates the captured frames and assembles the playback figure.
    pub fn assemble_playback(&self) -> Result<Figure> {
        let Some(first) = self.frames.first() else {
            return Err(Error::EmptyRecording);
        };

        let mut frames: Vec<FramePayload> = Vec::with_capacity(self.frames.len());
        let mut steps: Vec<SliderStep> = Vec::with_capacity(self.frames.len());
        for (index, frame) in self.frames.iter().enumerate() {
            if let Some(field) = first.first_mismatch(frame) {
                return Err(Error::FrameMismatch {
                    field,
                    frame: index,
                });
            }
            frames.push(FramePayload {
                name: index,
                data: frame.batches.clone(),
            });
            steps.push(SliderStep {
                args: (Some(vec![Some(index)]), jump_options()),
                label: String::new(),
                method: "animate",
            });
        }

        let mut layout = FigureLayout::bare(
            CHROME_WIDTH_SCALE * first.width + CHROME_WIDTH_PAD,
            CHROME_HEIGHT_SCALE * first.height + CHROME_HEIGHT_PAD,
        );
        layout.updatemenus = vec![play_pause_menu()];
        layout.sliders = vec![Slider {
            currentvalue: CurrentValue { visible: false },
            steps,
        }];

        tracing::debug!(frames = frames.len(), "assembled playback");

        Ok(Figure {
            data: first.batches.clone(),
            layout,
            frames,
            config: DisplayConfig {
                display_mode_bar: None,
                static_plot: Some(true),
            },
        })
    }
}

fn jump_options() -> AnimateOptions {
    AnimateOptions {
        frame: FrameTransition { redraw: false },
        mode: Some("immediate"),
        fromcurrent: None,
    }
}

fn play_pause_menu() -> UpdateMenu {
    UpdateMenu {
        buttons: vec![
            Button {
                args: (
                    None,
                    AnimateOptions {
                        frame: FrameTransition { redraw: false },
                        mode: None,
                        fromcurrent: Some(true),
                    },
                ),
                label: "Play".to_string(),
                method: "animate",
            },
            Button {
                args: (Some(vec![None]), jump_options()),
                label: "Pause".to_string(),
                method: "animate",
            },
        ],
        showactive: true,
        kind: "buttons",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{GraphAttrs, NodeAttrs};

    fn path_graph(n: usize) -> PlotGraph {
        let mut g = PlotGraph::default();
        for i in 0..n {
            g.set_node(format!("n{i}"), NodeAttrs::at(i as f64, (i % 2) as f64));
        }
        for i in 1..n {
            g.set_edge(format!("n{}", i - 1), format!("n{i}"));
        }
        g
    }

    #[test]
    fn empty_recording_cannot_be_played() {
        let rec = Recording::default();
        assert!(matches!(
            rec.assemble_playback(),
            Err(Error::EmptyRecording)
        ));
    }

    #[test]
    fn mismatched_node_counts_are_named() {
        let mut rec = Recording::default();
        rec.capture(&path_graph(2)).unwrap();
        rec.capture(&path_graph(3)).unwrap();

        let err = rec.assemble_playback().unwrap_err();
        assert!(matches!(
            err,
            Error::FrameMismatch {
                field: FrameField::NodeCount,
                frame: 1
            }
        ));
        assert!(err.to_string().contains("nodeCount"));
    }

    #[test]
    fn mismatched_canvas_is_reported_after_counts() {
        let mut rec = Recording::default();
        rec.capture(&path_graph(2)).unwrap();
        let mut g = path_graph(2);
        g.set_graph(GraphAttrs {
            height: Some(500.0),
            ..Default::default()
        });
        rec.capture(&g).unwrap();

        let err = rec.assemble_playback().unwrap_err();
        assert!(matches!(
            err,
            Error::FrameMismatch {
                field: FrameField::Height,
                ..
            }
        ));
    }

    #[test]
    fn playback_has_one_step_per_frame_and_padded_chrome() {
        let mut rec = Recording::default();
        for _ in 0..3 {
            rec.capture(&path_graph(3)).unwrap();
        }
        let fig = rec.assemble_playback().unwrap();

        assert_eq!(fig.frames.len(), 3);
        assert_eq!(
            fig.frames.iter().map(|f| f.name).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(fig.layout.sliders[0].steps.len(), 3);
        assert_eq!(fig.layout.sliders[0].steps[2].args.0, Some(vec![Some(2)]));
        assert_eq!(fig.layout.width, 1.05 * 800.0 + 72.0);
        assert_eq!(fig.layout.height, 450.0 + 76.0);
        assert_eq!(fig.data, rec.frames()[0].batches);
        assert_eq!(fig.config.static_plot, Some(true));
    }

    #[test]
    fn reset_starts_a_new_session() {
        let mut rec = Recording::default();
        rec.capture(&path_graph(2)).unwrap();
        rec.reset();
        assert!(rec.is_empty());
        rec.capture(&path_graph(4)).unwrap();
        assert_eq!(rec.len(), 1);
        assert!(rec.assemble_playback().is_ok());
    }
}
