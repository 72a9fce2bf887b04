use plotnet_graph::GraphOptions;
use plotnet_render::model::{BatchKind, DrawMode, HoverInfo};
use plotnet_render::{
    Batching, CircularLayout, Color, EdgeAttrs, Error, GraphAttrs, LabelPosition, NodeAttrs,
    PlotGraph, RenderConfig, build_figure, build_primitives, load_str,
};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn directed_pair() -> PlotGraph {
    let mut g = PlotGraph::new(GraphOptions::directed());
    g.set_node("A", NodeAttrs::at(0.0, 0.0));
    g.set_node("B", NodeAttrs::at(1.0, 1.0));
    g.set_edge("A", "B");
    g
}

#[test]
fn two_node_directed_example() {
    let fig = build_figure(&directed_pair(), &RenderConfig::default()).expect("figure");

    assert_eq!(fig.layout.width, 800.0);
    assert_eq!(fig.layout.height, 450.0);
    assert_eq!(fig.data.len(), 4);

    let edges = &fig.data[0];
    assert_eq!(edges.kind, BatchKind::EdgeLines);
    // Shaft plus two arrowhead strokes, each closed by a path break.
    assert_eq!(edges.x.len(), 9);
    assert_eq!(edges.segment_count(), 3);
    assert_eq!((edges.x[0], edges.y[0]), (Some(0.0), Some(0.0)));
    assert_eq!((edges.x[1], edges.y[1]), (Some(1.0), Some(1.0)));

    let nodes = &fig.data[2];
    assert_eq!(nodes.kind, BatchKind::Nodes);
    assert_eq!(nodes.points().len(), 2);
    assert_eq!(fig.data[3].kind, BatchKind::CornerAnchor);
}

#[test]
fn batches_come_out_edges_labels_nodes_anchor() {
    let mut g = directed_pair();
    g.set_node("C", NodeAttrs::at(1.0, 0.0).with_color(Color::BLACK));
    g.set_edge("A", "C");

    let built = build_primitives(&g, &RenderConfig::default(), Batching::ByStyle).expect("build");
    let kinds: Vec<BatchKind> = built.batches.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BatchKind::EdgeLines,
            BatchKind::EdgeLabels,
            BatchKind::Nodes,
            BatchKind::Nodes,
            BatchKind::CornerAnchor,
        ]
    );
    assert_eq!(built.batches[0].segment_count(), 6);
    assert_eq!(built.batches[1].points().len(), 2);
}

#[test]
fn per_element_batching_splits_equal_styles() {
    let mut g = directed_pair();
    g.set_node("C", NodeAttrs::at(1.0, 0.0));
    g.set_edge("A", "C");

    let built =
        build_primitives(&g, &RenderConfig::default(), Batching::PerElement).expect("build");
    let count = |kind| built.batches.iter().filter(|b| b.kind == kind).count();
    assert_eq!(count(BatchKind::EdgeLines), 2);
    assert_eq!(count(BatchKind::EdgeLabels), 1);
    assert_eq!(count(BatchKind::Nodes), 3);
    assert_eq!(count(BatchKind::CornerAnchor), 1);
}

#[test]
fn node_batches_carry_hover_mode_and_legible_fonts() {
    let mut g = PlotGraph::new(GraphOptions::directed());
    g.set_node(
        "hover",
        NodeAttrs::at(0.0, 0.0)
            .with_color(Color::rgb(200, 40, 40))
            .with_label_position(LabelPosition::Hover),
    );
    g.set_node("dark", NodeAttrs::at(1.0, 1.0).with_color(Color::rgb(10, 10, 10)));
    g.set_node(
        "above",
        NodeAttrs::at(1.0, 0.0)
            .with_color(Color::rgb(10, 10, 10))
            .with_label_position(LabelPosition::TopCenter),
    );

    let fig = build_figure(&g, &RenderConfig::default()).expect("figure");
    let nodes: Vec<_> = fig.data.iter().filter(|b| b.kind == BatchKind::Nodes).collect();
    assert_eq!(nodes.len(), 3);
    let by_color = |css: &str, position: LabelPosition| {
        nodes
            .iter()
            .find(|b| {
                b.marker.as_ref().is_some_and(|m| m.color == css)
                    && b.mode != DrawMode::Markers
                    && b.textposition == Some(position)
            })
            .copied()
    };

    let hover = nodes
        .iter()
        .find(|b| b.marker.as_ref().is_some_and(|m| m.color == "rgb(200, 40, 40)"))
        .expect("hover batch");
    assert_eq!(hover.mode, DrawMode::Markers);
    assert_eq!(hover.hoverinfo, HoverInfo::Text);
    assert_eq!(hover.textposition, Some(LabelPosition::MiddleCenter));

    let dark = by_color("rgb(10, 10, 10)", LabelPosition::MiddleCenter).expect("dark batch");
    assert_eq!(dark.mode, DrawMode::MarkersText);
    assert_eq!(dark.hoverinfo, HoverInfo::None);
    assert_eq!(
        dark.textfont.as_ref().map(|f| f.color.as_str()),
        Some("rgb(255, 255, 255)")
    );

    // Off-center labels sit on the white canvas, not on the marker.
    let above = by_color("rgb(10, 10, 10)", LabelPosition::TopCenter).expect("top batch");
    assert_eq!(
        above.textfont.as_ref().map(|f| f.color.as_str()),
        Some("rgb(0, 0, 0)")
    );
}

#[test]
fn reciprocal_edges_are_mirror_images() {
    let mut g = directed_pair();
    g.set_edge("B", "A");

    let built = build_primitives(&g, &RenderConfig::default(), Batching::ByStyle).expect("build");
    let edges = &built.batches[0];
    assert_eq!(edges.segment_count(), 4);

    let x = |i: usize| edges.x[i].expect("point");
    let y = |i: usize| edges.y[i].expect("point");
    // A->B starts at index 0; B->A starts at index 6 and ends (at A) at index 7.
    assert!(x(0).abs() > 0.0 || y(0).abs() > 0.0);
    assert!((x(0) + x(7)).abs() < 1e-12);
    assert!((y(0) + y(7)).abs() < 1e-12);
    assert!((x(1) - 1.0 + (x(6) - 1.0)).abs() < 1e-12);
    assert!((y(1) - 1.0 + (y(6) - 1.0)).abs() < 1e-12);
}

#[test]
fn undirected_figures_leave_axes_zoomable() {
    let mut g = PlotGraph::new(GraphOptions::undirected());
    g.set_node("A", NodeAttrs::at(0.0, 0.0));
    g.set_node("B", NodeAttrs::at(1.0, 1.0));
    g.set_edge_with_label("A", "B", EdgeAttrs::default().with_label("ab"));

    let fig = build_figure(&g, &RenderConfig::default()).expect("figure");
    assert_eq!(fig.data[0].segment_count(), 1);
    assert_eq!(fig.layout.xaxis.fixedrange, None);
    assert_eq!(
        fig.data[1].text.as_deref(),
        Some(&["ab".to_string()][..])
    );
}

#[test]
fn multigraphs_are_rejected() {
    let g = PlotGraph::new(GraphOptions {
        multigraph: true,
        directed: true,
    });
    let err = build_figure(&g, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedGraphKind { .. }));

    let text =
        std::fs::read_to_string(workspace_root().join("fixtures").join("multigraph.json"))
            .expect("fixture");
    let err = load_str(&text, &CircularLayout, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedGraphKind { .. }));
}

#[test]
fn margins_grow_the_canvas_and_move_the_anchors() {
    let mut g = directed_pair();
    g.set_graph(GraphAttrs {
        left: Some(80.0),
        top: Some(50.0),
        ..Default::default()
    });

    let fig = build_figure(&g, &RenderConfig::default()).expect("figure");
    assert_eq!(fig.layout.width, 880.0);
    assert_eq!(fig.layout.height, 500.0);

    let anchors = fig.data.last().expect("anchor batch").points();
    assert_eq!(anchors.len(), 4);
    assert_eq!(anchors[0].y, 0.0);
    assert_eq!(anchors[1].x, -80.0 / 880.0);
    assert_eq!(anchors[2].x, 1.0);
    assert_eq!(anchors[3].y, 1.0 + 50.0 / 500.0);
}

#[test]
fn fixture_loads_and_renders() {
    let text = std::fs::read_to_string(workspace_root().join("fixtures").join("basic.json"))
        .expect("fixture");
    let g = load_str(&text, &CircularLayout, &RenderConfig::default()).expect("load");
    assert_eq!(g.edge_count(), 3);

    let fig = build_figure(&g, &RenderConfig::default()).expect("figure");
    assert_eq!(fig.layout.width, 640.0);
    assert_eq!(fig.layout.height, 360.0);

    let labels = fig
        .data
        .iter()
        .find(|b| b.kind == BatchKind::EdgeLabels)
        .expect("label batch");
    assert_eq!(
        labels.text.clone().expect("label text"),
        vec!["4".to_string(), String::new(), String::new()]
    );
}

#[test]
fn figure_serializes_to_backend_schema() {
    let fig = build_figure(&directed_pair(), &RenderConfig::default()).expect("figure");
    let json = serde_json::to_value(&fig).expect("json");

    let edges = &json["data"][0];
    assert_eq!(edges["mode"], "lines");
    assert_eq!(edges["hoverinfo"], "none");
    assert!(edges["x"][2].is_null());
    assert_eq!(edges["line"]["color"], "rgb(0, 0, 0)");
    assert!(edges.get("kind").is_none());

    let nodes = &json["data"][2];
    assert_eq!(nodes["mode"], "markers+text");
    assert_eq!(nodes["textposition"], "middle center");
    assert_eq!(nodes["marker"]["color"], "rgb(255, 255, 255)");

    let anchor = &json["data"][3];
    assert_eq!(anchor["marker"]["color"], "rgba(0, 0, 0, 0.0)");

    assert_eq!(json["layout"]["showlegend"], false);
    assert_eq!(json["layout"]["margin"]["t"], 0.0);
    assert_eq!(json["layout"]["xaxis"]["fixedrange"], true);
    assert_eq!(json["layout"]["xaxis"]["showticklabels"], false);
    assert!(json.get("frames").is_none());
    assert_eq!(json["config"]["displayModeBar"], false);
}
