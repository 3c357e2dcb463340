//! Headless core for interactive force-directed graph views.
//!
//! The crate turns a key-based adjacency map into node positions with a seeded
//! force simulation, fits those positions into a canvas, projects them under
//! live pan/zoom state, hit-tests pointer taps and partitions the scene into
//! draw layers. Drawing itself belongs to the host; a Leptos canvas host is
//! available behind the `canvas` feature.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod priority;
pub mod scene;
pub mod style;

#[cfg(feature = "canvas")]
pub mod components;

pub use config::{ForceLayoutConfig, InteractionConfig, LabelConfig, VisualizerOptions};
pub use error::{Error, Result};
pub use geometry::{
	BaseTransform, CanvasSize, Point, calculate_base_transform, find_node_at, project_positions,
	scaled_node_radius,
};
pub use interaction::{InteractionState, TapOutcome};
pub use layout::{
	ForceLayoutResult, JitterSource, SeededRandom, compute_force_layout,
	compute_force_layout_with,
};
pub use model::{
	GraphEdge, GraphModel, LayoutEdge, RenderableEdge, adjacency_signature, build_graph_model,
	build_layout_edges, build_renderable_edges,
};
pub use priority::RenderPriority;
pub use scene::{Frame, GraphScene, SceneUpdate};
pub use style::{
	Color, EdgeStyle, EdgeStyleInput, GraphSelectionColors, GraphStateColor, NodeInfo, NodeShape,
	NodeStyle, NodeStyleInput, SelectionState,
};

#[cfg(feature = "canvas")]
pub use components::force_graph::GraphVisualizerCanvas;

/// Initialize logging and panic hooks for the WASM target.
#[cfg(feature = "canvas")]
pub fn init_logging() {
	use log::{Level, info};

	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}
