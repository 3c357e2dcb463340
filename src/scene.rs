//! Per-view pipeline: model, layout, projection, hit-testing and draw order.
//!
//! [`GraphScene`] caches the expensive stages and only redoes them when their
//! inputs change: the model on a new content signature, the layout when node
//! count, layout edges, radii or layout config change. Per-frame work
//! ([`GraphScene::frame`]) is recomputed from scratch.

use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;

use crate::config::{ForceLayoutConfig, VisualizerOptions};
use crate::geometry::{
	BaseTransform, CanvasSize, Point, calculate_base_transform, project_positions,
	scaled_node_radius,
};
use crate::interaction::{InteractionState, TapOutcome};
use crate::layout::{ForceLayoutResult, compute_force_layout};
use crate::model::{
	GraphModel, LayoutEdge, RenderableEdge, adjacency_signature, build_graph_model,
	build_layout_edges, build_renderable_edges,
};
use crate::priority::RenderPriority;
use crate::style::{
	NodeInfo, NodeStyle, NodeStyleInput, default_node_style, resolve_node_styles,
};

/// What [`GraphScene::update`] recomputed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneUpdate {
	/// The model was rebuilt from new content.
	pub rebuilt: bool,
	/// The layout was recomputed.
	pub relaid_out: bool,
}

/// Screen-space snapshot of a scene for one canvas size and view state.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	/// Fit of the layout into the canvas.
	pub base: BaseTransform,
	/// Projected node centers, by node id.
	pub positions: Vec<Point>,
	/// Rendered node radii, by node id.
	pub radii: Vec<f32>,
	/// Draw order.
	pub priority: RenderPriority,
}

/// Cached graph pipeline for one view.
#[derive(Clone, Debug)]
pub struct GraphScene<K> {
	signature: u64,
	model: GraphModel<K>,
	layout_edges: Vec<LayoutEdge>,
	layout_radii: Vec<f32>,
	layout_config: ForceLayoutConfig,
	layout: ForceLayoutResult,
	renderable_edges: Vec<RenderableEdge<K>>,
	edge_mode: (bool, bool),
}

impl<K: Hash + Eq + Clone> GraphScene<K> {
	/// Builds the model and runs the layout.
	pub fn new<F>(
		adjacency: &IndexMap<K, Vec<K>>,
		node_info: &IndexMap<K, NodeInfo>,
		fallback: F,
		options: &VisualizerOptions,
	) -> Self
	where
		F: Fn(&K) -> NodeInfo,
	{
		let model = build_graph_model(adjacency, node_info, fallback);
		let layout_edges = build_layout_edges(model.edges());
		let layout_radii = model.node_sizes();
		let layout = compute_force_layout(
			model.node_count(),
			&layout_edges,
			&options.layout,
			&layout_radii,
		);
		let edge_mode = (options.directed, options.show_arrows);
		let renderable_edges = build_renderable_edges(model.edges(), edge_mode.0, edge_mode.1);

		Self {
			signature: adjacency_signature(adjacency, node_info),
			model,
			layout_edges,
			layout_radii,
			layout_config: options.layout.clone(),
			layout,
			renderable_edges,
			edge_mode,
		}
	}

	/// Brings the scene up to date with new inputs.
	///
	/// `fallback` is only consulted when the content signature changed.
	/// A rebuild clears the selection when `clear_selection_on_init` is set.
	pub fn update<F>(
		&mut self,
		adjacency: &IndexMap<K, Vec<K>>,
		node_info: &IndexMap<K, NodeInfo>,
		fallback: F,
		options: &VisualizerOptions,
		state: &mut InteractionState,
	) -> SceneUpdate
	where
		F: Fn(&K) -> NodeInfo,
	{
		let signature = adjacency_signature(adjacency, node_info);
		let rebuilt = signature != self.signature;
		if rebuilt {
			self.model = build_graph_model(adjacency, node_info, fallback);
			self.signature = signature;
			debug!(
				"graph model rebuilt: signature {:#018x}, {} nodes, {} edges",
				signature,
				self.model.node_count(),
				self.model.edges().len()
			);
			if options.clear_selection_on_init {
				state.set_selected_node_id(None);
			}
		}

		let mut edges_changed = false;
		if rebuilt {
			let layout_edges = build_layout_edges(self.model.edges());
			edges_changed = layout_edges != self.layout_edges;
			self.layout_edges = layout_edges;
		}
		let layout_radii = self.model.node_sizes();
		let relaid_out = edges_changed
			|| self.layout.positions.len() != self.model.node_count()
			|| layout_radii != self.layout_radii
			|| options.layout != self.layout_config;
		if relaid_out {
			self.layout = compute_force_layout(
				self.model.node_count(),
				&self.layout_edges,
				&options.layout,
				&layout_radii,
			);
			self.layout_radii = layout_radii;
			self.layout_config = options.layout.clone();
			debug!(
				"layout recomputed in {} iterations",
				self.layout.iterations_performed
			);
		}

		let edge_mode = (options.directed, options.show_arrows);
		if rebuilt || edge_mode != self.edge_mode {
			self.renderable_edges = build_renderable_edges(self.model.edges(), edge_mode.0, edge_mode.1);
			self.edge_mode = edge_mode;
		}

		SceneUpdate {
			rebuilt,
			relaid_out,
		}
	}
}

impl<K> GraphScene<K> {
	/// Content signature of the current model.
	pub fn signature(&self) -> u64 {
		self.signature
	}

	/// Current model.
	pub fn model(&self) -> &GraphModel<K> {
		&self.model
	}

	/// Current layout in world coordinates.
	pub fn layout(&self) -> &ForceLayoutResult {
		&self.layout
	}

	/// Simulation edges of the current model.
	pub fn layout_edges(&self) -> &[LayoutEdge] {
		&self.layout_edges
	}

	/// Drawable edges of the current model.
	pub fn renderable_edges(&self) -> &[RenderableEdge<K>] {
		&self.renderable_edges
	}

	/// Projects the layout for one canvas size and view state.
	///
	/// Radii come from [`default_node_style`] with the configured selection
	/// colors; use [`frame_with`](Self::frame_with) for a custom provider.
	pub fn frame(
		&self,
		canvas: CanvasSize,
		options: &VisualizerOptions,
		state: &InteractionState,
	) -> Frame {
		let colors = options.selection_colors;
		self.frame_with(canvas, options, state, |input| default_node_style(input, &colors))
	}

	/// [`frame`](Self::frame) with rendered and hit radii taken from the
	/// `radius` of the styles `node_style` resolves.
	pub fn frame_with<F>(
		&self,
		canvas: CanvasSize,
		options: &VisualizerOptions,
		state: &InteractionState,
		node_style: F,
	) -> Frame
	where
		F: Fn(&NodeStyleInput<'_, K>) -> NodeStyle,
	{
		let base = calculate_base_transform(
			&self.layout.positions,
			canvas,
			options.viewport_padding,
			options.fit_to_viewport,
		);
		let positions = project_positions(&self.layout.positions, &base, state);
		let radii = resolve_node_styles(&self.model, state.selected_node_id(), node_style)
			.iter()
			.map(|style| scaled_node_radius(style.radius, state.scale()))
			.collect();
		let priority = RenderPriority::resolve(
			&self.renderable_edges,
			self.model.node_count(),
			state.selected_node_id(),
		);

		Frame {
			base,
			positions,
			radii,
			priority,
		}
	}

	/// Routes a tap at canvas position `pointer` to the selection.
	pub fn tap(
		&self,
		frame: &Frame,
		pointer: Point,
		options: &VisualizerOptions,
		state: &mut InteractionState,
	) -> TapOutcome {
		if !options.enable_tap_selection {
			return TapOutcome::Ignored;
		}
		state.handle_tap(pointer, &frame.positions, &frame.radii, &options.interaction)
	}

	/// Applies a pan/zoom gesture tick with a canvas-space centroid.
	///
	/// Returns whether the gesture was accepted.
	pub fn gesture(
		&self,
		frame: &Frame,
		centroid: Point,
		pan: Point,
		zoom: f32,
		options: &VisualizerOptions,
		state: &mut InteractionState,
	) -> bool {
		if !options.enable_pan_zoom {
			return false;
		}
		state.apply_screen_transform(centroid, pan, zoom, &frame.base, &options.interaction);
		true
	}

	/// Key of the selected node, if the selection is inside this model.
	pub fn selected_key(&self, state: &InteractionState) -> Option<&K> {
		state
			.selected_node_id()
			.and_then(|id| self.model.node_key(id))
	}
}
