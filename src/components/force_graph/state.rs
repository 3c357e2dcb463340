use indexmap::IndexMap;

use crate::config::VisualizerOptions;
use crate::geometry::{CanvasSize, Point};
use crate::interaction::{InteractionState, TapOutcome};
use crate::scene::{Frame, GraphScene, SceneUpdate};
use crate::style::{NodeInfo, default_node_info};

/// Pointer travel, in pixels, below which a press-release counts as a click.
pub const CLICK_SLOP: f32 = 4.0;
/// Zoom factor per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 1.1;

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start: Point,
	pub last: Point,
}

pub struct CanvasState {
	pub scene: GraphScene<String>,
	pub interaction: InteractionState,
	pub options: VisualizerOptions,
	pub size: CanvasSize,
	pub pan: PanState,
	frame: Frame,
	dirty: bool,
}

fn fallback_info(key: &String) -> NodeInfo {
	default_node_info(key.as_str())
}

impl CanvasState {
	pub fn new(
		adjacency: &IndexMap<String, Vec<String>>,
		node_info: &IndexMap<String, NodeInfo>,
		options: VisualizerOptions,
		width: f64,
		height: f64,
	) -> Self {
		let scene = GraphScene::new(adjacency, node_info, fallback_info, &options);
		let interaction = InteractionState::default();
		let size = CanvasSize::new(width as f32, height as f32);
		let frame = scene.frame(size, &options, &interaction);
		Self {
			scene,
			interaction,
			options,
			size,
			pan: PanState::default(),
			frame,
			dirty: true,
		}
	}

	pub fn frame(&self) -> &Frame {
		&self.frame
	}

	pub fn selected_key(&self) -> Option<&String> {
		self.scene.selected_key(&self.interaction)
	}

	/// Returns whether a redraw is pending and clears the flag.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}

	pub fn update(
		&mut self,
		adjacency: &IndexMap<String, Vec<String>>,
		node_info: &IndexMap<String, NodeInfo>,
		options: VisualizerOptions,
	) -> SceneUpdate {
		let update = self.scene.update(
			adjacency,
			node_info,
			fallback_info,
			&options,
			&mut self.interaction,
		);
		self.options = options;
		self.refresh();
		update
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.size = CanvasSize::new(width as f32, height as f32);
		self.refresh();
	}

	pub fn press(&mut self, pointer: Point) {
		self.pan = PanState {
			active: true,
			start: pointer,
			last: pointer,
		};
	}

	pub fn drag_to(&mut self, pointer: Point) {
		if !self.pan.active {
			return;
		}
		let delta = pointer - self.pan.last;
		self.pan.last = pointer;
		if self.scene.gesture(
			&self.frame,
			pointer,
			delta,
			1.0,
			&self.options,
			&mut self.interaction,
		) {
			self.refresh();
		}
	}

	/// Ends a press; a release close to the press point is routed as a tap.
	pub fn release(&mut self, pointer: Point) -> Option<TapOutcome> {
		if !std::mem::take(&mut self.pan.active) {
			return None;
		}
		if (pointer - self.pan.start).length() > CLICK_SLOP {
			return None;
		}
		let outcome = self
			.scene
			.tap(&self.frame, pointer, &self.options, &mut self.interaction);
		if outcome != TapOutcome::Ignored {
			self.refresh();
		}
		Some(outcome)
	}

	pub fn cancel(&mut self) {
		self.pan.active = false;
	}

	/// Zooms around `pointer`; positive `delta_y` zooms out.
	pub fn wheel(&mut self, pointer: Point, delta_y: f64) {
		let zoom = if delta_y > 0.0 {
			1.0 / WHEEL_ZOOM_STEP
		} else {
			WHEEL_ZOOM_STEP
		};
		if self.scene.gesture(
			&self.frame,
			pointer,
			Point::ZERO,
			zoom,
			&self.options,
			&mut self.interaction,
		) {
			self.refresh();
		}
	}

	fn refresh(&mut self) {
		self.frame = self.scene.frame(self.size, &self.options, &self.interaction);
		self.dirty = true;
	}
}
