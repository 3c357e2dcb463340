//! Live pan/zoom/selection state and the gesture math that drives it.

use crate::config::InteractionConfig;
use crate::geometry::{BaseTransform, Point, find_node_at};

/// Lowest scale the state will ever hold.
pub const MIN_STATE_SCALE: f32 = 0.01;
/// Hit radius used for nodes with no rendered radius.
pub const FALLBACK_HIT_RADIUS: f32 = 12.0;

/// User-controlled view state: zoom, pan offset and the selected node.
///
/// Owned by the host and kept across model rebuilds. It has no internal
/// locking; callers serialize writes. Every effective write bumps
/// [`revision`](Self::revision) so a host can diff cheaply.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
	scale: f32,
	offset: Point,
	selected_node_id: Option<usize>,
	revision: u64,
}

impl Default for InteractionState {
	fn default() -> Self {
		Self::new(1.0, Point::ZERO, None)
	}
}

/// Result of a tap routed through [`InteractionState::handle_tap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
	/// A node was hit and is now selected.
	Selected(usize),
	/// The background was hit and the selection was cleared.
	Cleared,
	/// The background was hit and the selection was kept.
	Ignored,
}

impl InteractionState {
	/// Creates a state; the scale is floored at [`MIN_STATE_SCALE`].
	pub fn new(scale: f32, offset: Point, selected_node_id: Option<usize>) -> Self {
		Self {
			scale: floor_scale(scale),
			offset,
			selected_node_id,
			revision: 0,
		}
	}

	/// Current user zoom.
	pub fn scale(&self) -> f32 {
		self.scale
	}

	/// Current pan offset in screen pixels.
	pub fn offset(&self) -> Point {
		self.offset
	}

	/// Currently selected node, if any.
	pub fn selected_node_id(&self) -> Option<usize> {
		self.selected_node_id
	}

	/// Mutation counter.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Sets the zoom, floored at [`MIN_STATE_SCALE`].
	pub fn set_scale(&mut self, scale: f32) {
		let scale = floor_scale(scale);
		if scale != self.scale {
			self.scale = scale;
			self.revision += 1;
		}
	}

	/// Sets the pan offset.
	pub fn set_offset(&mut self, offset: Point) {
		if offset != self.offset {
			self.offset = offset;
			self.revision += 1;
		}
	}

	/// Sets the selection. Any id is accepted.
	pub fn set_selected_node_id(&mut self, id: Option<usize>) {
		if id != self.selected_node_id {
			self.selected_node_id = id;
			self.revision += 1;
		}
	}

	/// Restores the given view and optionally drops the selection.
	pub fn reset_view(&mut self, scale: f32, offset: Point, clear_selection: bool) {
		self.set_scale(scale);
		self.set_offset(offset);
		if clear_selection {
			self.set_selected_node_id(None);
		}
	}

	/// Restores unit zoom, zero offset and no selection.
	pub fn reset(&mut self) {
		self.reset_view(1.0, Point::ZERO, true);
	}

	/// Applies one pan/zoom gesture tick.
	///
	/// `centroid` is in view space, i.e. relative to the canvas center. The
	/// world point under the centroid before the call sits under
	/// `centroid + pan` after it.
	pub fn apply_transform(
		&mut self,
		centroid: Point,
		pan: Point,
		zoom: f32,
		min_scale: f32,
		max_scale: f32,
	) {
		let min_scale = floor_scale(min_scale);
		let max_scale = max_scale.max(min_scale);
		let previous = floor_scale(self.scale);
		let next = (previous * zoom).max(min_scale).min(max_scale);
		let ratio = next / previous;

		self.set_offset(centroid + (self.offset - centroid) * ratio + pan);
		self.set_scale(next);
	}

	/// [`apply_transform`](Self::apply_transform) for a centroid in canvas pixels.
	pub fn apply_screen_transform(
		&mut self,
		centroid: Point,
		pan: Point,
		zoom: f32,
		base: &BaseTransform,
		config: &InteractionConfig,
	) {
		self.apply_transform(
			centroid - base.canvas_center,
			pan,
			zoom,
			config.resolved_min_scale(),
			config.resolved_max_scale(),
		);
	}

	/// Selects the node under `pointer`, or handles a background tap.
	///
	/// Hit radius per node is its rendered radius plus the configured tap padding.
	pub fn handle_tap(
		&mut self,
		pointer: Point,
		projected: &[Point],
		rendered_radii: &[f32],
		config: &InteractionConfig,
	) -> TapOutcome {
		let padding = config.resolved_tap_selection_padding();
		let hit = find_node_at(pointer, projected, |id| {
			rendered_radii.get(id).copied().unwrap_or(FALLBACK_HIT_RADIUS) + padding
		});
		match hit {
			Some(id) => {
				self.set_selected_node_id(Some(id));
				TapOutcome::Selected(id)
			}
			None if config.clear_selection_on_background_tap => {
				self.set_selected_node_id(None);
				TapOutcome::Cleared
			}
			None => TapOutcome::Ignored,
		}
	}
}

fn floor_scale(scale: f32) -> f32 {
	scale.max(MIN_STATE_SCALE)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geometry::{CanvasSize, calculate_base_transform, project_positions, unproject_point};

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() <= 1e-2 && (a.y - b.y).abs() <= 1e-2
	}

	#[test]
	fn apply_transform_zooms_and_pans() {
		let mut state = InteractionState::default();
		state.apply_transform(Point::new(100.0, 100.0), Point::new(20.0, -8.0), 1.5, 0.35, 4.5);
		assert!(state.scale() > 1.0);
		assert_ne!(state.offset(), Point::ZERO);
		// 100 + (0 - 100) * 1.5 + pan
		assert_eq!(state.offset(), Point::new(-30.0, -58.0));
	}

	#[test]
	fn apply_transform_keeps_anchor_in_view_space() {
		let base = BaseTransform {
			world_center: Point::new(3.0, -2.0),
			canvas_center: Point::ZERO,
			base_scale: 1.7,
		};
		let mut state = InteractionState::default();
		let centroid = Point::new(100.0, 100.0);
		let pan = Point::new(20.0, -8.0);
		let anchor = unproject_point(centroid, &base, &state);

		state.apply_transform(centroid, pan, 1.5, 0.35, 4.5);

		let after = project_positions(&[anchor], &base, &state)[0];
		assert!(close(after, centroid + pan));
	}

	#[test]
	fn apply_screen_transform_keeps_anchor_on_canvas() {
		let positions = [Point::new(-10.0, -20.0), Point::new(40.0, 30.0)];
		let base = calculate_base_transform(&positions, CanvasSize::new(1080.0, 720.0), 48.0, true);
		let config = InteractionConfig::default();
		let mut state = InteractionState::new(1.3, Point::new(12.0, -4.0), None);
		let centroid = Point::new(700.0, 210.0);
		let pan = Point::new(-15.0, 6.0);
		let anchor = unproject_point(centroid, &base, &state);

		state.apply_screen_transform(centroid, pan, 0.8, &base, &config);

		let after = project_positions(&[anchor], &base, &state)[0];
		assert!(close(after, centroid + pan));
	}

	#[test]
	fn apply_transform_clamps_scale() {
		let mut state = InteractionState::default();
		state.apply_transform(Point::ZERO, Point::ZERO, 100.0, 0.35, 4.5);
		assert_eq!(state.scale(), 4.5);
		state.apply_transform(Point::ZERO, Point::ZERO, 0.0001, 0.35, 4.5);
		assert_eq!(state.scale(), 0.35);
		// inverted bounds collapse to the minimum
		state.apply_transform(Point::ZERO, Point::ZERO, 10.0, 2.0, 1.0);
		assert_eq!(state.scale(), 2.0);
	}

	#[test]
	fn reset_view_clears_selection() {
		let mut state = InteractionState::new(2.2, Point::new(80.0, -30.0), Some(3));
		state.reset();
		assert_eq!(state.scale(), 1.0);
		assert_eq!(state.offset(), Point::ZERO);
		assert_eq!(state.selected_node_id(), None);

		state.set_selected_node_id(Some(1));
		state.reset_view(0.0, Point::new(1.0, 1.0), false);
		assert_eq!(state.scale(), MIN_STATE_SCALE);
		assert_eq!(state.selected_node_id(), Some(1));
	}

	#[test]
	fn revision_only_moves_on_change() {
		let mut state = InteractionState::default();
		state.set_scale(1.0);
		state.set_offset(Point::ZERO);
		state.set_selected_node_id(None);
		assert_eq!(state.revision(), 0);
		state.set_selected_node_id(Some(4));
		state.set_selected_node_id(Some(4));
		assert_eq!(state.revision(), 1);
	}

	#[test]
	fn tap_selects_and_clears() {
		let projected = [Point::new(10.0, 10.0), Point::new(40.0, 10.0)];
		let radii = [10.0];
		let mut config = InteractionConfig::default();
		let mut state = InteractionState::default();

		// second node uses the fallback radius 12 + padding 8
		assert_eq!(
			state.handle_tap(Point::new(58.0, 10.0), &projected, &radii, &config),
			TapOutcome::Selected(1)
		);
		assert_eq!(state.selected_node_id(), Some(1));

		config.clear_selection_on_background_tap = false;
		assert_eq!(
			state.handle_tap(Point::new(300.0, 300.0), &projected, &radii, &config),
			TapOutcome::Ignored
		);
		assert_eq!(state.selected_node_id(), Some(1));

		config.clear_selection_on_background_tap = true;
		assert_eq!(
			state.handle_tap(Point::new(300.0, 300.0), &projected, &radii, &config),
			TapOutcome::Cleared
		);
		assert_eq!(state.selected_node_id(), None);
	}
}
