//! Viewport fitting, world-to-screen projection and hit-testing.

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::interaction::InteractionState;

/// Padding used by [`calculate_base_transform`] callers that have no preference.
pub const DEFAULT_VIEWPORT_PADDING: f32 = 48.0;
/// Smallest world extent considered when fitting, per axis.
pub const MIN_WORLD_EXTENT: f32 = 1.0;
/// Smallest effective scale a projection may use.
pub const MIN_PROJECTED_SCALE: f32 = 0.01;
/// Smallest hit radius accepted by [`find_node_at`].
pub const MIN_HIT_RADIUS: f32 = 1.0;
/// Rendered node radius floor.
pub const MIN_RENDERED_NODE_RADIUS: f32 = 8.0;
/// Rendered node radius ceiling.
pub const MAX_RENDERED_NODE_RADIUS: f32 = 44.0;

/// A 2D point or vector in world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal component.
	pub x: f32,
	/// Vertical component.
	pub y: f32,
}

impl Point {
	/// The origin.
	pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

	/// Creates a point.
	pub const fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}

	/// Squared Euclidean length.
	pub fn length_squared(self) -> f32 {
		self.x * self.x + self.y * self.y
	}

	/// Euclidean length.
	pub fn length(self) -> f32 {
		self.length_squared().sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f32> for Point {
	type Output = Point;

	fn mul(self, rhs: f32) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// Pixel size of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasSize {
	/// Width in pixels.
	pub width: f32,
	/// Height in pixels.
	pub height: f32,
}

impl CanvasSize {
	/// Creates a canvas size.
	pub const fn new(width: f32, height: f32) -> Self {
		Self { width, height }
	}

	/// Center of the canvas. Non-positive sizes are not corrected.
	pub fn center(self) -> Point {
		Point::new(self.width * 0.5, self.height * 0.5)
	}

	fn is_drawable(self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}
}

/// Fit of a set of world positions into a canvas.
///
/// Derived data: recompute whenever positions or canvas size change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseTransform {
	/// World point mapped onto the canvas center.
	pub world_center: Point,
	/// Canvas center in screen pixels.
	pub canvas_center: Point,
	/// World-to-screen scale before user zoom.
	pub base_scale: f32,
}

impl BaseTransform {
	fn identity(canvas: CanvasSize) -> Self {
		Self {
			world_center: Point::ZERO,
			canvas_center: canvas.center(),
			base_scale: 1.0,
		}
	}
}

/// Computes the base transform that centers `positions` on the canvas.
///
/// With `fit_to_bounds` the bounding box is scaled to fill the canvas minus
/// `padding` on every side; otherwise the scale stays 1. Empty input or a
/// non-positive canvas yields an identity transform.
pub fn calculate_base_transform(
	positions: &[Point],
	canvas: CanvasSize,
	padding: f32,
	fit_to_bounds: bool,
) -> BaseTransform {
	if positions.is_empty() || !canvas.is_drawable() {
		return BaseTransform::identity(canvas);
	}

	let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
	let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
	for p in positions {
		min_x = min_x.min(p.x);
		max_x = max_x.max(p.x);
		min_y = min_y.min(p.y);
		max_y = max_y.max(p.y);
	}

	let base_scale = if fit_to_bounds {
		let world_width = (max_x - min_x).max(MIN_WORLD_EXTENT);
		let world_height = (max_y - min_y).max(MIN_WORLD_EXTENT);
		let usable_width = (canvas.width - padding * 2.0).max(MIN_WORLD_EXTENT);
		let usable_height = (canvas.height - padding * 2.0).max(MIN_WORLD_EXTENT);
		let scale = (usable_width / world_width).min(usable_height / world_height);
		if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
	} else {
		1.0
	};

	BaseTransform {
		world_center: Point::new((min_x + max_x) * 0.5, (min_y + max_y) * 0.5),
		canvas_center: canvas.center(),
		base_scale,
	}
}

/// Effective world-to-screen scale under the current zoom.
pub fn effective_scale(base: &BaseTransform, state: &InteractionState) -> f32 {
	(base.base_scale * state.scale()).max(MIN_PROJECTED_SCALE)
}

/// Maps world positions to screen positions.
pub fn project_positions(
	positions: &[Point],
	base: &BaseTransform,
	state: &InteractionState,
) -> Vec<Point> {
	let scale = effective_scale(base, state);
	let origin = base.canvas_center + state.offset();
	positions
		.iter()
		.map(|&world| origin + (world - base.world_center) * scale)
		.collect()
}

/// Maps a screen position back to world space. Inverse of [`project_positions`].
pub fn unproject_point(screen: Point, base: &BaseTransform, state: &InteractionState) -> Point {
	let scale = effective_scale(base, state);
	base.world_center + (screen - base.canvas_center - state.offset()) * (1.0 / scale)
}

/// Finds the node closest to `pointer` among those whose hit circle contains it.
///
/// `radius_of` gives the hit radius per node id (floored at [`MIN_HIT_RADIUS`]).
/// On equal distance the lower id wins.
pub fn find_node_at<F>(pointer: Point, projected: &[Point], radius_of: F) -> Option<usize>
where
	F: Fn(usize) -> f32,
{
	let mut found = None;
	let mut best = f32::INFINITY;
	for (id, &node) in projected.iter().enumerate() {
		let distance_sq = (pointer - node).length_squared();
		let hit_radius = radius_of(id).max(MIN_HIT_RADIUS);
		if distance_sq <= hit_radius * hit_radius && distance_sq < best {
			best = distance_sq;
			found = Some(id);
		}
	}
	found
}

/// Node radius on screen at the given zoom, kept within the rendered range.
pub fn scaled_node_radius(base_radius: f32, scale: f32) -> f32 {
	(base_radius * scale)
		.max(MIN_RENDERED_NODE_RADIUS)
		.min(MAX_RENDERED_NODE_RADIUS)
}
