//! Seeded force-directed layout.
//!
//! One synchronous run per call: pairwise inverse-power repulsion with a
//! short-range collision push, springs along layout edges (optionally
//! softened around hubs), a pull to the origin, then damped integration with
//! a velocity cap until the iteration cap or convergence. Output is a pure
//! function of the inputs; identical inputs give bit-identical positions.

use log::debug;

use crate::config::ForceLayoutConfig;
use crate::geometry::Point;
use crate::model::LayoutEdge;
use crate::style::DEFAULT_NODE_SIZE;

/// Half-width of the square the initial positions are drawn from.
pub const INITIAL_POSITION_RANGE: f32 = 100.0;
/// Smallest physical radius a node can have.
pub const MIN_NODE_RADIUS: f32 = 4.0;
/// Squared distance below which a pair is considered coincident.
pub const DISTANCE_EPSILON: f32 = 0.001;

/// Final positions of a layout run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForceLayoutResult {
	/// World position per node id, already scaled by `edge_distance_scale`.
	pub positions: Vec<Point>,
	/// Iterations actually run.
	pub iterations_performed: u32,
}

/// Source of the pseudo-random numbers used for placement and jitter.
pub trait JitterSource {
	/// Next value in `[min, max]`.
	fn next_in(&mut self, min: f32, max: f32) -> f32;
}

/// 32-bit linear congruential generator (Numerical Recipes constants).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
	state: u64,
}

impl SeededRandom {
	const MULTIPLIER: u64 = 1_664_525;
	const INCREMENT: u64 = 1_013_904_223;
	const MASK: u64 = 0xFFFF_FFFF;

	/// Generator seeded with the two's-complement bits of `seed`.
	pub fn new(seed: i32) -> Self {
		Self {
			state: u64::from(seed as u32),
		}
	}
}

impl JitterSource for SeededRandom {
	fn next_in(&mut self, min: f32, max: f32) -> f32 {
		self.state = (Self::MULTIPLIER
			.wrapping_mul(self.state)
			.wrapping_add(Self::INCREMENT))
			& Self::MASK;
		let normalized = (self.state as f64 / Self::MASK as f64) as f32;
		min + (max - min) * normalized
	}
}

/// Lays out `node_count` nodes with a generator seeded from `config.random_seed`.
///
/// `node_radii` shorter than `node_count` is padded with the default node size.
pub fn compute_force_layout(
	node_count: usize,
	edges: &[LayoutEdge],
	config: &ForceLayoutConfig,
	node_radii: &[f32],
) -> ForceLayoutResult {
	let mut rng = SeededRandom::new(config.random_seed);
	compute_force_layout_with(node_count, edges, config, node_radii, &mut rng)
}

/// [`compute_force_layout`] with a caller-supplied jitter source.
pub fn compute_force_layout_with<R: JitterSource>(
	node_count: usize,
	edges: &[LayoutEdge],
	config: &ForceLayoutConfig,
	node_radii: &[f32],
	rng: &mut R,
) -> ForceLayoutResult {
	if node_count == 0 {
		return ForceLayoutResult::default();
	}

	let cfg = config.resolved();
	let mut x: Vec<f32> = (0..node_count)
		.map(|_| rng.next_in(-INITIAL_POSITION_RANGE, INITIAL_POSITION_RANGE))
		.collect();
	let mut y: Vec<f32> = (0..node_count)
		.map(|_| rng.next_in(-INITIAL_POSITION_RANGE, INITIAL_POSITION_RANGE))
		.collect();
	let mut vx = vec![0.0_f32; node_count];
	let mut vy = vec![0.0_f32; node_count];
	let mut fx = vec![0.0_f32; node_count];
	let mut fy = vec![0.0_f32; node_count];

	let radii: Vec<f32> = (0..node_count)
		.map(|id| {
			node_radii
				.get(id)
				.map_or(DEFAULT_NODE_SIZE, |r| r.max(MIN_NODE_RADIUS))
		})
		.collect();

	let springs: Vec<(usize, usize)> = edges
		.iter()
		.filter(|e| e.from_id < node_count && e.to_id < node_count && e.from_id != e.to_id)
		.map(|e| (e.from_id, e.to_id))
		.collect();
	let mut degree = vec![0_u32; node_count];
	for &(from, to) in &springs {
		degree[from] += 1;
		degree[to] += 1;
	}

	let mut iterations_performed = 0;
	let mut converged = false;

	for iteration in 0..cfg.iterations {
		iterations_performed = iteration + 1;
		fx.fill(0.0);
		fy.fill(0.0);

		for i in 0..node_count {
			for j in (i + 1)..node_count {
				let mut dx = x[j] - x[i];
				let mut dy = y[j] - y[i];
				let mut dist_sq = dx * dx + dy * dy;

				if dist_sq < DISTANCE_EPSILON {
					dx = rng.next_in(-1.0, 1.0);
					dy = rng.next_in(-1.0, 1.0);
					dist_sq = dx * dx + dy * dy + DISTANCE_EPSILON;
				}

				let distance = dist_sq.sqrt();
				let (nx, ny) = (dx / distance, dy / distance);
				let denominator = (f64::from(distance).powf(f64::from(cfg.repulsion_exponent)) as f32)
					.max(DISTANCE_EPSILON);
				let repulsion = cfg.node_repulsion / denominator;
				fx[i] -= nx * repulsion;
				fy[i] -= ny * repulsion;
				fx[j] += nx * repulsion;
				fy[j] += ny * repulsion;

				let min_distance = radii[i] + radii[j] + cfg.collision_padding;
				if distance < min_distance {
					let overlap = (min_distance - distance) * cfg.collision_strength;
					fx[i] -= nx * overlap;
					fy[i] -= ny * overlap;
					fx[j] += nx * overlap;
					fy[j] += ny * overlap;
				}
			}
		}

		for &(from, to) in &springs {
			let dx = x[to] - x[from];
			let dy = y[to] - y[from];
			let distance = (dx * dx + dy * dy).max(DISTANCE_EPSILON).sqrt();
			let (nx, ny) = (dx / distance, dy / distance);
			let hub_damp = if cfg.degree_aware_edge_tension {
				(degree[from].max(degree[to]) as f32).sqrt().max(1.0)
			} else {
				1.0
			};
			let pull = cfg.edge_tension * (distance - cfg.ideal_edge_length) / hub_damp;

			fx[from] += nx * pull;
			fy[from] += ny * pull;
			fx[to] -= nx * pull;
			fy[to] -= ny * pull;
		}

		if cfg.center_tension > 0.0 {
			for id in 0..node_count {
				fx[id] -= x[id] * cfg.center_tension;
				fy[id] -= y[id] * cfg.center_tension;
			}
		}

		let mut max_speed = 0.0_f32;
		for id in 0..node_count {
			vx[id] = clamp_velocity((vx[id] + fx[id]) * cfg.damping, cfg.max_velocity);
			vy[id] = clamp_velocity((vy[id] + fy[id]) * cfg.damping, cfg.max_velocity);
			x[id] += vx[id];
			y[id] += vy[id];
			max_speed = max_speed.max((vx[id] * vx[id] + vy[id] * vy[id]).sqrt());
		}

		if max_speed < cfg.convergence_threshold {
			converged = true;
			break;
		}
	}

	debug!(
		"force layout: {} nodes, {} springs ({} skipped), {} iterations, converged: {}",
		node_count,
		springs.len(),
		edges.len() - springs.len(),
		iterations_performed,
		converged
	);

	let positions = x
		.into_iter()
		.zip(y)
		.map(|(px, py)| Point::new(px * cfg.edge_distance_scale, py * cfg.edge_distance_scale))
		.collect();

	ForceLayoutResult {
		positions,
		iterations_performed,
	}
}

fn clamp_velocity(v: f32, limit: f32) -> f32 {
	v.max(-limit).min(limit)
}
