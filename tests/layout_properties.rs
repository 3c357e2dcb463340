//! Behavioral checks of the force layout on small fixed graphs.

use force_graph_view::{ForceLayoutConfig, LayoutEdge, Point, compute_force_layout};

fn edges(pairs: &[(usize, usize)]) -> Vec<LayoutEdge> {
	pairs.iter().map(|&(a, b)| LayoutEdge::new(a, b)).collect()
}

fn min_pair_distance(positions: &[Point]) -> f32 {
	let mut min = f32::INFINITY;
	for (i, a) in positions.iter().enumerate() {
		for b in &positions[i + 1..] {
			min = min.min((*b - *a).length());
		}
	}
	min
}

fn average_edge_length(positions: &[Point], edges: &[LayoutEdge]) -> f32 {
	let total: f32 = edges
		.iter()
		.map(|e| (positions[e.to_id] - positions[e.from_id]).length())
		.sum();
	total / edges.len() as f32
}

#[test]
fn same_seed_gives_same_layout() {
	let ring = edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
	let config = ForceLayoutConfig {
		iterations: 120,
		random_seed: 2026,
		..ForceLayoutConfig::default()
	};

	let first = compute_force_layout(4, &ring, &config, &[]);
	let second = compute_force_layout(4, &ring, &config, &[]);

	assert_eq!(first.iterations_performed, second.iterations_performed);
	assert_eq!(first.positions.len(), second.positions.len());
	for (a, b) in first.positions.iter().zip(&second.positions) {
		assert!((a.x - b.x).abs() <= 1e-4);
		assert!((a.y - b.y).abs() <= 1e-4);
	}
}

#[test]
fn different_seeds_give_different_layouts() {
	let ring = edges(&[(0, 1), (1, 2), (2, 0)]);
	let a = compute_force_layout(3, &ring, &ForceLayoutConfig { random_seed: 1, ..Default::default() }, &[]);
	let b = compute_force_layout(3, &ring, &ForceLayoutConfig { random_seed: 2, ..Default::default() }, &[]);
	assert_ne!(a.positions, b.positions);
}

#[test]
fn high_threshold_stops_after_one_iteration() {
	let chain = edges(&[(0, 1), (1, 2)]);
	let config = ForceLayoutConfig {
		iterations: 300,
		convergence_threshold: 9999.0,
		random_seed: 123,
		..ForceLayoutConfig::default()
	};
	assert_eq!(compute_force_layout(3, &chain, &config, &[]).iterations_performed, 1);
}

#[test]
fn center_tension_compacts_disconnected_components() {
	let chains = edges(&[(0, 1), (1, 2), (2, 3), (4, 5), (5, 6), (6, 7)]);
	let loose = ForceLayoutConfig {
		iterations: 180,
		center_tension: 0.0,
		random_seed: 77,
		..ForceLayoutConfig::default()
	};
	let compact = ForceLayoutConfig {
		center_tension: 0.06,
		..loose.clone()
	};

	let max_radius = |config: &ForceLayoutConfig| {
		compute_force_layout(8, &chains, config, &[])
			.positions
			.iter()
			.map(|p| p.length())
			.fold(0.0_f32, f32::max)
	};

	assert!(max_radius(&compact) < max_radius(&loose));
}

#[test]
fn collision_increases_minimum_spacing() {
	let chain = edges(&[(0, 1), (1, 2), (2, 3), (3, 4)]);
	let radii = [20.0; 5];
	let without = ForceLayoutConfig {
		iterations: 180,
		node_repulsion: 250.0,
		edge_tension: 0.075,
		base_edge_length: 24.0,
		collision_padding: 0.0,
		collision_strength: 0.0,
		random_seed: 99,
		..ForceLayoutConfig::default()
	};
	let with = ForceLayoutConfig {
		collision_padding: 10.0,
		collision_strength: 0.9,
		..without.clone()
	};

	let spaced = compute_force_layout(5, &chain, &with, &radii);
	let packed = compute_force_layout(5, &chain, &without, &radii);

	assert!(min_pair_distance(&spaced.positions) > min_pair_distance(&packed.positions));
}

#[test]
fn edge_distance_scale_stretches_edges() {
	let ring = edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
	let base = ForceLayoutConfig {
		iterations: 220,
		random_seed: 314,
		..ForceLayoutConfig::default()
	};
	let compact = ForceLayoutConfig { edge_distance_scale: 0.8, ..base.clone() };
	let expanded = ForceLayoutConfig { edge_distance_scale: 1.8, ..base };

	let compact_avg = average_edge_length(&compute_force_layout(4, &ring, &compact, &[]).positions, &ring);
	let expanded_avg = average_edge_length(&compute_force_layout(4, &ring, &expanded, &[]).positions, &ring);

	assert!(expanded_avg > compact_avg * 1.8);
}

#[test]
fn out_of_range_config_is_clamped_not_rejected() {
	let config = ForceLayoutConfig {
		iterations: 50,
		repulsion_exponent: 40.0,
		base_edge_length: -5.0,
		edge_distance_scale: 0.0,
		max_velocity: -1.0,
		damping: f32::NAN,
		..ForceLayoutConfig::default()
	};
	let result = compute_force_layout(4, &edges(&[(0, 1), (2, 3)]), &config, &[]);
	assert_eq!(result.positions.len(), 4);
	assert!(result.positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn hub_damping_lengthens_star_spokes() {
	let star: Vec<LayoutEdge> = (1..=6).map(|leaf| LayoutEdge::new(0, leaf)).collect();
	let damped = ForceLayoutConfig {
		iterations: 400,
		center_tension: 0.0,
		convergence_threshold: 0.01,
		degree_aware_edge_tension: true,
		random_seed: 512,
		..ForceLayoutConfig::default()
	};
	let stiff = ForceLayoutConfig {
		degree_aware_edge_tension: false,
		..damped.clone()
	};

	let spoke_length = |config: &ForceLayoutConfig| {
		let positions = compute_force_layout(7, &star, config, &[]).positions;
		average_edge_length(&positions, &star)
	};

	let (damped_len, stiff_len) = (spoke_length(&damped), spoke_length(&stiff));
	assert_ne!(damped_len, stiff_len);
	assert!(damped_len > stiff_len);
}

#[test]
fn lower_repulsion_exponent_spreads_nodes() {
	let ring = edges(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
	let soft = ForceLayoutConfig {
		iterations: 200,
		repulsion_exponent: 1.0,
		random_seed: 808,
		..ForceLayoutConfig::default()
	};
	let steep = ForceLayoutConfig {
		repulsion_exponent: 3.0,
		..soft.clone()
	};

	let soft_min = min_pair_distance(&compute_force_layout(5, &ring, &soft, &[]).positions);
	let steep_min = min_pair_distance(&compute_force_layout(5, &ring, &steep, &[]).positions);

	assert!(steep_min > 1.0);
	assert!(soft_min > steep_min);
}
