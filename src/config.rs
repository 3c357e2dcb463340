//! Layout, interaction and label configuration.
//!
//! All structs deserialize with defaults for missing fields. Values are
//! never rejected; they are clamped where they are used.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::DEFAULT_VIEWPORT_PADDING;
use crate::interaction::MIN_STATE_SCALE;
use crate::style::GraphSelectionColors;

/// Parameters of the force simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceLayoutConfig {
	/// Iteration cap.
	pub iterations: u32,
	/// Numerator of the inverse-power repulsion.
	pub node_repulsion: f32,
	/// Distance exponent of the repulsion, clamped to `[0.5, 4]`.
	pub repulsion_exponent: f32,
	/// Spring coefficient along layout edges.
	pub edge_tension: f32,
	/// Soften springs touching high-degree nodes.
	pub degree_aware_edge_tension: bool,
	/// Pull towards the origin; 0 disables it.
	pub center_tension: f32,
	/// Rest length of a spring.
	pub base_edge_length: f32,
	/// Uniform scale applied to the final positions.
	pub edge_distance_scale: f32,
	/// Velocity retained per iteration.
	pub damping: f32,
	/// Stop once the fastest node moves slower than this.
	pub convergence_threshold: f32,
	/// Seed for the initial placement and jitter.
	pub random_seed: i32,
	/// Extra gap required between node radii.
	pub collision_padding: f32,
	/// Overlap push coefficient.
	pub collision_strength: f32,
	/// Per-axis velocity limit.
	pub max_velocity: f32,
}

impl Default for ForceLayoutConfig {
	fn default() -> Self {
		Self {
			iterations: 300,
			node_repulsion: 1200.0,
			repulsion_exponent: 2.0,
			edge_tension: 0.02,
			degree_aware_edge_tension: true,
			center_tension: 0.02,
			base_edge_length: 84.0,
			edge_distance_scale: 1.0,
			damping: 0.9,
			convergence_threshold: 0.5,
			random_seed: 42,
			collision_padding: 8.0,
			collision_strength: 0.65,
			max_velocity: 14.0,
		}
	}
}

/// [`ForceLayoutConfig`] with every field inside its safe range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLayout {
	/// At least 1.
	pub iterations: u32,
	/// At least 0.
	pub node_repulsion: f32,
	/// Within `[0.5, 4]`.
	pub repulsion_exponent: f32,
	/// At least 0.
	pub edge_tension: f32,
	/// Copied as is.
	pub degree_aware_edge_tension: bool,
	/// At least 0.
	pub center_tension: f32,
	/// At least [`MIN_BASE_EDGE_LENGTH`].
	pub ideal_edge_length: f32,
	/// At least [`MIN_EDGE_DISTANCE_SCALE`].
	pub edge_distance_scale: f32,
	/// Within `[0, 1]`.
	pub damping: f32,
	/// At least 0.
	pub convergence_threshold: f32,
	/// Copied as is.
	pub random_seed: i32,
	/// At least 0.
	pub collision_padding: f32,
	/// At least 0.
	pub collision_strength: f32,
	/// At least [`MIN_MAX_VELOCITY`].
	pub max_velocity: f32,
}

/// Shortest spring rest length.
pub const MIN_BASE_EDGE_LENGTH: f32 = 8.0;
/// Smallest output scale.
pub const MIN_EDGE_DISTANCE_SCALE: f32 = 0.1;
/// Smallest velocity limit.
pub const MIN_MAX_VELOCITY: f32 = 1.0;

impl ForceLayoutConfig {
	/// Clamps every numeric field. NaN falls to the lower bound.
	pub fn resolved(&self) -> ResolvedLayout {
		ResolvedLayout {
			iterations: self.iterations.max(1),
			node_repulsion: self.node_repulsion.max(0.0),
			repulsion_exponent: self.repulsion_exponent.max(0.5).min(4.0),
			edge_tension: self.edge_tension.max(0.0),
			degree_aware_edge_tension: self.degree_aware_edge_tension,
			center_tension: self.center_tension.max(0.0),
			ideal_edge_length: self.base_edge_length.max(MIN_BASE_EDGE_LENGTH),
			edge_distance_scale: self.edge_distance_scale.max(MIN_EDGE_DISTANCE_SCALE),
			damping: self.damping.max(0.0).min(1.0),
			convergence_threshold: self.convergence_threshold.max(0.0),
			random_seed: self.random_seed,
			collision_padding: self.collision_padding.max(0.0),
			collision_strength: self.collision_strength.max(0.0),
			max_velocity: self.max_velocity.max(MIN_MAX_VELOCITY),
		}
	}
}

/// Pan, zoom and tap-selection limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Lowest user zoom.
	pub min_scale: f32,
	/// Highest user zoom.
	pub max_scale: f32,
	/// Extra hit radius around nodes, in pixels.
	pub tap_selection_padding: f32,
	/// Whether tapping empty space drops the selection.
	pub clear_selection_on_background_tap: bool,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.35,
			max_scale: 4.5,
			tap_selection_padding: 8.0,
			clear_selection_on_background_tap: true,
		}
	}
}

impl InteractionConfig {
	/// Minimum zoom, floored at [`MIN_STATE_SCALE`].
	pub fn resolved_min_scale(&self) -> f32 {
		self.min_scale.max(MIN_STATE_SCALE)
	}

	/// Maximum zoom, never below the resolved minimum.
	pub fn resolved_max_scale(&self) -> f32 {
		self.max_scale.max(self.resolved_min_scale())
	}

	/// Tap padding, never negative.
	pub fn resolved_tap_selection_padding(&self) -> f32 {
		self.tap_selection_padding.max(0.0)
	}
}

/// Node label placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
	/// Label box width.
	pub width: f32,
	/// Font size.
	pub font_size: f32,
	/// Gap between node and label.
	pub vertical_padding: f32,
}

impl Default for LabelConfig {
	fn default() -> Self {
		Self {
			width: 96.0,
			font_size: 12.0,
			vertical_padding: 6.0,
		}
	}
}

impl LabelConfig {
	/// Width, at least 24.
	pub fn resolved_width(&self) -> f32 {
		self.width.max(24.0)
	}

	/// Font size, at least 8.
	pub fn resolved_font_size(&self) -> f32 {
		self.font_size.max(8.0)
	}

	/// Vertical padding, never negative.
	pub fn resolved_vertical_padding(&self) -> f32 {
		self.vertical_padding.max(0.0)
	}
}

/// Everything a host needs to drive a graph view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerOptions {
	/// Treat adjacency as directed.
	pub directed: bool,
	/// Draw arrowheads on directed edges.
	pub show_arrows: bool,
	/// Accept pan/zoom gestures.
	pub enable_pan_zoom: bool,
	/// Accept taps for selection.
	pub enable_tap_selection: bool,
	/// Fit the layout into the canvas.
	pub fit_to_viewport: bool,
	/// Canvas padding used when fitting.
	pub viewport_padding: f32,
	/// Drop the selection whenever the graph content changes.
	pub clear_selection_on_init: bool,
	/// Per-selection-state color overrides.
	pub selection_colors: GraphSelectionColors,
	/// Simulation parameters.
	pub layout: ForceLayoutConfig,
	/// Gesture limits.
	pub interaction: InteractionConfig,
	/// Label placement.
	pub label: LabelConfig,
}

impl Default for VisualizerOptions {
	fn default() -> Self {
		Self {
			directed: true,
			show_arrows: true,
			enable_pan_zoom: true,
			enable_tap_selection: true,
			fit_to_viewport: true,
			viewport_padding: DEFAULT_VIEWPORT_PADDING,
			clear_selection_on_init: true,
			selection_colors: GraphSelectionColors::default(),
			layout: ForceLayoutConfig::default(),
			interaction: InteractionConfig::default(),
			label: LabelConfig::default(),
		}
	}
}

impl VisualizerOptions {
	/// Fewer, cheaper iterations for large graphs.
	pub fn performance(directed: bool) -> Self {
		Self {
			directed,
			show_arrows: directed,
			layout: ForceLayoutConfig {
				iterations: 180,
				node_repulsion: 900.0,
				edge_tension: 0.018,
				center_tension: 0.03,
				damping: 0.92,
				convergence_threshold: 0.9,
				base_edge_length: 78.0,
				collision_padding: 6.0,
				collision_strength: 0.5,
				max_velocity: 16.0,
				..ForceLayoutConfig::default()
			},
			..Self::default()
		}
	}

	/// Longer runs and roomier spacing.
	pub fn presentation(directed: bool) -> Self {
		Self {
			directed,
			show_arrows: directed,
			layout: ForceLayoutConfig {
				iterations: 320,
				center_tension: 0.03,
				base_edge_length: 88.0,
				collision_padding: 10.0,
				collision_strength: 0.75,
				max_velocity: 12.0,
				..ForceLayoutConfig::default()
			},
			..Self::default()
		}
	}

	/// Parses options from JSON; missing fields take their defaults.
	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	#[test]
	fn resolved_clamps_out_of_range_fields() {
		let config = ForceLayoutConfig {
			iterations: 0,
			node_repulsion: -5.0,
			repulsion_exponent: 9.0,
			edge_tension: -1.0,
			center_tension: -0.5,
			base_edge_length: 1.0,
			edge_distance_scale: 0.0,
			damping: 1.7,
			convergence_threshold: -2.0,
			collision_padding: -3.0,
			collision_strength: -0.1,
			max_velocity: 0.0,
			..ForceLayoutConfig::default()
		};
		let resolved = config.resolved();
		assert_eq!(resolved.iterations, 1);
		assert_eq!(resolved.node_repulsion, 0.0);
		assert_eq!(resolved.repulsion_exponent, 4.0);
		assert_eq!(resolved.edge_tension, 0.0);
		assert_eq!(resolved.center_tension, 0.0);
		assert_eq!(resolved.ideal_edge_length, MIN_BASE_EDGE_LENGTH);
		assert_eq!(resolved.edge_distance_scale, MIN_EDGE_DISTANCE_SCALE);
		assert_eq!(resolved.damping, 1.0);
		assert_eq!(resolved.convergence_threshold, 0.0);
		assert_eq!(resolved.collision_padding, 0.0);
		assert_eq!(resolved.collision_strength, 0.0);
		assert_eq!(resolved.max_velocity, MIN_MAX_VELOCITY);
	}

	#[test]
	fn resolved_survives_nan() {
		let config = ForceLayoutConfig {
			repulsion_exponent: f32::NAN,
			damping: f32::NAN,
			max_velocity: f32::NAN,
			..ForceLayoutConfig::default()
		};
		let resolved = config.resolved();
		assert_eq!(resolved.repulsion_exponent, 0.5);
		assert_eq!(resolved.damping, 0.0);
		assert_eq!(resolved.max_velocity, MIN_MAX_VELOCITY);
	}

	#[test]
	fn interaction_limits_are_ordered() {
		let config = InteractionConfig {
			min_scale: -1.0,
			max_scale: 0.0,
			tap_selection_padding: -4.0,
			clear_selection_on_background_tap: true,
		};
		assert_eq!(config.resolved_min_scale(), MIN_STATE_SCALE);
		assert_eq!(config.resolved_max_scale(), MIN_STATE_SCALE);
		assert_eq!(config.resolved_tap_selection_padding(), 0.0);
	}

	#[test]
	fn presets_keep_unlisted_defaults() {
		let fast = VisualizerOptions::performance(false);
		assert!(!fast.directed);
		assert!(!fast.show_arrows);
		assert_eq!(fast.layout.iterations, 180);
		assert_eq!(fast.layout.repulsion_exponent, 2.0);

		let pretty = VisualizerOptions::presentation(true);
		assert!(pretty.show_arrows);
		assert_eq!(pretty.layout.node_repulsion, 1200.0);
		assert_eq!(pretty.layout.base_edge_length, 88.0);
	}

	#[test]
	fn partial_json_fills_defaults() {
		let options = VisualizerOptions::from_json_str(
			r#"{ "directed": false, "layout": { "iterations": 50, "random_seed": 7 } }"#,
		)
		.unwrap();
		assert!(!options.directed);
		assert_eq!(options.layout.iterations, 50);
		assert_eq!(options.layout.random_seed, 7);
		assert_eq!(options.layout.node_repulsion, 1200.0);
		assert_eq!(options.interaction, InteractionConfig::default());
	}

	#[test]
	fn malformed_json_is_a_config_error() {
		let err = VisualizerOptions::from_json_str("{ directed: ").unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}
}
