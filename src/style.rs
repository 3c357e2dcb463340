//! Node metadata and the pure style/label resolution interface.
//!
//! The core never decides how things look. Hosts pass a provider function
//! that maps an explicit input (ids, keys, metadata, selection state) to a
//! style value; the defaults here mirror a plain light theme.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::{GraphModel, RenderableEdge};

/// Default node size, doubling as its physical radius.
pub const DEFAULT_NODE_SIZE: f32 = 18.0;

/// ARGB color packed into a `u32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
	/// Opaque black.
	pub const BLACK: Color = Color(0xFF00_0000);
	/// Opaque white.
	pub const WHITE: Color = Color(0xFFFF_FFFF);

	/// Alpha channel.
	pub fn alpha(self) -> u8 {
		(self.0 >> 24) as u8
	}

	/// Red channel.
	pub fn red(self) -> u8 {
		(self.0 >> 16) as u8
	}

	/// Green channel.
	pub fn green(self) -> u8 {
		(self.0 >> 8) as u8
	}

	/// Blue channel.
	pub fn blue(self) -> u8 {
		self.0 as u8
	}

	/// CSS `rgba(...)` form for canvas APIs.
	pub fn to_css(self) -> String {
		format!(
			"rgba({}, {}, {}, {})",
			self.red(),
			self.green(),
			self.blue(),
			f32::from(self.alpha()) / 255.0
		)
	}
}

/// Closed polygon builder for custom node shapes: `(center, radius) -> vertices`.
#[derive(Clone)]
pub struct PathBuilder(Arc<dyn Fn(Point, f32) -> Vec<Point> + Send + Sync>);

impl PathBuilder {
	/// Wraps a vertex generator.
	pub fn new<F>(build: F) -> Self
	where
		F: Fn(Point, f32) -> Vec<Point> + Send + Sync + 'static,
	{
		Self(Arc::new(build))
	}

	/// Vertices of the shape at `center` with `radius`.
	pub fn build(&self, center: Point, radius: f32) -> Vec<Point> {
		(self.0)(center, radius)
	}

	fn addr(&self) -> usize {
		Arc::as_ptr(&self.0).cast::<()>() as usize
	}
}

impl fmt::Debug for PathBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "PathBuilder({:#x})", self.addr())
	}
}

impl PartialEq for PathBuilder {
	fn eq(&self, other: &Self) -> bool {
		self.addr() == other.addr()
	}
}

impl Eq for PathBuilder {}

impl Hash for PathBuilder {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.addr().hash(state);
	}
}

/// Outline of a node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeShape {
	/// Circle.
	#[default]
	Circle,
	/// Square with rounded corners.
	RoundedRect,
	/// Square rotated 45 degrees.
	Diamond,
	/// Flat-topped hexagon.
	Hexagon,
	/// Caller-supplied polygon.
	Custom(PathBuilder),
}

/// Per-node metadata supplied by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
	/// Display name, used as the default label.
	pub name: String,
	/// Outline.
	pub shape: NodeShape,
	/// Radius in world units; also the collision radius.
	pub size: f32,
	/// Fill.
	pub color: Color,
	/// Fill when selected.
	pub selected_color: Color,
	/// Outline color.
	pub stroke_color: Color,
	/// Outline color when selected.
	pub selected_stroke_color: Color,
	/// Label text color.
	pub label_color: Color,
}

impl NodeInfo {
	/// Metadata with the given name and default looks.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			shape: NodeShape::Circle,
			size: DEFAULT_NODE_SIZE,
			color: Color(0xFF25_63EB),
			selected_color: Color(0xFFF5_9E0B),
			stroke_color: Color(0xFF1E_3A8A),
			selected_stroke_color: Color(0xFF7C_2D12),
			label_color: Color(0xFF11_1827),
		}
	}
}

impl Hash for NodeInfo {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
		self.shape.hash(state);
		self.size.to_bits().hash(state);
		self.color.hash(state);
		self.selected_color.hash(state);
		self.stroke_color.hash(state);
		self.selected_stroke_color.hash(state);
		self.label_color.hash(state);
	}
}

/// Default metadata for a node known only by its name.
pub fn default_node_info(name: impl Into<String>) -> NodeInfo {
	NodeInfo::named(name)
}

/// Selection relation of a node or edge to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionState {
	/// This element is (or touches) the selection.
	Selected,
	/// Something else is selected.
	OtherSelected,
	/// Nothing is selected.
	NoneSelected,
}

impl SelectionState {
	fn classify(selected_node_id: Option<usize>, is_selected: bool) -> Self {
		match selected_node_id {
			None => SelectionState::NoneSelected,
			Some(_) if is_selected => SelectionState::Selected,
			Some(_) => SelectionState::OtherSelected,
		}
	}
}

/// Optional color overrides for one selection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStateColor {
	/// Node fill override.
	pub node_color: Option<Color>,
	/// Node outline override.
	pub border_color: Option<Color>,
	/// Edge color override.
	pub edge_color: Option<Color>,
}

/// Color overrides for each [`SelectionState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSelectionColors {
	/// Applied to the selection and its edges.
	pub selected: GraphStateColor,
	/// Applied to everything else while something is selected.
	pub other_selected: GraphStateColor,
	/// Applied when nothing is selected.
	pub none_selected: GraphStateColor,
}

impl GraphSelectionColors {
	fn for_state(&self, state: SelectionState) -> &GraphStateColor {
		match state {
			SelectionState::Selected => &self.selected,
			SelectionState::OtherSelected => &self.other_selected,
			SelectionState::NoneSelected => &self.none_selected,
		}
	}
}

/// Resolved node appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	/// Outline.
	pub shape: NodeShape,
	/// Fill.
	pub fill_color: Color,
	/// Outline color.
	pub stroke_color: Color,
	/// Radius in world units.
	pub radius: f32,
	/// Label text color.
	pub label_color: Color,
}

/// Resolved edge appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Stroke color.
	pub color: Color,
	/// Stroke width in pixels.
	pub width: f32,
	/// Dashed stroke.
	pub dashed: bool,
}

/// Input to a node style or label provider.
#[derive(Clone, Copy, Debug)]
pub struct NodeStyleInput<'a, K> {
	/// Node id.
	pub node_id: usize,
	/// Node key.
	pub key: &'a K,
	/// Node metadata.
	pub node_info: &'a NodeInfo,
	/// Whether this node is the selection.
	pub is_selected: bool,
	/// Relation to the selection.
	pub selection_state: SelectionState,
}

/// Input to an edge style provider.
#[derive(Clone, Copy, Debug)]
pub struct EdgeStyleInput<'a, K> {
	/// Source id.
	pub from_id: usize,
	/// Target id.
	pub to_id: usize,
	/// Source key.
	pub from: &'a K,
	/// Target key.
	pub to: &'a K,
	/// Whether the edge touches the selected node.
	pub is_selected: bool,
	/// Relation to the selection.
	pub selection_state: SelectionState,
}

/// Style straight from node metadata, ignoring override colors.
pub fn node_style_from_info(info: &NodeInfo, is_selected: bool) -> NodeStyle {
	NodeStyle {
		shape: info.shape.clone(),
		fill_color: if is_selected { info.selected_color } else { info.color },
		stroke_color: if is_selected {
			info.selected_stroke_color
		} else {
			info.stroke_color
		},
		radius: info.size,
		label_color: info.label_color,
	}
}

/// Default node provider: metadata colors, replaced by any override for the state.
pub fn default_node_style<K>(input: &NodeStyleInput<'_, K>, colors: &GraphSelectionColors) -> NodeStyle {
	let overrides = colors.for_state(input.selection_state);
	let base = node_style_from_info(
		input.node_info,
		input.selection_state == SelectionState::Selected,
	);
	NodeStyle {
		fill_color: overrides.node_color.unwrap_or(base.fill_color),
		stroke_color: overrides.border_color.unwrap_or(base.stroke_color),
		..base
	}
}

/// Edge style without overrides: amber and thick when selected, slate otherwise.
pub fn plain_edge_style(is_selected: bool) -> EdgeStyle {
	EdgeStyle {
		color: if is_selected {
			Color(0xFFF5_9E0B)
		} else {
			Color(0xFF64_748B)
		},
		width: if is_selected { 3.5 } else { 2.0 },
		dashed: false,
	}
}

/// Default edge provider: [`plain_edge_style`] with the state's color override.
pub fn default_edge_style<K>(input: &EdgeStyleInput<'_, K>, colors: &GraphSelectionColors) -> EdgeStyle {
	let base = plain_edge_style(input.is_selected);
	EdgeStyle {
		color: colors
			.for_state(input.selection_state)
			.edge_color
			.unwrap_or(base.color),
		..base
	}
}

fn node_inputs<'a, K>(
	model: &'a GraphModel<K>,
	selected_node_id: Option<usize>,
) -> impl Iterator<Item = NodeStyleInput<'a, K>> + 'a {
	model
		.nodes()
		.enumerate()
		.map(move |(node_id, (key, node_info))| {
			let is_selected = selected_node_id == Some(node_id);
			NodeStyleInput {
				node_id,
				key,
				node_info,
				is_selected,
				selection_state: SelectionState::classify(selected_node_id, is_selected),
			}
		})
}

/// Runs `provider` once per node, in id order.
pub fn resolve_node_styles<K, F>(
	model: &GraphModel<K>,
	selected_node_id: Option<usize>,
	provider: F,
) -> Vec<NodeStyle>
where
	F: Fn(&NodeStyleInput<'_, K>) -> NodeStyle,
{
	node_inputs(model, selected_node_id)
		.map(|input| provider(&input))
		.collect()
}

/// Node names, in id order.
pub fn resolve_node_labels<K>(model: &GraphModel<K>) -> Vec<String> {
	model.nodes().map(|(_, info)| info.name.clone()).collect()
}

/// Labels from `provider`, where `None` hides the label (empty string).
pub fn resolve_node_labels_with<K, F>(
	model: &GraphModel<K>,
	selected_node_id: Option<usize>,
	provider: F,
) -> Vec<String>
where
	F: Fn(&NodeStyleInput<'_, K>) -> Option<String>,
{
	node_inputs(model, selected_node_id)
		.map(|input| provider(&input).unwrap_or_default())
		.collect()
}

/// Runs `provider` once per renderable edge, in order.
pub fn resolve_edge_styles<K, F>(
	edges: &[RenderableEdge<K>],
	selected_node_id: Option<usize>,
	provider: F,
) -> Vec<EdgeStyle>
where
	F: Fn(&EdgeStyleInput<'_, K>) -> EdgeStyle,
{
	edges
		.iter()
		.map(|edge| {
			let is_selected = selected_node_id
				.is_some_and(|id| id == edge.from_id || id == edge.to_id);
			provider(&EdgeStyleInput {
				from_id: edge.from_id,
				to_id: edge.to_id,
				from: &edge.from,
				to: &edge.to,
				is_selected,
				selection_state: SelectionState::classify(selected_node_id, is_selected),
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use indexmap::IndexMap;

	use super::*;
	use crate::model::build_graph_model;

	fn colors() -> GraphSelectionColors {
		GraphSelectionColors {
			selected: GraphStateColor {
				node_color: Some(Color(0xFFAA_AAAA)),
				border_color: Some(Color(0xFF11_1111)),
				edge_color: Some(Color(0xFF22_2222)),
			},
			other_selected: GraphStateColor {
				node_color: Some(Color(0xFFBB_BBBB)),
				border_color: Some(Color(0xFF33_3333)),
				edge_color: Some(Color(0xFF44_4444)),
			},
			none_selected: GraphStateColor {
				node_color: Some(Color(0xFFCC_CCCC)),
				border_color: Some(Color(0xFF55_5555)),
				edge_color: Some(Color(0xFF66_6666)),
			},
		}
	}

	#[test]
	fn node_styles_follow_metadata_and_overrides() {
		let diamond = PathBuilder::new(|c, r| {
			vec![
				Point::new(c.x, c.y - r),
				Point::new(c.x + r, c.y),
				Point::new(c.x, c.y + r),
				Point::new(c.x - r, c.y),
			]
		});
		let adjacency = IndexMap::from([("gateway", vec!["search"])]);
		let node_info = IndexMap::from([
			(
				"gateway",
				NodeInfo {
					shape: NodeShape::Custom(diamond),
					size: 24.0,
					..NodeInfo::named("Gateway")
				},
			),
			(
				"search",
				NodeInfo {
					shape: NodeShape::Hexagon,
					size: 20.0,
					color: Color(0xFF10_B981),
					..NodeInfo::named("Search")
				},
			),
		]);
		let model = build_graph_model(&adjacency, &node_info, |key| NodeInfo::named(*key));
		let overrides = GraphSelectionColors {
			selected: GraphStateColor {
				node_color: Some(Color(0xFFFF_0000)),
				..Default::default()
			},
			other_selected: GraphStateColor {
				node_color: Some(Color(0xFF00_FF00)),
				..Default::default()
			},
			..Default::default()
		};

		let styles = resolve_node_styles(&model, Some(0), |input| default_node_style(input, &overrides));
		let labels = resolve_node_labels(&model);

		assert_eq!(labels[0], "Gateway");
		assert!(matches!(styles[0].shape, NodeShape::Custom(_)));
		assert_eq!(styles[0].radius, 24.0);
		assert_eq!(styles[0].fill_color, Color(0xFFFF_0000));
		assert_eq!(styles[1].shape, NodeShape::Hexagon);
		assert_eq!(styles[1].radius, 20.0);
		assert_eq!(styles[1].fill_color, Color(0xFF00_FF00));
	}

	#[test]
	fn edge_styles_mark_edges_touching_selection() {
		let edges = vec![
			RenderableEdge { from_id: 0, to_id: 1, from: "a", to: "b", draw_arrow: true },
			RenderableEdge { from_id: 2, to_id: 3, from: "c", to: "d", draw_arrow: true },
		];
		let styles = resolve_edge_styles(&edges, Some(1), |input| default_edge_style(input, &colors()));
		assert_eq!(styles[0].color, Color(0xFF22_2222));
		assert_eq!(styles[1].color, Color(0xFF44_4444));

		let styles = resolve_edge_styles(&edges, None, |input| {
			assert_eq!(input.selection_state, SelectionState::NoneSelected);
			plain_edge_style(input.is_selected)
		});
		assert!(styles.iter().all(|s| s.width == 2.0));
	}

	#[test]
	fn label_provider_can_hide_labels() {
		let adjacency = IndexMap::from([("selected", vec!["linked"]), ("other", vec![])]);
		let node_info = IndexMap::from([
			("selected", NodeInfo::named("Selected")),
			("linked", NodeInfo::named("Linked")),
			("other", NodeInfo::named("Other")),
		]);
		let model = build_graph_model(&adjacency, &node_info, |key| NodeInfo::named(*key));

		let labels = resolve_node_labels_with(&model, Some(0), |input| match *input.key {
			"selected" | "linked" => Some(input.node_info.name.clone()),
			_ => None,
		});

		assert_eq!(labels, vec!["Selected", "Linked", ""]);
	}

	#[test]
	fn default_styles_cover_all_selection_states() {
		let info = NodeInfo {
			color: Color(0xFF12_3456),
			stroke_color: Color(0xFF65_4321),
			..NodeInfo::named("N")
		};
		let key = "a";
		let input = |node_id, selection_state| NodeStyleInput {
			node_id,
			key: &key,
			node_info: &info,
			is_selected: selection_state == SelectionState::Selected,
			selection_state,
		};

		let selected = default_node_style(&input(0, SelectionState::Selected), &colors());
		let other = default_node_style(&input(1, SelectionState::OtherSelected), &colors());
		let none = default_node_style(&input(2, SelectionState::NoneSelected), &colors());
		assert_eq!((selected.fill_color, selected.stroke_color), (Color(0xFFAA_AAAA), Color(0xFF11_1111)));
		assert_eq!((other.fill_color, other.stroke_color), (Color(0xFFBB_BBBB), Color(0xFF33_3333)));
		assert_eq!((none.fill_color, none.stroke_color), (Color(0xFFCC_CCCC), Color(0xFF55_5555)));

		let plain = default_node_style(&input(0, SelectionState::Selected), &GraphSelectionColors::default());
		assert_eq!(plain.fill_color, info.selected_color);
		assert_eq!(plain.stroke_color, info.selected_stroke_color);
	}

	#[test]
	fn css_color_format() {
		assert_eq!(Color(0xFF10_2030).to_css(), "rgba(16, 32, 48, 1)");
		assert_eq!(Color(0x0000_0000).to_css(), "rgba(0, 0, 0, 0)");
	}

	#[test]
	fn custom_shapes_compare_by_identity() {
		let a = PathBuilder::new(|c, _| vec![c]);
		let b = PathBuilder::new(|c, _| vec![c]);
		assert_eq!(NodeShape::Custom(a.clone()), NodeShape::Custom(a.clone()));
		assert_ne!(NodeShape::Custom(a), NodeShape::Custom(b));
	}
}
