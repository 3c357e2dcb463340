//! Draw-order partition driven by the selection.

use crate::model::RenderableEdge;

/// Background and foreground index lists for edges and nodes.
///
/// Draw background edges, background nodes, foreground edges, then
/// foreground nodes so the highlighted neighborhood is never covered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPriority {
	/// Edges not touching the selection.
	pub background_edges: Vec<usize>,
	/// Edges touching the selection.
	pub foreground_edges: Vec<usize>,
	/// Nodes outside the selection's neighborhood, ascending.
	pub background_nodes: Vec<usize>,
	/// The selection and its neighbors, ascending.
	pub foreground_nodes: Vec<usize>,
}

impl RenderPriority {
	/// Partitions `edges` and `0..node_count` around `selected_node_id`.
	///
	/// No selection, or one outside `0..node_count`, puts everything in the
	/// background.
	pub fn resolve<K>(
		edges: &[RenderableEdge<K>],
		node_count: usize,
		selected_node_id: Option<usize>,
	) -> Self {
		let Some(selected) = selected_node_id.filter(|&id| id < node_count) else {
			return Self {
				background_edges: (0..edges.len()).collect(),
				foreground_edges: Vec::new(),
				background_nodes: (0..node_count).collect(),
				foreground_nodes: Vec::new(),
			};
		};

		let mut highlighted = vec![false; node_count];
		highlighted[selected] = true;
		let mut background_edges = Vec::new();
		let mut foreground_edges = Vec::new();
		for (index, edge) in edges.iter().enumerate() {
			if edge.from_id == selected || edge.to_id == selected {
				foreground_edges.push(index);
				for id in [edge.from_id, edge.to_id] {
					if let Some(slot) = highlighted.get_mut(id) {
						*slot = true;
					}
				}
			} else {
				background_edges.push(index);
			}
		}

		let (foreground_nodes, background_nodes) = (0..node_count).partition(|&id| highlighted[id]);

		Self {
			background_edges,
			foreground_edges,
			background_nodes,
			foreground_nodes,
		}
	}

	/// Whether anything is highlighted.
	pub fn has_foreground(&self) -> bool {
		!self.foreground_nodes.is_empty()
	}
}
