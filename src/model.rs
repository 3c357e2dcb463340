//! Canonical indexed graph built from a key-based adjacency map.
//!
//! Keys only exist at this boundary. Everything downstream (layout,
//! projection, hit-testing, draw order) works on dense `usize` ids.

use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashSet, FxHasher};

use crate::style::NodeInfo;

/// One adjacency entry, in traversal order. Duplicates and self loops are kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge<K> {
	/// Source id.
	pub from_id: usize,
	/// Target id.
	pub to_id: usize,
	/// Source key.
	pub from: K,
	/// Target key.
	pub to: K,
}

/// Undirected, deduplicated, self-loop-free edge used by the simulation.
///
/// Always `from_id < to_id` when produced by [`build_layout_edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutEdge {
	/// Smaller endpoint.
	pub from_id: usize,
	/// Larger endpoint.
	pub to_id: usize,
}

impl LayoutEdge {
	/// Creates an edge without canonicalizing it.
	pub const fn new(from_id: usize, to_id: usize) -> Self {
		Self { from_id, to_id }
	}
}

/// Edge handed to the drawing layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderableEdge<K> {
	/// Source id.
	pub from_id: usize,
	/// Target id.
	pub to_id: usize,
	/// Source key.
	pub from: K,
	/// Target key.
	pub to: K,
	/// Draw an arrowhead at the target.
	pub draw_arrow: bool,
}

/// Nodes in id order with their metadata, plus every adjacency edge.
///
/// Node ids are positions in the underlying ordered map and are only stable
/// for one build.
#[derive(Clone, Debug)]
pub struct GraphModel<K> {
	nodes: IndexMap<K, NodeInfo>,
	edges: Vec<GraphEdge<K>>,
}

impl<K> Default for GraphModel<K> {
	fn default() -> Self {
		Self {
			nodes: IndexMap::default(),
			edges: Vec::new(),
		}
	}
}

impl<K> GraphModel<K> {
	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Keys in id order.
	pub fn node_keys(&self) -> impl Iterator<Item = &K> {
		self.nodes.keys()
	}

	/// `(key, metadata)` pairs in id order.
	pub fn nodes(&self) -> impl Iterator<Item = (&K, &NodeInfo)> {
		self.nodes.iter()
	}

	/// Key of a node id.
	pub fn node_key(&self, id: usize) -> Option<&K> {
		self.nodes.get_index(id).map(|(key, _)| key)
	}

	/// Metadata of a node id.
	pub fn node_info_at(&self, id: usize) -> Option<&NodeInfo> {
		self.nodes.get_index(id).map(|(_, info)| info)
	}

	/// Adjacency edges in traversal order.
	pub fn edges(&self) -> &[GraphEdge<K>] {
		&self.edges
	}

	/// Node sizes in id order, used as collision radii.
	pub fn node_sizes(&self) -> Vec<f32> {
		self.nodes.values().map(|info| info.size).collect()
	}
}

impl<K: Hash + Eq> GraphModel<K> {
	/// Id of a key.
	pub fn node_id(&self, key: &K) -> Option<usize> {
		self.nodes.get_index_of(key)
	}

	/// Metadata of a key.
	pub fn node_info(&self, key: &K) -> Option<&NodeInfo> {
		self.nodes.get(key)
	}
}

/// Builds the indexed model.
///
/// Ids are assigned in first-seen order: each adjacency key followed by its
/// neighbors, then keys that only appear in `node_info`. Nodes missing from
/// `node_info` get `fallback(key)`.
pub fn build_graph_model<K, F>(
	adjacency: &IndexMap<K, Vec<K>>,
	node_info: &IndexMap<K, NodeInfo>,
	fallback: F,
) -> GraphModel<K>
where
	K: Hash + Eq + Clone,
	F: Fn(&K) -> NodeInfo,
{
	let mut order: IndexSet<K> = IndexSet::new();
	for (from, neighbors) in adjacency {
		order.insert(from.clone());
		order.extend(neighbors.iter().cloned());
	}
	order.extend(node_info.keys().cloned());

	let nodes: IndexMap<K, NodeInfo> = order
		.into_iter()
		.map(|key| {
			let info = node_info.get(&key).cloned().unwrap_or_else(|| fallback(&key));
			(key, info)
		})
		.collect();

	let mut edges = Vec::new();
	for (from, neighbors) in adjacency {
		let Some(from_id) = nodes.get_index_of(from) else {
			continue;
		};
		for to in neighbors {
			let Some(to_id) = nodes.get_index_of(to) else {
				continue;
			};
			edges.push(GraphEdge {
				from_id,
				to_id,
				from: from.clone(),
				to: to.clone(),
			});
		}
	}

	GraphModel { nodes, edges }
}

/// Content hash of the inputs of [`build_graph_model`].
///
/// Hosts compare signatures to decide whether the model must be rebuilt.
pub fn adjacency_signature<K: Hash>(
	adjacency: &IndexMap<K, Vec<K>>,
	node_info: &IndexMap<K, NodeInfo>,
) -> u64 {
	let mut hasher = FxHasher::default();
	adjacency.len().hash(&mut hasher);
	for (key, neighbors) in adjacency {
		key.hash(&mut hasher);
		neighbors.hash(&mut hasher);
	}
	node_info.len().hash(&mut hasher);
	for (key, info) in node_info {
		key.hash(&mut hasher);
		info.hash(&mut hasher);
	}
	hasher.finish()
}

/// Simulation edges: canonical `(min, max)`, self loops dropped, one per pair.
pub fn build_layout_edges<K>(edges: &[GraphEdge<K>]) -> Vec<LayoutEdge> {
	let mut seen = FxHashSet::default();
	let mut result = Vec::new();
	for edge in edges {
		if edge.from_id == edge.to_id {
			continue;
		}
		let pair = (edge.from_id.min(edge.to_id), edge.from_id.max(edge.to_id));
		if seen.insert(pair) {
			result.push(LayoutEdge::new(pair.0, pair.1));
		}
	}
	result
}

/// Edges for drawing.
///
/// Directed graphs keep every edge with `draw_arrow = show_arrows`.
/// Undirected graphs keep the first edge per unordered pair, re-oriented so
/// `from_id <= to_id` with keys following their ids, and never draw arrows.
pub fn build_renderable_edges<K: Clone>(
	edges: &[GraphEdge<K>],
	directed: bool,
	show_arrows: bool,
) -> Vec<RenderableEdge<K>> {
	if directed {
		return edges
			.iter()
			.map(|edge| RenderableEdge {
				from_id: edge.from_id,
				to_id: edge.to_id,
				from: edge.from.clone(),
				to: edge.to.clone(),
				draw_arrow: show_arrows,
			})
			.collect();
	}

	let mut seen = FxHashSet::default();
	let mut result = Vec::new();
	for edge in edges {
		let (smaller, larger) = (edge.from_id.min(edge.to_id), edge.from_id.max(edge.to_id));
		if !seen.insert((smaller, larger)) {
			continue;
		}
		let (from, to) = if edge.from_id == smaller {
			(edge.from.clone(), edge.to.clone())
		} else {
			(edge.to.clone(), edge.from.clone())
		};
		result.push(RenderableEdge {
			from_id: smaller,
			to_id: larger,
			from,
			to,
			draw_arrow: false,
		});
	}
	result
}
