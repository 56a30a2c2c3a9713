use std::collections::{HashMap, HashSet, VecDeque};

use crate::dump::ChunkNode;

/// Origin of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// `next` or one of the `link` slots.
	Successor,
	/// The `respawn` slot.
	Respawn,
}

/// One directed node-to-node edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphEdge {
	/// Source node address.
	pub from: u32,
	/// Target node address.
	pub to: u32,
	/// Slot family that produced the edge.
	pub kind: EdgeKind,
}

/// Summary counters for one node graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
	/// Distinct node addresses.
	pub nodes: usize,
	/// Distinct edges.
	pub edges: usize,
	/// Pointers to addresses outside the node set.
	pub dangling: usize,
	/// Nodes with in-degree zero.
	pub roots: usize,
	/// Nodes with out-degree zero.
	pub leaves: usize,
	/// Whether the graph has no directed cycle.
	pub is_dag: bool,
	/// Simple cycles of at most `max_depth` edges; zero for a DAG.
	pub cycles: usize,
}

/// Directed graph over logic node addresses.
///
/// Node iteration follows insertion order so every traversal is reproducible.
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
	nodes: Vec<u32>,
	index: HashMap<u32, usize>,
	targets: Vec<Vec<u32>>,
	in_degree: Vec<usize>,
	edges: Vec<GraphEdge>,
	seen_edges: HashSet<GraphEdge>,
	dangling: Vec<GraphEdge>,
}

impl NodeGraph {
	/// Create an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert `addr` as a node; zero and repeated addresses are ignored.
	pub fn add_node(&mut self, addr: u32) -> bool {
		if addr == 0 || self.index.contains_key(&addr) {
			return false;
		}
		self.index.insert(addr, self.nodes.len());
		self.nodes.push(addr);
		self.targets.push(Vec::new());
		self.in_degree.push(0);
		true
	}

	/// Insert an edge between known nodes.
	///
	/// A zero target is ignored. A target outside the node set is recorded as
	/// dangling and produces no edge.
	pub fn add_edge(&mut self, from: u32, to: u32, kind: EdgeKind) {
		if to == 0 {
			return;
		}
		let Some(&from_index) = self.index.get(&from) else {
			return;
		};
		let edge = GraphEdge { from, to, kind };
		let Some(&to_index) = self.index.get(&to) else {
			self.dangling.push(edge);
			return;
		};
		if !self.seen_edges.insert(edge) {
			return;
		}

		self.edges.push(edge);
		if !self.targets[from_index].contains(&to) {
			self.targets[from_index].push(to);
			self.in_degree[to_index] += 1;
		}
	}

	/// Node addresses in insertion order.
	pub fn nodes(&self) -> &[u32] {
		&self.nodes
	}

	/// Whether `addr` is a node.
	pub fn contains(&self, addr: u32) -> bool {
		self.index.contains_key(&addr)
	}

	/// Distinct edges in insertion order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Pointers that named no known node.
	pub fn dangling(&self) -> &[GraphEdge] {
		&self.dangling
	}

	/// Distinct targets reachable in one step from `addr`.
	pub fn targets(&self, addr: u32) -> &[u32] {
		match self.index.get(&addr) {
			Some(&index) => &self.targets[index],
			None => &[],
		}
	}

	/// Number of distinct predecessors of `addr`.
	pub fn in_degree(&self, addr: u32) -> Option<usize> {
		self.index.get(&addr).map(|&index| self.in_degree[index])
	}

	/// Number of distinct successors of `addr`.
	pub fn out_degree(&self, addr: u32) -> Option<usize> {
		self.index.get(&addr).map(|&index| self.targets[index].len())
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Compute summary counters.
	///
	/// Cycles longer than `max_depth` edges are not counted.
	pub fn stats(&self, max_depth: usize) -> GraphStats {
		let is_dag = self.is_dag();
		GraphStats {
			nodes: self.nodes.len(),
			edges: self.edges.len(),
			dangling: self.dangling.len(),
			roots: self.in_degree.iter().filter(|degree| **degree == 0).count(),
			leaves: self.targets.iter().filter(|targets| targets.is_empty()).count(),
			is_dag,
			cycles: if is_dag { 0 } else { self.count_cycles(max_depth) },
		}
	}

	/// Count simple cycles, each once from its lowest-indexed node.
	fn count_cycles(&self, max_depth: usize) -> usize {
		let mut count = 0_usize;
		let mut on_path = vec![false; self.nodes.len()];

		for start in 0..self.nodes.len() {
			let mut stack = vec![(start, 0_usize)];
			on_path[start] = true;

			while let Some(&(current, cursor)) = stack.last() {
				let Some(&target) = self.targets[current].get(cursor) else {
					stack.pop();
					on_path[current] = false;
					continue;
				};
				if let Some(top) = stack.last_mut() {
					top.1 += 1;
				}

				let Some(&next) = self.index.get(&target) else {
					continue;
				};
				if next == start {
					if stack.len() <= max_depth {
						count += 1;
					}
					continue;
				}
				if next < start || on_path[next] || stack.len() >= max_depth {
					continue;
				}
				stack.push((next, 0));
				on_path[next] = true;
			}
		}
		count
	}

	fn is_dag(&self) -> bool {
		let mut in_degree = self.in_degree.clone();
		let mut queue: VecDeque<usize> = (0..self.nodes.len()).filter(|index| in_degree[*index] == 0).collect();
		let mut removed = 0_usize;

		while let Some(index) = queue.pop_front() {
			removed += 1;
			for target in &self.targets[index] {
				let Some(&target_index) = self.index.get(target) else {
					continue;
				};
				in_degree[target_index] -= 1;
				if in_degree[target_index] == 0 {
					queue.push_back(target_index);
				}
			}
		}

		removed == self.nodes.len()
	}
}

/// Build the graph of one chunk's nodes.
///
/// Every node address is inserted before any edge, so pointers between nodes
/// of the same chunk resolve regardless of discovery order.
pub fn build_graph(nodes: &[ChunkNode]) -> NodeGraph {
	let mut graph = NodeGraph::new();
	for item in nodes {
		graph.add_node(item.addr);
	}

	let mut wired = HashSet::new();
	for item in nodes {
		if !wired.insert(item.addr) {
			continue;
		}
		for target in item.node.successors() {
			graph.add_edge(item.addr, target, EdgeKind::Successor);
		}
		if let Some(respawn) = item.node.respawn() {
			graph.add_edge(item.addr, respawn, EdgeKind::Respawn);
		}
	}

	if !graph.dangling().is_empty() {
		tracing::debug!(dangling = graph.dangling().len(), "graph has pointers to unknown nodes");
	}
	graph
}
