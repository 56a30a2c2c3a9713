use std::collections::{HashMap, HashSet};

use crate::dump::{Chunk, ChunkNode, FrameIndex, HitboxRecord, Layout, NodeGraph, Slot, build_graph};

/// Nodes a traversal may start from.
///
/// `priority` is placed first whenever it is a node, even with incoming
/// edges. Otherwise roots are the in-degree zero nodes in graph order; a graph
/// without any falls back to its first node.
pub fn find_roots(graph: &NodeGraph, priority: Option<u32>) -> Vec<u32> {
	let mut roots: Vec<u32> = graph.nodes().iter().copied().filter(|addr| graph.in_degree(*addr) == Some(0)).collect();

	if let Some(priority) = priority.filter(|addr| graph.contains(*addr)) {
		if !roots.contains(&priority) {
			roots.insert(0, priority);
		}
	}

	if roots.is_empty() {
		roots.extend(graph.nodes().first().copied());
	}
	roots
}

/// Nodes with out-degree zero, in graph order.
pub fn find_leaves(graph: &NodeGraph) -> Vec<u32> {
	graph.nodes().iter().copied().filter(|addr| graph.out_degree(*addr) == Some(0)).collect()
}

/// Enumerate simple root-to-leaf paths of at most `max_depth` edges.
///
/// Without any leaf every root becomes a single-node path. Roots outside the
/// graph are skipped. Output order follows `roots`, then leaves in graph
/// order, then depth-first successor order.
pub fn find_all_paths(graph: &NodeGraph, roots: &[u32], max_depth: usize) -> Vec<Vec<u32>> {
	let leaves = find_leaves(graph);
	let mut out = Vec::new();

	for &root in roots {
		if !graph.contains(root) {
			continue;
		}
		if leaves.is_empty() {
			out.push(vec![root]);
			continue;
		}
		for &leaf in &leaves {
			simple_paths(graph, root, leaf, max_depth, &mut out);
		}
	}
	out
}

fn simple_paths(graph: &NodeGraph, root: u32, leaf: u32, max_depth: usize, out: &mut Vec<Vec<u32>>) {
	if root == leaf {
		out.push(vec![root]);
		return;
	}

	let mut stack = vec![(root, 0_usize)];
	let mut on_path = HashSet::from([root]);

	while let Some(&(current, cursor)) = stack.last() {
		let targets = graph.targets(current);
		if cursor >= targets.len() || stack.len() > max_depth {
			stack.pop();
			on_path.remove(&current);
			continue;
		}
		if let Some(top) = stack.last_mut() {
			top.1 += 1;
		}

		let next = targets[cursor];
		if on_path.contains(&next) {
			continue;
		}
		if next == leaf {
			out.push(stack.iter().map(|(addr, _)| *addr).chain([leaf]).collect());
			continue;
		}
		stack.push((next, 0));
		on_path.insert(next);
	}
}

/// Hitbox shown during one path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepHitbox {
	/// Decoded rectangle and score.
	pub record: HitboxRecord,
	/// Owning node's first live hitbox frame.
	pub frame_start: Option<u32>,
	/// Owning node's last live hitbox frame.
	pub frame_end: Option<u32>,
}

/// One playable node of an animation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
	/// Node address.
	pub addr: u32,
	/// Resolved first frame.
	pub frame_start: u32,
	/// Resolved last frame.
	pub frame_end: u32,
	/// Respawn target, when set.
	pub respawn: Option<u32>,
	/// Hitboxes in list order.
	pub hitboxes: Vec<StepHitbox>,
}

/// Playable animation sequence derived from a root-to-leaf path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPath {
	/// Steps whose frame range resolved.
	pub steps: Vec<PathStep>,
	/// Sum of `frame_end - frame_start + 1` over all steps.
	pub total_frames: i64,
	/// Number of hitboxes over all steps.
	pub total_hitboxes: usize,
}

/// Convert an address path into playable steps.
///
/// Nodes whose frame range does not resolve to markers are skipped. Returns
/// `None` when no step remains.
pub fn path_steps(path: &[u32], nodes: &HashMap<u32, &ChunkNode>, frames: &FrameIndex, layout: &Layout) -> Option<AnimationPath> {
	let frame_of = |item: &ChunkNode, slot: Slot| item.node.slot(slot).and_then(|addr| frames.frame_ptr(layout, addr).frame);

	let steps: Vec<PathStep> = path
		.iter()
		.filter_map(|addr| nodes.get(addr).copied())
		.filter_map(|item| {
			let frame_start = frame_of(item, Slot::FrameStart)?;
			let frame_end = frame_of(item, Slot::FrameEnd)?;
			let hitbox_start = frame_of(item, Slot::HitboxFrameStart);
			let hitbox_end = frame_of(item, Slot::HitboxFrameEnd);
			Some(PathStep {
				addr: item.addr,
				frame_start,
				frame_end,
				respawn: item.node.respawn(),
				hitboxes: item
					.hitboxes
					.iter()
					.map(|entry| StepHitbox {
						record: entry.record,
						frame_start: hitbox_start,
						frame_end: hitbox_end,
					})
					.collect(),
			})
		})
		.collect();

	if steps.is_empty() {
		return None;
	}

	let total_frames = steps.iter().map(|step| i64::from(step.frame_end) - i64::from(step.frame_start) + 1).sum();
	let total_hitboxes = steps.iter().map(|step| step.hitboxes.len()).sum();
	Some(AnimationPath {
		steps,
		total_frames,
		total_hitboxes,
	})
}

/// Enumerate the playable paths of one chunk, last-found first.
///
/// The chunk's entry node is the priority root.
pub fn chunk_paths(chunk: &Chunk, frames: &FrameIndex, layout: &Layout) -> Vec<AnimationPath> {
	let graph = build_graph(&chunk.nodes);
	let roots = find_roots(&graph, chunk.entry_addr());
	let paths = find_all_paths(&graph, &roots, layout.paths.max_depth);

	let mut by_addr = HashMap::new();
	for item in &chunk.nodes {
		by_addr.entry(item.addr).or_insert(item);
	}

	let mut out: Vec<AnimationPath> = paths.iter().filter_map(|path| path_steps(path, &by_addr, frames, layout)).collect();
	out.reverse();

	tracing::debug!(anchor = chunk.sequence.anchor(), roots = roots.len(), paths = out.len(), "enumerated chunk paths");
	out
}
