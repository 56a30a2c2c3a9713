use std::collections::HashSet;

use crate::dump::bytes::u32_at;
use crate::dump::{
	Discriminant, DumpError, FrameSequence, HitboxEntry, Layout, LogicNode, Result, decode_node, probe_discriminant, resolve_hitbox_chain,
};

/// Why a node's hitbox list could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitboxIssue {
	/// The node's own hitbox pointer translated outside the image.
	HeadOutOfBounds(u32),
	/// A non-zero `next` pointer translated outside the image.
	ChainCorrupt(u32),
	/// The list revisited a record.
	Cycle(u32),
}

/// One logic node discovered by a walk.
#[derive(Debug, Clone)]
pub struct ChunkNode {
	/// File offset of the record start.
	pub offset: usize,
	/// Absolute address of the record start.
	pub addr: u32,
	/// Decoded record.
	pub node: LogicNode,
	/// Resolved hitbox list, first record first.
	pub hitboxes: Vec<HitboxEntry>,
	/// Set when the hitbox list was abandoned.
	pub hitbox_issue: Option<HitboxIssue>,
}

/// Normal end of an anchored walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStop {
	/// Discriminant outside `0..=9`.
	Unknown(u8),
	/// Discriminant in `7..=9`; logged as a possible unverified shape.
	NearMiss(u8),
	/// The cursor returned to an offset it had already probed.
	Revisit(usize),
	/// The configured record budget was exhausted.
	MaxRecords,
}

/// Records discovered by walking backward from one frame sequence.
#[derive(Debug, Clone)]
pub struct Chunk {
	/// Sequence whose first marker anchored the walk.
	pub sequence: FrameSequence,
	/// Nodes in discovery order, nearest the anchor first.
	pub nodes: Vec<ChunkNode>,
	/// Cursor offset where the walk stopped.
	pub start: usize,
	/// Why the walk stopped.
	pub stop: WalkStop,
}

impl Chunk {
	/// Address of the node decoded first, next to the anchor.
	pub fn first_addr(&self) -> Option<u32> {
		self.nodes.first().map(|node| node.addr)
	}

	/// Address of the node decoded last; the scene entry point.
	pub fn entry_addr(&self) -> Option<u32> {
		self.nodes.last().map(|node| node.addr)
	}
}

/// Walk backward from `sequence`'s anchor, decoding logic nodes until a stop condition.
///
/// Reads that would cross the image boundaries abort the walk with an error.
pub fn walk_chunk(bytes: &[u8], layout: &Layout, sequence: &FrameSequence) -> Result<Chunk> {
	let mut cursor = sequence.anchor();
	let mut visited = HashSet::new();
	let mut nodes = Vec::new();

	let stop = loop {
		if nodes.len() >= layout.walk.max_records {
			tracing::warn!(anchor = sequence.anchor(), max = layout.walk.max_records, "walk record budget exhausted");
			break WalkStop::MaxRecords;
		}
		if !visited.insert(cursor) {
			tracing::warn!(anchor = sequence.anchor(), cursor, "walk revisited an offset");
			break WalkStop::Revisit(cursor);
		}

		let shape = match probe_discriminant(bytes, cursor)? {
			Discriminant::Shape(shape) => shape,
			Discriminant::NearMiss(type_chunk) => {
				tracing::warn!(type_chunk, addr = %format!("0x{:08x}", layout.to_address(cursor)), "possible unverified node shape");
				break WalkStop::NearMiss(type_chunk);
			}
			Discriminant::Unknown(type_chunk) => break WalkStop::Unknown(type_chunk),
		};

		let node = decode_node(bytes, cursor, shape)?;
		let offset = cursor - node.size();
		let addr = layout.to_address(offset);
		let (hitboxes, hitbox_issue) = collect_hitboxes(bytes, layout, addr, node.hitbox_ptr());
		let last_hitbox = if hitbox_issue.is_none() { hitboxes.last().map(|entry| entry.offset) } else { None };

		tracing::debug!(offset, shape = shape.type_chunk(), hitboxes = hitboxes.len(), "decoded logic node");

		cursor = if layout.walk.boundary_correction {
			resume_offset(bytes, offset, last_hitbox)
		} else {
			offset
		};
		nodes.push(ChunkNode {
			offset,
			addr,
			node,
			hitboxes,
			hitbox_issue,
		});
	};

	Ok(Chunk {
		sequence: sequence.clone(),
		nodes,
		start: cursor,
		stop,
	})
}

/// Boundary correction applied after a node whose hitbox list resolved.
///
/// If the word just before `record_start` has a zero high half it cannot be an
/// absolute address, so the next node is taken to end where the last hitbox
/// record starts. Otherwise the walk continues at `record_start`.
pub fn resume_offset(bytes: &[u8], record_start: usize, last_hitbox: Option<usize>) -> usize {
	let Some(last_hitbox) = last_hitbox else {
		return record_start;
	};

	match record_start.checked_sub(4).and_then(|at| u32_at(bytes, at)) {
		Some(word) if word & 0xFFFF_0000 == 0 => last_hitbox,
		_ => record_start,
	}
}

pub(crate) fn collect_hitboxes(bytes: &[u8], layout: &Layout, node: u32, head: u32) -> (Vec<HitboxEntry>, Option<HitboxIssue>) {
	match resolve_hitbox_chain(bytes, layout, node, head) {
		Ok(chain) => (chain, None),
		Err(err) => {
			tracing::warn!(node = %format!("0x{node:08x}"), error = %err, "hitbox list abandoned");
			let issue = match err {
				DumpError::HitboxCycle { addr, .. } => HitboxIssue::Cycle(addr),
				DumpError::HitboxChainCorrupt { addr, .. } => HitboxIssue::ChainCorrupt(addr),
				DumpError::OutOfBounds { addr, .. } => HitboxIssue::HeadOutOfBounds(addr),
				_ => HitboxIssue::ChainCorrupt(head),
			};
			(Vec::new(), Some(issue))
		}
	}
}

#[cfg(test)]
mod tests;
