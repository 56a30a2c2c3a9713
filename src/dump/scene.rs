use std::collections::HashSet;

use crate::dump::bytes::Cursor;
use crate::dump::walk::collect_hitboxes;
use crate::dump::{Chunk, ChunkNode, DumpError, Layout, Result, TAIL_SIZE, decode_node_at};

/// Logic node reached only through the scene order table.
#[derive(Debug, Clone)]
pub struct SpareNode {
	/// Table entry the node was decoded from.
	pub entry: u32,
	/// Decoded node; its address is the record start.
	pub node: ChunkNode,
}

/// Scene table entry that could not be decoded.
#[derive(Debug)]
pub struct SpareFailure {
	/// Offending table entry.
	pub entry: u32,
	/// Decode error.
	pub error: DumpError,
}

/// Read the scene order table, or nothing when the layout has none.
pub fn read_scene_order(bytes: &[u8], layout: &Layout) -> Result<Vec<u32>> {
	let Some(table) = layout.scene_table else {
		return Ok(Vec::new());
	};

	let size = table.len.saturating_mul(4);
	let offset = layout.resolve(table.addr, size, bytes.len())?;
	let mut cursor = Cursor::at(bytes, offset);
	let mut out = Vec::with_capacity(table.len);
	for _ in 0..table.len {
		out.push(cursor.read_u32()?);
	}
	Ok(out)
}

/// Decode every table entry that no walk discovered.
///
/// Each entry is taken as the end of a record, probed and decoded backward
/// like a walk step. Zero entries, repeated entries, and addresses in `known`
/// are skipped.
pub fn resolve_spares(bytes: &[u8], layout: &Layout, scene_order: &[u32], known: &HashSet<u32>) -> (Vec<SpareNode>, Vec<SpareFailure>) {
	let mut seen = HashSet::new();
	let mut spares = Vec::new();
	let mut failures = Vec::new();

	for &entry in scene_order {
		if entry == 0 || known.contains(&entry) || !seen.insert(entry) {
			continue;
		}
		match decode_spare(bytes, layout, entry) {
			Ok(node) => spares.push(SpareNode { entry, node }),
			Err(error) => {
				tracing::warn!(entry = %format!("0x{entry:08x}"), error = %error, "spare node decode failed");
				failures.push(SpareFailure { entry, error });
			}
		}
	}

	(spares, failures)
}

fn decode_spare(bytes: &[u8], layout: &Layout, entry: u32) -> Result<ChunkNode> {
	let cursor = layout
		.to_offset(entry)
		.filter(|offset| *offset <= bytes.len())
		.ok_or(DumpError::OutOfBounds { addr: entry, need: TAIL_SIZE })?;

	let node = decode_node_at(bytes, cursor)?;
	let offset = cursor - node.size();
	let addr = layout.to_address(offset);
	let (hitboxes, hitbox_issue) = collect_hitboxes(bytes, layout, addr, node.hitbox_ptr());
	Ok(ChunkNode {
		offset,
		addr,
		node,
		hitboxes,
		hitbox_issue,
	})
}

/// Chunk indices in scene table order, then every unmatched chunk in discovery order.
///
/// A chunk matches a table entry through the address of its first decoded
/// node. Each index appears once.
pub fn order_chunks(chunks: &[Chunk], scene_order: &[u32]) -> Vec<usize> {
	let mut placed = vec![false; chunks.len()];
	let mut out = Vec::with_capacity(chunks.len());

	for entry in scene_order {
		let matched = chunks.iter().position(|chunk| chunk.first_addr() == Some(*entry));
		if let Some(index) = matched.filter(|index| !placed[*index]) {
			placed[index] = true;
			out.push(index);
		}
	}

	out.extend((0..chunks.len()).filter(|index| !placed[*index]));
	out
}
