use std::collections::HashSet;

use crate::dump::{DumpError, HITBOX_SIZE, HitboxRecord, Layout, Result, decode_hitbox};

/// Hitbox record annotated with its position in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitboxEntry {
	/// File offset of the record.
	pub offset: usize,
	/// Absolute address of the record.
	pub addr: u32,
	/// Decoded record.
	pub record: HitboxRecord,
}

/// Follow a hitbox list from `head` until a zero `next` pointer.
///
/// `node` is the owning logic node address and only labels errors. An
/// out-of-bounds `head` is reported as [`DumpError::OutOfBounds`]; an
/// out-of-bounds or revisited link further down marks the chain corrupt.
pub fn resolve_hitbox_chain(bytes: &[u8], layout: &Layout, node: u32, head: u32) -> Result<Vec<HitboxEntry>> {
	let mut out = Vec::new();
	if head == 0 {
		return Ok(out);
	}

	let mut visited = HashSet::new();
	let mut offset = layout.resolve(head, HITBOX_SIZE, bytes.len())?;
	let mut addr = head;

	loop {
		if !visited.insert(offset) {
			return Err(DumpError::HitboxCycle { node, addr });
		}

		let record = decode_hitbox(bytes, offset)?;
		out.push(HitboxEntry { offset, addr, record });

		if record.next == 0 {
			return Ok(out);
		}

		addr = record.next;
		offset = layout
			.deref(addr, HITBOX_SIZE, bytes.len())
			.ok_or(DumpError::HitboxChainCorrupt { node, addr })?;
	}
}
