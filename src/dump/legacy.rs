use crate::dump::Result;
use crate::dump::bytes::Cursor;

/// Byte length of a scene header record.
pub const HEADER_RECORD_SIZE: usize = 42;
/// Byte length of a fixed-shape node without a leading respawn slot.
pub const NO_HITBOX_NODE_SIZE: usize = 46;

/// Scene header record from the earliest captures.
///
/// Decoded on request only; anchored walks never produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
	/// First frame of the intro clip.
	pub frame_start: u32,
	/// Last frame of the intro clip.
	pub frame_end: u32,
	/// First frame of the failure clip.
	pub ko_start: u32,
	/// Last frame of the failure clip.
	pub ko_end: u32,
	/// Four addresses of unknown purpose.
	pub unknown: [u32; 4],
	/// Opaque bytes.
	pub fields: [u8; 6],
	/// Score word.
	pub score: i32,
}

/// Fixed-shape logic node used before `type_chunk` was understood.
///
/// Like [`HeaderRecord`] it is read forward from a record start and never
/// produced by anchored walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoHitboxNode {
	/// Node reached when the sequence succeeds.
	pub next: u32,
	/// First frame of the node's clip.
	pub frame_start: u32,
	/// Last frame of the node's clip.
	pub frame_end: u32,
	/// First frame in which hitboxes are live.
	pub hitbox_frame_start: u32,
	/// Last frame in which hitboxes are live.
	pub hitbox_frame_end: u32,
	/// Hitbox list head.
	pub hitbox: u32,
	/// Opaque bytes.
	pub fields: [u8; 10],
	/// Type bytes read as one word (`0x0200_0200` in most captures).
	pub marker: u32,
	/// Callback routine address.
	pub callback: u32,
	/// Init struct address.
	pub init_struct: u32,
}

/// Decode a header record starting at `offset`.
pub fn decode_header_record(bytes: &[u8], offset: usize) -> Result<HeaderRecord> {
	let mut cursor = Cursor::at(bytes, offset);
	let frame_start = cursor.read_u32()?;
	let frame_end = cursor.read_u32()?;
	let ko_start = cursor.read_u32()?;
	let ko_end = cursor.read_u32()?;
	let mut unknown = [0_u32; 4];
	for slot in &mut unknown {
		*slot = cursor.read_u32()?;
	}

	Ok(HeaderRecord {
		frame_start,
		frame_end,
		ko_start,
		ko_end,
		unknown,
		fields: cursor.read_array()?,
		score: cursor.read_i32()?,
	})
}

/// Decode a fixed-shape node starting at `offset`.
pub fn decode_no_hitbox_node(bytes: &[u8], offset: usize) -> Result<NoHitboxNode> {
	let mut cursor = Cursor::at(bytes, offset);
	Ok(NoHitboxNode {
		next: cursor.read_u32()?,
		frame_start: cursor.read_u32()?,
		frame_end: cursor.read_u32()?,
		hitbox_frame_start: cursor.read_u32()?,
		hitbox_frame_end: cursor.read_u32()?,
		hitbox: cursor.read_u32()?,
		fields: cursor.read_array()?,
		marker: cursor.read_u32()?,
		callback: cursor.read_u32()?,
		init_struct: cursor.read_u32()?,
	})
}
