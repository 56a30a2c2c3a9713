use crate::dump::bytes::{Cursor, cursor_before};
use crate::dump::{DumpError, Result};

/// Byte length of the trailing block shared by every logic node shape.
pub const TAIL_SIZE: usize = 22;
/// Byte length of one hitbox record.
pub const HITBOX_SIZE: usize = 24;
/// Largest trusted `type_chunk` discriminant.
pub const MAX_TYPE_CHUNK: u8 = 6;

const TYPE_CHUNK_IN_TAIL: usize = 12;

/// Role of one leading address slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
	/// Node re-entered after a failed sequence.
	Respawn,
	/// Node reached when the sequence succeeds.
	Next,
	/// First frame of the node's clip.
	FrameStart,
	/// Last frame of the node's clip.
	FrameEnd,
	/// First frame in which the hitboxes are live.
	HitboxFrameStart,
	/// Last frame in which the hitboxes are live.
	HitboxFrameEnd,
	/// Additional pointer of unconfirmed meaning, treated as a successor.
	Link(u8),
	/// Head of the node's hitbox list.
	Hitbox,
}

impl Slot {
	/// Stable field label.
	pub fn name(self) -> &'static str {
		match self {
			Self::Respawn => "respawn",
			Self::Next => "next",
			Self::FrameStart => "frame_start",
			Self::FrameEnd => "frame_end",
			Self::HitboxFrameStart => "hitbox_frame_start",
			Self::HitboxFrameEnd => "hitbox_frame_end",
			Self::Link(0) => "link0",
			Self::Link(1) => "link1",
			Self::Link(2) => "link2",
			Self::Link(_) => "link3",
			Self::Hitbox => "hitbox",
		}
	}
}

use Slot::{FrameEnd, FrameStart, Hitbox, HitboxFrameEnd, HitboxFrameStart, Link, Next, Respawn};

const SHAPE_SLOTS: [&[Slot]; 7] = [
	&[Next, FrameStart, FrameEnd, HitboxFrameStart, HitboxFrameEnd],
	&[Next, FrameStart, FrameEnd, HitboxFrameStart, HitboxFrameEnd, Link(0)],
	&[Respawn, Next, FrameStart, FrameEnd, HitboxFrameStart, HitboxFrameEnd, Hitbox],
	&[Respawn, Next, FrameStart, FrameEnd, HitboxFrameStart, HitboxFrameEnd, Link(0), Hitbox],
	&[Respawn, Next, FrameStart, FrameEnd, HitboxFrameStart, HitboxFrameEnd, Link(0), Link(1), Hitbox],
	&[
		Respawn,
		Next,
		FrameStart,
		FrameEnd,
		HitboxFrameStart,
		HitboxFrameEnd,
		Link(0),
		Link(1),
		Link(2),
		Hitbox,
	],
	&[
		Respawn,
		Next,
		FrameStart,
		FrameEnd,
		HitboxFrameStart,
		HitboxFrameEnd,
		Link(0),
		Link(1),
		Link(2),
		Link(3),
		Hitbox,
	],
];

/// Logic node layout selected by the `type_chunk` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeShape(u8);

impl NodeShape {
	/// Every trusted shape in discriminant order.
	pub const ALL: [NodeShape; 7] = [Self(0), Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

	/// Map a discriminant to its shape; values above 6 are not trusted.
	pub fn from_type_chunk(type_chunk: u8) -> Option<Self> {
		(type_chunk <= MAX_TYPE_CHUNK).then_some(Self(type_chunk))
	}

	/// Discriminant value.
	pub fn type_chunk(self) -> u8 {
		self.0
	}

	/// Leading slot roles in record order.
	pub fn slots(self) -> &'static [Slot] {
		SHAPE_SLOTS[usize::from(self.0)]
	}

	/// Number of leading 32-bit addresses (`type_chunk + 5`).
	pub fn leading_count(self) -> usize {
		usize::from(self.0) + 5
	}

	/// Whether the last leading address is a hitbox pointer.
	pub fn has_hitbox(self) -> bool {
		self.0 >= 2
	}

	/// Total record length in bytes.
	pub fn size(self) -> usize {
		TAIL_SIZE + 4 * self.leading_count()
	}

	/// Stable label such as `tree_logic_node_3`.
	pub fn label(self) -> String {
		format!("tree_logic_node_{}", self.0)
	}
}

/// Trailing block common to all logic node shapes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeTail {
	/// Opaque bytes preceding the type bytes.
	pub fields: [u8; 10],
	/// First type byte.
	pub type_a: u8,
	/// Second type byte.
	pub type_b: u8,
	/// Shape discriminant.
	pub type_chunk: u8,
	/// Fourth type byte.
	pub type_d: u8,
	/// Callback routine address.
	pub callback: u32,
	/// Init struct address.
	pub init_struct: u32,
}

impl NodeTail {
	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			fields: cursor.read_array()?,
			type_a: cursor.read_u8()?,
			type_b: cursor.read_u8()?,
			type_chunk: cursor.read_u8()?,
			type_d: cursor.read_u8()?,
			callback: cursor.read_u32()?,
			init_struct: cursor.read_u32()?,
		})
	}

	fn write(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.fields);
		out.extend_from_slice(&[self.type_a, self.type_b, self.type_chunk, self.type_d]);
		out.extend_from_slice(&self.callback.to_be_bytes());
		out.extend_from_slice(&self.init_struct.to_be_bytes());
	}
}

/// Decoded logic node of one of the seven discriminant-driven shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicNode {
	shape: NodeShape,
	leading: Vec<u32>,
	/// Shared trailing block.
	pub tail: NodeTail,
}

impl LogicNode {
	/// Assemble a node; `leading` must hold exactly `shape.leading_count()` addresses.
	pub fn new(shape: NodeShape, leading: Vec<u32>, tail: NodeTail) -> Option<Self> {
		(leading.len() == shape.leading_count()).then_some(Self { shape, leading, tail })
	}

	/// Record shape.
	pub fn shape(&self) -> NodeShape {
		self.shape
	}

	/// Record length in bytes.
	pub fn size(&self) -> usize {
		self.shape.size()
	}

	/// Leading addresses in record order.
	pub fn leading(&self) -> &[u32] {
		&self.leading
	}

	/// Leading addresses paired with their roles.
	pub fn slots(&self) -> impl Iterator<Item = (Slot, u32)> + '_ {
		self.shape.slots().iter().copied().zip(self.leading.iter().copied())
	}

	/// Value stored in `slot`, if this shape has it.
	pub fn slot(&self, slot: Slot) -> Option<u32> {
		self.slots().find(|(item, _)| *item == slot).map(|(_, value)| value)
	}

	/// Hitbox list head; zero for shapes without one.
	pub fn hitbox_ptr(&self) -> u32 {
		self.slot(Hitbox).unwrap_or(0)
	}

	/// Non-zero respawn pointer.
	pub fn respawn(&self) -> Option<u32> {
		self.slot(Respawn).filter(|addr| *addr != 0)
	}

	/// Non-zero successor pointers: `next` then each `link`.
	pub fn successors(&self) -> Vec<u32> {
		self.slots()
			.filter(|(slot, value)| matches!(slot, Next | Link(_)) && *value != 0)
			.map(|(_, value)| value)
			.collect()
	}

	/// Slots rendered as frame pointers (everything but the hitbox head).
	pub fn frame_slots(&self) -> impl Iterator<Item = (Slot, u32)> + '_ {
		self.slots().filter(|(slot, _)| *slot != Hitbox)
	}

	/// Encode back into the on-disk big-endian layout.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.size());
		for value in &self.leading {
			out.extend_from_slice(&value.to_be_bytes());
		}
		self.tail.write(&mut out);
		out
	}
}

/// How a probed discriminant should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminant {
	/// One of the seven trusted shapes.
	Shape(NodeShape),
	/// Value 7..=9: plausible but unverified, ends the chain with a diagnostic.
	NearMiss(u8),
	/// Anything else ends the chain.
	Unknown(u8),
}

impl Discriminant {
	/// Classify a raw `type_chunk` value.
	pub fn classify(type_chunk: u8) -> Self {
		match NodeShape::from_type_chunk(type_chunk) {
			Some(shape) => Self::Shape(shape),
			None if type_chunk <= 9 => Self::NearMiss(type_chunk),
			None => Self::Unknown(type_chunk),
		}
	}
}

/// Read the discriminant of the tail that ends at `cursor`.
pub fn probe_discriminant(bytes: &[u8], cursor: usize) -> Result<Discriminant> {
	let mut tail = cursor_before(bytes, cursor, TAIL_SIZE)?;
	let raw = tail.read_exact(TAIL_SIZE)?;
	Ok(Discriminant::classify(raw[TYPE_CHUNK_IN_TAIL]))
}

/// Decode a `shape` record that ends at `cursor`.
pub fn decode_node(bytes: &[u8], cursor: usize, shape: NodeShape) -> Result<LogicNode> {
	let mut record = cursor_before(bytes, cursor, shape.size())?;
	let mut leading = Vec::with_capacity(shape.leading_count());
	for _ in 0..shape.leading_count() {
		leading.push(record.read_u32()?);
	}
	let tail = NodeTail::read(&mut record)?;
	Ok(LogicNode { shape, leading, tail })
}

/// Probe and decode the record ending at `cursor`, rejecting untrusted discriminants.
pub fn decode_node_at(bytes: &[u8], cursor: usize) -> Result<LogicNode> {
	match probe_discriminant(bytes, cursor)? {
		Discriminant::Shape(shape) => decode_node(bytes, cursor, shape),
		Discriminant::NearMiss(type_chunk) | Discriminant::Unknown(type_chunk) => Err(DumpError::UnknownShape { type_chunk, offset: cursor }),
	}
}

/// Axis-aligned hitbox rectangle and list link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitboxRecord {
	/// Top edge.
	pub y0: i32,
	/// Bottom edge.
	pub y1: i32,
	/// Left edge.
	pub x0: i32,
	/// Right edge.
	pub x1: i32,
	/// Address of the next record, zero at the end of the list.
	pub next: u32,
	/// Points awarded for a hit.
	pub score: i32,
}

impl HitboxRecord {
	/// Encode back into the on-disk big-endian layout.
	pub fn to_bytes(&self) -> [u8; HITBOX_SIZE] {
		let mut out = [0_u8; HITBOX_SIZE];
		let words = [self.y0, self.y1, self.x0, self.x1, self.next as i32, self.score];
		for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
			chunk.copy_from_slice(&word.to_be_bytes());
		}
		out
	}
}

/// Decode the hitbox record starting at `offset`.
pub fn decode_hitbox(bytes: &[u8], offset: usize) -> Result<HitboxRecord> {
	let mut cursor = Cursor::at(bytes, offset);
	Ok(HitboxRecord {
		y0: cursor.read_i32()?,
		y1: cursor.read_i32()?,
		x0: cursor.read_i32()?,
		x1: cursor.read_i32()?,
		next: cursor.read_u32()?,
		score: cursor.read_i32()?,
	})
}

#[cfg(test)]
mod tests;
