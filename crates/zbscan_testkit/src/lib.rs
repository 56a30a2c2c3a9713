//! Synthetic big-endian image builder shared by workspace tests.

/// Address bias used by the default layout.
pub const BIAS: u32 = 0x3FE00;

/// Byte length of the trailing record block every logic node ends with.
pub const TAIL_SIZE: usize = 22;

/// Byte length of one hitbox record.
pub const HITBOX_SIZE: usize = 24;

/// Zero-filled image with helpers for placing records at fixed offsets.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
	bytes: Vec<u8>,
	bias: u32,
}

impl ImageBuilder {
	/// Create a zero-filled image of `len` bytes using [`BIAS`].
	pub fn new(len: usize) -> Self {
		Self::with_bias(len, BIAS)
	}

	/// Create a zero-filled image with an explicit address bias.
	pub fn with_bias(len: usize, bias: u32) -> Self {
		Self { bytes: vec![0; len], bias }
	}

	/// Address bias applied by [`ImageBuilder::addr`].
	pub fn bias(&self) -> u32 {
		self.bias
	}

	/// Translate a file offset into an absolute address.
	pub fn addr(&self, offset: usize) -> u32 {
		u32::try_from(offset).expect("offset fits in u32") + self.bias
	}

	/// Copy raw bytes at `offset`.
	pub fn put_bytes(&mut self, offset: usize, raw: &[u8]) -> &mut Self {
		self.bytes[offset..offset + raw.len()].copy_from_slice(raw);
		self
	}

	/// Write a big-endian `u32` at `offset`.
	pub fn put_u32(&mut self, offset: usize, value: u32) -> &mut Self {
		self.put_bytes(offset, &value.to_be_bytes())
	}

	/// Write a big-endian `i32` at `offset`.
	pub fn put_i32(&mut self, offset: usize, value: i32) -> &mut Self {
		self.put_bytes(offset, &value.to_be_bytes())
	}

	/// Write one `ddddd\0` frame marker at `offset`.
	pub fn put_marker(&mut self, offset: usize, value: u32) -> &mut Self {
		assert!(value <= 99_999, "frame marker value out of range");
		let text = format!("{value:05}");
		self.put_bytes(offset, text.as_bytes());
		self.bytes[offset + 5] = 0;
		self
	}

	/// Write consecutive frame markers starting at `offset`.
	pub fn put_markers(&mut self, offset: usize, values: &[u32]) -> &mut Self {
		for (index, value) in values.iter().enumerate() {
			self.put_marker(offset + index * 6, *value);
		}
		self
	}

	/// Write a discriminant-driven logic node that ends at `end`.
	///
	/// `leading` must hold exactly `type_chunk + 5` addresses. Returns the
	/// record start offset.
	pub fn put_node(&mut self, end: usize, type_chunk: u8, leading: &[u32]) -> usize {
		assert_eq!(leading.len(), usize::from(type_chunk) + 5, "leading address count must match discriminant");
		let start = end - node_size(type_chunk);
		for (index, value) in leading.iter().enumerate() {
			self.put_u32(start + index * 4, *value);
		}
		self.put_tail(end, type_chunk);
		start
	}

	/// Write a 22-byte tail ending at `end` with zeroed payload and the given discriminant.
	pub fn put_tail(&mut self, end: usize, type_chunk: u8) -> &mut Self {
		let start = end - TAIL_SIZE;
		self.bytes[start..end].fill(0);
		self.bytes[start + 12] = type_chunk;
		self
	}

	/// Write a tail whose discriminant ends any backward walk reaching `end`.
	pub fn put_terminator(&mut self, end: usize) -> &mut Self {
		self.put_tail(end, 0xFF)
	}

	/// Write one hitbox record `(y0, y1, x0, x1)` at `offset`.
	pub fn put_hitbox(&mut self, offset: usize, rect: [i32; 4], next: u32, score: i32) -> &mut Self {
		for (index, value) in rect.iter().enumerate() {
			self.put_i32(offset + index * 4, *value);
		}
		self.put_u32(offset + 16, next);
		self.put_i32(offset + 20, score)
	}

	/// Borrow the bytes written so far.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Finish and return the image bytes.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}
}

/// Byte length of a logic node with discriminant `type_chunk`.
pub fn node_size(type_chunk: u8) -> usize {
	TAIL_SIZE + 4 * (usize::from(type_chunk) + 5)
}

/// Write `bytes` to a unique file under the system temp directory.
pub fn write_temp_image(tag: &str, bytes: &[u8]) -> std::path::PathBuf {
	let dir = std::env::temp_dir().join("zbscan-tests");
	std::fs::create_dir_all(&dir).expect("temp dir is writable");
	let path = dir.join(format!("{tag}-{}.bin", std::process::id()));
	std::fs::write(&path, bytes).expect("temp image is writable");
	path
}

/// Offsets used by [`sample_scene`].
pub mod sample {
	/// Image length.
	pub const LEN: usize = 2048;
	/// Anchor of the walkable marker run.
	pub const ANCHOR: usize = 1000;
	/// Frame values of the walkable marker run.
	pub const FRAMES: [u32; 5] = [200, 210, 220, 230, 240];
	/// Anchor of a marker run too close to the image start to walk.
	pub const SHORT_ANCHOR: usize = 10;
	/// Record starts in walk order: a type-6, a type-4, then a type-1 node.
	pub const NODES: [usize; 3] = [934, 876, 830];
	/// Hitbox records of the first node, list order.
	pub const FIRST_HITBOXES: [usize; 2] = [1200, 1300];
	/// Hitbox record of the second node.
	pub const SECOND_HITBOX: usize = 1400;
	/// Scene table offset; two entries.
	pub const SCENE_TABLE: usize = 1600;
	/// Record end of the node reachable only through the scene table.
	pub const SPARE_END: usize = 1700;
	/// Dangling link target of the second node.
	pub const DANGLING: usize = 1500;
}

/// Image holding one walkable chunk, one unwalkable anchor, and a scene table.
///
/// Walking from [`sample::ANCHOR`] decodes three nodes. The last one is the
/// entry, linked `entry -> second -> first`, with the second node's respawn
/// slot pointing back at the entry.
pub fn sample_scene() -> ImageBuilder {
	use sample::*;

	let mut image = ImageBuilder::new(LEN);
	image.put_markers(SHORT_ANCHOR, &[1, 2]);
	image.put_markers(ANCHOR, &FRAMES);
	let frame = |index: usize| BIAS + (ANCHOR + index * 6) as u32;
	let [first, second, entry] = NODES;

	let first_leading = [
		0,
		0,
		frame(2),
		frame(4),
		frame(2),
		frame(3),
		0,
		0,
		0,
		0,
		image.addr(FIRST_HITBOXES[0]),
	];
	assert_eq!(image.put_node(ANCHOR, 6, &first_leading), first);
	image.put_hitbox(FIRST_HITBOXES[0], [10, 40, 20, 60], image.addr(FIRST_HITBOXES[1]), 500);
	image.put_hitbox(FIRST_HITBOXES[1], [15, 45, 80, 120], 0, 250);

	let second_leading = [
		image.addr(entry),
		image.addr(first),
		frame(1),
		frame(2),
		frame(1),
		frame(1),
		0,
		image.addr(DANGLING),
		image.addr(SECOND_HITBOX),
	];
	assert_eq!(image.put_node(first, 4, &second_leading), second);
	image.put_u32(first - 4, 0x0004_1234);
	image.put_hitbox(SECOND_HITBOX, [0, 10, 0, 10], 0, 100);

	let entry_leading = [image.addr(second), frame(0), frame(1), 0, 0, 0];
	assert_eq!(image.put_node(second, 1, &entry_leading), entry);
	image.put_u32(second - 4, 0x0004_5678);
	image.put_terminator(entry);

	let spare_leading = [0, frame(0), frame(1), 0, 0];
	image.put_node(SPARE_END, 0, &spare_leading);
	image.put_u32(SCENE_TABLE, image.addr(first));
	image.put_u32(SCENE_TABLE + 4, image.addr(SPARE_END));
	image
}
