use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DumpError>;

/// Errors produced while loading, decoding, and walking memory dumps.
#[derive(Debug, Error)]
pub enum DumpError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Address zero was dereferenced.
	#[error("null address dereference")]
	NullAddress,
	/// Address translated outside the image for the requested record size.
	#[error("address 0x{addr:08x} out of bounds for {need}-byte record")]
	OutOfBounds {
		/// Offending absolute address.
		addr: u32,
		/// Record size that had to fit.
		need: usize,
	},
	/// Backward read would start before the first byte of the image.
	#[error("record ending at offset 0x{cursor:08x} needs {need} bytes before it")]
	BelowBufferStart {
		/// Record end offset.
		cursor: usize,
		/// Record size that had to fit.
		need: usize,
	},
	/// Non-zero hitbox `next` pointer translated outside the image.
	#[error("hitbox chain of node 0x{node:08x} corrupt at 0x{addr:08x}")]
	HitboxChainCorrupt {
		/// Address of the owning logic node.
		node: u32,
		/// Offending `next` address.
		addr: u32,
	},
	/// Hitbox chain revisited a record.
	#[error("hitbox chain of node 0x{node:08x} cycles at 0x{addr:08x}")]
	HitboxCycle {
		/// Address of the owning logic node.
		node: u32,
		/// Address visited twice.
		addr: u32,
	},
	/// CLI address argument was invalid.
	#[error("invalid address literal: {value}")]
	InvalidAddressLiteral {
		/// User-provided value.
		value: String,
	},
	/// CLI file offset argument was invalid.
	#[error("invalid offset literal: {value}")]
	InvalidOffsetLiteral {
		/// User-provided value.
		value: String,
	},
	/// Neither an address nor an offset was given for a record position.
	#[error("record position needs --addr or --offset")]
	MissingRecordPosition,
	/// CLI scene table argument was invalid.
	#[error("invalid scene table (expected ADDR:LEN): {value}")]
	InvalidSceneTable {
		/// User-provided value.
		value: String,
	},
	/// Discriminant outside the trusted variant range.
	#[error("unknown logic node discriminant {type_chunk} at offset 0x{offset:08x}")]
	UnknownShape {
		/// Decoded `type_chunk` byte.
		type_chunk: u8,
		/// Record end offset that was probed.
		offset: usize,
	},
	/// Requested chunk index does not exist.
	#[error("chunk index {index} out of range (have {count})")]
	ChunkOutOfRange {
		/// Requested chunk index.
		index: usize,
		/// Number of decoded chunks.
		count: usize,
	},
}
