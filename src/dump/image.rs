use std::fs;
use std::path::Path;

use crate::dump::Result;
use crate::dump::compression::{Compression, decode_bytes};

/// Immutable memory image loaded once and shared by every decoder.
#[derive(Debug, Clone)]
pub struct DumpImage {
	/// Compression the image was stored with.
	pub compression: Compression,
	bytes: Vec<u8>,
}

impl DumpImage {
	/// Read an image from disk, inflating zstd-compressed files.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = decode_bytes(raw)?;
		Ok(Self { compression, bytes })
	}

	/// Wrap an in-memory raw image.
	pub fn from_bytes(bytes: Vec<u8>) -> Self {
		Self {
			compression: Compression::None,
			bytes,
		}
	}

	/// Raw image bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Image length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether the image holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}
