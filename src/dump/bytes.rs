use crate::dump::{DumpError, Result};

/// Simple bounded big-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor positioned at `pos`.
	pub fn at(bytes: &'a [u8], pos: usize) -> Self {
		Self { bytes, pos }
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(DumpError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}
}

/// Position a cursor at the start of a `size`-byte record that ends at `end`.
pub fn cursor_before(bytes: &[u8], end: usize, size: usize) -> Result<Cursor<'_>> {
	let Some(start) = end.checked_sub(size) else {
		return Err(DumpError::BelowBufferStart { cursor: end, need: size });
	};
	if end > bytes.len() {
		return Err(DumpError::UnexpectedEof {
			at: start,
			need: size,
			rem: bytes.len().saturating_sub(start),
		});
	}
	Ok(Cursor::at(bytes, start))
}

/// Read a big-endian `u32` at `offset` when four bytes are available.
pub fn u32_at(bytes: &[u8], offset: usize) -> Option<u32> {
	let raw = bytes.get(offset..offset.checked_add(4)?)?;
	let mut buf = [0_u8; 4];
	buf.copy_from_slice(raw);
	Some(u32::from_be_bytes(buf))
}
