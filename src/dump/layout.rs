use crate::dump::{DumpError, Result};

/// Additive bias between file offsets and absolute addresses in the reference dumps.
pub const DEFAULT_BIAS: u32 = 0x3FE00;

/// Fixed pointer table that lists scene entry nodes in game order.
///
/// The table sits at a different address in each dump, so no location is
/// assumed; callers supply one through [`Layout::scene_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTable {
	/// Absolute address of the first table entry.
	pub addr: u32,
	/// Number of 32-bit entries.
	pub len: usize,
}

/// Limits and heuristics for anchored backward walks.
#[derive(Debug, Clone)]
pub struct WalkOptions {
	/// Maximum number of records decoded from one anchor.
	pub max_records: usize,
	/// Continue from the last hitbox record when the word before a node does not look like an address.
	pub boundary_correction: bool,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self {
			max_records: 4096,
			boundary_correction: true,
		}
	}
}

/// Limits for root-to-leaf path enumeration.
#[derive(Debug, Clone)]
pub struct PathOptions {
	/// Maximum number of edges in one enumerated path.
	pub max_depth: usize,
}

impl Default for PathOptions {
	fn default() -> Self {
		Self { max_depth: 50 }
	}
}

/// Immutable image layout threaded through every decoder and walker.
#[derive(Debug, Clone)]
pub struct Layout {
	/// Value added to a file offset to obtain its absolute address.
	pub bias: u32,
	/// Scene order table location.
	///
	/// `None` by default, in which case `analyze` reports an empty scene order
	/// and resolves no spare nodes.
	pub scene_table: Option<SceneTable>,
	/// Anchored walk behavior.
	pub walk: WalkOptions,
	/// Path enumeration behavior.
	pub paths: PathOptions,
}

impl Default for Layout {
	fn default() -> Self {
		Self {
			bias: DEFAULT_BIAS,
			scene_table: None,
			walk: WalkOptions::default(),
			paths: PathOptions::default(),
		}
	}
}

impl Layout {
	/// Translate an absolute address into a file offset.
	///
	/// Address zero and addresses below the bias have no offset.
	pub fn to_offset(&self, addr: u32) -> Option<usize> {
		if addr == 0 {
			return None;
		}
		addr.checked_sub(self.bias).map(|offset| offset as usize)
	}

	/// Translate a file offset into an absolute address.
	pub fn to_address(&self, offset: usize) -> u32 {
		(offset as u32).wrapping_add(self.bias)
	}

	/// Translate `addr` and check that a `size`-byte record fits strictly inside `len` bytes.
	pub fn deref(&self, addr: u32, size: usize, len: usize) -> Option<usize> {
		let offset = self.to_offset(addr)?;
		if offset < len.saturating_sub(size) { Some(offset) } else { None }
	}

	/// Like [`Layout::deref`], but reports why the dereference failed.
	pub fn resolve(&self, addr: u32, size: usize, len: usize) -> Result<usize> {
		if addr == 0 {
			return Err(DumpError::NullAddress);
		}
		self.deref(addr, size, len).ok_or(DumpError::OutOfBounds { addr, need: size })
	}
}
