use std::collections::HashMap;

use crate::dump::Layout;

/// Byte length of one `ddddd\0` frame marker.
pub const MARKER_SIZE: usize = 6;

/// One decoded frame marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMarker {
	/// File offset of the first digit.
	pub offset: usize,
	/// Decoded frame number.
	pub value: u32,
}

/// Run of at least two markers laid out back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
	markers: Vec<FrameMarker>,
}

impl FrameSequence {
	/// File offset of the first marker; backward walks start here.
	pub fn anchor(&self) -> usize {
		self.markers[0].offset
	}

	/// Markers in ascending offset order.
	pub fn markers(&self) -> &[FrameMarker] {
		&self.markers
	}

	/// Number of markers in the run.
	pub fn len(&self) -> usize {
		self.markers.len()
	}

	/// Always false; sequences hold at least two markers.
	pub fn is_empty(&self) -> bool {
		self.markers.is_empty()
	}
}

/// Decode a marker at `offset`: five ASCII digits followed by a zero byte.
pub fn parse_marker(bytes: &[u8], offset: usize) -> Option<u32> {
	let raw = bytes.get(offset..offset.checked_add(MARKER_SIZE)?)?;
	if raw[5] != 0 || !raw[..5].iter().all(u8::is_ascii_digit) {
		return None;
	}
	Some(raw[..5].iter().fold(0_u32, |acc, byte| acc * 10 + u32::from(byte - b'0')))
}

/// Scan the whole image for marker runs.
///
/// Runs advance in 6-byte strides. A failed position either closes a run of two
/// or more markers, or rewinds to one byte past the start of the shorter run.
pub fn scan_frame_sequences(bytes: &[u8]) -> Vec<FrameSequence> {
	let mut out = Vec::new();
	let mut run: Vec<FrameMarker> = Vec::new();
	let mut pos = 0_usize;

	while pos + MARKER_SIZE <= bytes.len() {
		if let Some(value) = parse_marker(bytes, pos) {
			run.push(FrameMarker { offset: pos, value });
			pos += MARKER_SIZE;
			continue;
		}

		if run.len() >= 2 {
			out.push(FrameSequence {
				markers: std::mem::take(&mut run),
			});
		} else if let Some(first) = run.first() {
			pos = first.offset;
		}
		run.clear();
		pos += 1;
	}

	if run.len() >= 2 {
		out.push(FrameSequence { markers: run });
	}

	tracing::debug!(sequences = out.len(), "frame marker scan complete");
	out
}

/// Frame pointer annotated with its file offset and marker value when one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePtr {
	/// Absolute address stored in the record.
	pub addr: u32,
	/// Translated file offset, absent for null or below-bias addresses.
	pub offset: Option<usize>,
	/// Frame number of the marker at `offset`.
	pub frame: Option<u32>,
}

/// Lookup from marker file offset to frame value across every scanned sequence.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
	by_offset: HashMap<usize, u32>,
}

impl FrameIndex {
	/// Index every marker of `sequences`.
	pub fn build(sequences: &[FrameSequence]) -> Self {
		let by_offset = sequences
			.iter()
			.flat_map(|sequence| sequence.markers().iter())
			.map(|marker| (marker.offset, marker.value))
			.collect();
		Self { by_offset }
	}

	/// Frame value of the marker starting at `offset`.
	pub fn value_at(&self, offset: usize) -> Option<u32> {
		self.by_offset.get(&offset).copied()
	}

	/// Resolve a stored frame pointer against the index.
	pub fn frame_ptr(&self, layout: &Layout, addr: u32) -> FramePtr {
		let offset = layout.to_offset(addr);
		FramePtr {
			addr,
			offset,
			frame: offset.and_then(|offset| self.value_at(offset)),
		}
	}

	/// Number of indexed markers.
	pub fn len(&self) -> usize {
		self.by_offset.len()
	}

	/// Whether no markers were indexed.
	pub fn is_empty(&self) -> bool {
		self.by_offset.is_empty()
	}
}

#[cfg(test)]
mod tests;
