use std::collections::HashSet;

use rayon::prelude::*;

use crate::dump::{
	AnimationPath, Chunk, DumpError, DumpImage, FrameIndex, FrameSequence, Layout, Result, SpareFailure, SpareNode, chunk_paths, order_chunks,
	read_scene_order, resolve_spares, scan_frame_sequences, walk_chunk,
};

/// Anchored walk that aborted.
#[derive(Debug)]
pub struct ChunkFailure {
	/// Anchor offset of the failed walk.
	pub anchor: usize,
	/// Error that stopped it.
	pub error: DumpError,
}

/// Everything recovered from one image.
#[derive(Debug)]
pub struct Analysis {
	/// Marker runs in ascending offset order.
	pub frame_sequences: Vec<FrameSequence>,
	/// Marker lookup over every sequence.
	pub frames: FrameIndex,
	/// Successful walks in anchor order.
	pub chunks: Vec<Chunk>,
	/// Walks that aborted, in anchor order.
	pub failures: Vec<ChunkFailure>,
	/// Scene table entries in table order.
	pub scene_order: Vec<u32>,
	/// Set when the configured scene table could not be read.
	pub scene_order_error: Option<DumpError>,
	/// Nodes reachable only through the scene table.
	pub spares: Vec<SpareNode>,
	/// Scene table entries that failed to decode.
	pub spare_failures: Vec<SpareFailure>,
}

impl Analysis {
	/// Borrow chunk `index` in anchor order.
	pub fn chunk(&self, index: usize) -> Result<&Chunk> {
		self.chunks.get(index).ok_or(DumpError::ChunkOutOfRange {
			index,
			count: self.chunks.len(),
		})
	}

	/// Chunk indices in scene order.
	pub fn scene_ordered(&self) -> Vec<usize> {
		order_chunks(&self.chunks, &self.scene_order)
	}

	/// Playable paths of chunk `index`, last-found first.
	pub fn paths(&self, index: usize, layout: &Layout) -> Result<Vec<AnimationPath>> {
		Ok(chunk_paths(self.chunk(index)?, &self.frames, layout))
	}

	/// Total number of decoded nodes across all chunks.
	pub fn node_count(&self) -> usize {
		self.chunks.iter().map(|chunk| chunk.nodes.len()).sum()
	}
}

/// Scan, walk every anchor, and resolve the scene table.
///
/// Walks run in parallel; results keep anchor order. A failed walk is recorded
/// and never stops the others.
pub fn analyze(image: &DumpImage, layout: &Layout) -> Analysis {
	let bytes = image.bytes();
	let frame_sequences = scan_frame_sequences(bytes);
	let frames = FrameIndex::build(&frame_sequences);

	let walks: Vec<Result<Chunk>> = frame_sequences.par_iter().map(|sequence| walk_chunk(bytes, layout, sequence)).collect();

	let mut chunks = Vec::new();
	let mut failures = Vec::new();
	for (sequence, walk) in frame_sequences.iter().zip(walks) {
		match walk {
			Ok(chunk) => chunks.push(chunk),
			Err(error) => {
				tracing::warn!(anchor = sequence.anchor(), error = %error, "chunk walk failed");
				failures.push(ChunkFailure {
					anchor: sequence.anchor(),
					error,
				});
			}
		}
	}

	let (scene_order, scene_order_error) = match read_scene_order(bytes, layout) {
		Ok(order) => (order, None),
		Err(error) => {
			tracing::warn!(error = %error, "scene table unreadable");
			(Vec::new(), Some(error))
		}
	};

	let known: HashSet<u32> = chunks.iter().flat_map(|chunk| chunk.nodes.iter().map(|node| node.addr)).collect();
	let (spares, spare_failures) = resolve_spares(bytes, layout, &scene_order, &known);

	tracing::debug!(
		sequences = frame_sequences.len(),
		chunks = chunks.len(),
		failures = failures.len(),
		spares = spares.len(),
		"analysis complete"
	);

	Analysis {
		frame_sequences,
		frames,
		chunks,
		failures,
		scene_order,
		scene_order_error,
		spares,
		spare_failures,
	}
}

#[cfg(test)]
mod tests;
