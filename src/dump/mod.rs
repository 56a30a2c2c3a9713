mod analyze;
mod bytes;
mod compression;
mod error;
mod graph;
mod hitbox;
mod image;
mod layout;
mod legacy;
mod marker;
mod paths;
mod record;
mod scene;
mod walk;

/// Whole-image analysis driver and its result.
pub use analyze::{Analysis, ChunkFailure, analyze};
/// Compression detection result.
pub use compression::Compression;
/// Error and result aliases.
pub use error::{DumpError, Result};
/// Node graph types and builder.
pub use graph::{EdgeKind, GraphEdge, GraphStats, NodeGraph, build_graph};
/// Hitbox list resolution.
pub use hitbox::{HitboxEntry, resolve_hitbox_chain};
/// Loaded memory image.
pub use image::DumpImage;
/// Address translation and tunables.
pub use layout::{DEFAULT_BIAS, Layout, PathOptions, SceneTable, WalkOptions};
/// Fixed-shape records from early captures.
pub use legacy::{HEADER_RECORD_SIZE, HeaderRecord, NO_HITBOX_NODE_SIZE, NoHitboxNode, decode_header_record, decode_no_hitbox_node};
/// Frame marker scanning and lookup.
pub use marker::{FrameIndex, FrameMarker, FramePtr, FrameSequence, MARKER_SIZE, parse_marker, scan_frame_sequences};
/// Root, leaf, and path enumeration.
pub use paths::{AnimationPath, PathStep, StepHitbox, chunk_paths, find_all_paths, find_leaves, find_roots, path_steps};
/// Logic node and hitbox record decoding.
pub use record::{
	Discriminant, HITBOX_SIZE, HitboxRecord, LogicNode, MAX_TYPE_CHUNK, NodeShape, NodeTail, Slot, TAIL_SIZE, decode_hitbox, decode_node, decode_node_at,
	probe_discriminant,
};
/// Scene table reading, spare nodes, and chunk ordering.
pub use scene::{SpareFailure, SpareNode, order_chunks, read_scene_order, resolve_spares};
/// Anchored backward walk.
pub use walk::{Chunk, ChunkNode, HitboxIssue, WalkStop, resume_offset, walk_chunk};
