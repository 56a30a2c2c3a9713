use zbscan::dump::{
	AnimationPath, Chunk, ChunkNode, FrameIndex, FrameSequence, GraphStats, HitboxEntry, HitboxIssue, HitboxRecord, Layout, LogicNode, NodeTail, WalkStop,
};

use crate::cmd::util::{addr_hex, offset_hex};

#[derive(serde::Serialize)]
pub(crate) struct MarkerJson {
	pub offset: String,
	pub addr: String,
	pub frame: u32,
}

#[derive(serde::Serialize)]
pub(crate) struct SequenceJson {
	pub anchor: String,
	pub anchor_addr: String,
	pub markers: Vec<MarkerJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct FramePtrJson {
	pub slot: &'static str,
	pub addr: String,
	pub offset: Option<String>,
	pub frame: Option<u32>,
}

#[derive(serde::Serialize)]
pub(crate) struct TailJson {
	pub fields: String,
	pub type_a: u8,
	pub type_b: u8,
	pub type_chunk: u8,
	pub type_d: u8,
	pub callback: String,
	pub init_struct: String,
}

#[derive(serde::Serialize)]
pub(crate) struct HitboxJson {
	pub offset: Option<String>,
	pub addr: Option<String>,
	pub y0: i32,
	pub y1: i32,
	pub x0: i32,
	pub x1: i32,
	pub next: String,
	pub score: i32,
}

#[derive(serde::Serialize)]
pub(crate) struct NodeJson {
	pub offset: String,
	pub addr: String,
	pub shape: String,
	pub size: usize,
	pub frame_fields: Vec<FramePtrJson>,
	pub hitbox: Option<String>,
	pub successors: Vec<String>,
	pub respawn: Option<String>,
	pub tail: TailJson,
	pub hitboxes: Vec<HitboxJson>,
	pub hitbox_issue: Option<String>,
}

#[derive(serde::Serialize)]
pub(crate) struct StatsJson {
	pub nodes: usize,
	pub edges: usize,
	pub dangling: usize,
	pub roots: usize,
	pub leaves: usize,
	pub is_dag: bool,
	pub cycles: usize,
}

#[derive(serde::Serialize)]
pub(crate) struct ChunkJson {
	pub id: usize,
	pub anchor: String,
	pub entry: Option<String>,
	pub start: String,
	pub stop: String,
	pub frames: SequenceJson,
	pub graph: StatsJson,
	pub nodes: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct StepHitboxJson {
	pub x0: i32,
	pub y0: i32,
	pub x1: i32,
	pub y1: i32,
	pub points: i32,
	pub frame_start: Option<u32>,
	pub frame_end: Option<u32>,
}

#[derive(serde::Serialize)]
pub(crate) struct StepJson {
	pub addr: String,
	pub frame_start: u32,
	pub frame_end: u32,
	pub respawn: Option<String>,
	pub hitboxes: Vec<StepHitboxJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct PathJson {
	pub steps: Vec<StepJson>,
	pub total_frames: i64,
	pub total_hitboxes: usize,
}

pub(crate) fn sequence_json(layout: &Layout, sequence: &FrameSequence) -> SequenceJson {
	SequenceJson {
		anchor: offset_hex(sequence.anchor()),
		anchor_addr: addr_hex(layout.to_address(sequence.anchor())),
		markers: sequence
			.markers()
			.iter()
			.map(|marker| MarkerJson {
				offset: offset_hex(marker.offset),
				addr: addr_hex(layout.to_address(marker.offset)),
				frame: marker.value,
			})
			.collect(),
	}
}

pub(crate) fn node_json(layout: &Layout, frames: &FrameIndex, item: &ChunkNode) -> NodeJson {
	let mut out = logic_node_json(layout, frames, item.offset, &item.node);
	out.hitboxes = item.hitboxes.iter().map(hitbox_entry_json).collect();
	out.hitbox_issue = item.hitbox_issue.map(hitbox_issue_label);
	out
}

pub(crate) fn logic_node_json(layout: &Layout, frames: &FrameIndex, offset: usize, node: &LogicNode) -> NodeJson {
	NodeJson {
		offset: offset_hex(offset),
		addr: addr_hex(layout.to_address(offset)),
		shape: node.shape().label(),
		size: node.size(),
		frame_fields: node
			.frame_slots()
			.map(|(slot, addr)| {
				let ptr = frames.frame_ptr(layout, addr);
				FramePtrJson {
					slot: slot.name(),
					addr: addr_hex(ptr.addr),
					offset: ptr.offset.map(offset_hex),
					frame: ptr.frame,
				}
			})
			.collect(),
		hitbox: node.shape().has_hitbox().then(|| addr_hex(node.hitbox_ptr())),
		successors: node.successors().into_iter().map(addr_hex).collect(),
		respawn: node.respawn().map(addr_hex),
		tail: tail_json(&node.tail),
		hitboxes: Vec::new(),
		hitbox_issue: None,
	}
}

pub(crate) fn tail_json(tail: &NodeTail) -> TailJson {
	TailJson {
		fields: hex_bytes(&tail.fields),
		type_a: tail.type_a,
		type_b: tail.type_b,
		type_chunk: tail.type_chunk,
		type_d: tail.type_d,
		callback: addr_hex(tail.callback),
		init_struct: addr_hex(tail.init_struct),
	}
}

pub(crate) fn hitbox_json(record: &HitboxRecord, offset: Option<usize>, addr: Option<u32>) -> HitboxJson {
	HitboxJson {
		offset: offset.map(offset_hex),
		addr: addr.map(addr_hex),
		y0: record.y0,
		y1: record.y1,
		x0: record.x0,
		x1: record.x1,
		next: addr_hex(record.next),
		score: record.score,
	}
}

fn hitbox_entry_json(entry: &HitboxEntry) -> HitboxJson {
	hitbox_json(&entry.record, Some(entry.offset), Some(entry.addr))
}

pub(crate) fn chunk_json(layout: &Layout, frames: &FrameIndex, id: usize, chunk: &Chunk, stats: GraphStats) -> ChunkJson {
	ChunkJson {
		id,
		anchor: offset_hex(chunk.sequence.anchor()),
		entry: chunk.entry_addr().map(addr_hex),
		start: offset_hex(chunk.start),
		stop: stop_label(chunk.stop),
		frames: sequence_json(layout, &chunk.sequence),
		graph: StatsJson {
			nodes: stats.nodes,
			edges: stats.edges,
			dangling: stats.dangling,
			roots: stats.roots,
			leaves: stats.leaves,
			is_dag: stats.is_dag,
			cycles: stats.cycles,
		},
		nodes: chunk.nodes.iter().map(|item| node_json(layout, frames, item)).collect(),
	}
}

pub(crate) fn path_json(path: &AnimationPath) -> PathJson {
	PathJson {
		steps: path
			.steps
			.iter()
			.map(|step| StepJson {
				addr: addr_hex(step.addr),
				frame_start: step.frame_start,
				frame_end: step.frame_end,
				respawn: step.respawn.map(addr_hex),
				hitboxes: step
					.hitboxes
					.iter()
					.map(|hitbox| StepHitboxJson {
						x0: hitbox.record.x0,
						y0: hitbox.record.y0,
						x1: hitbox.record.x1,
						y1: hitbox.record.y1,
						points: hitbox.record.score,
						frame_start: hitbox.frame_start,
						frame_end: hitbox.frame_end,
					})
					.collect(),
			})
			.collect(),
		total_frames: path.total_frames,
		total_hitboxes: path.total_hitboxes,
	}
}

pub(crate) fn stop_label(stop: WalkStop) -> String {
	match stop {
		WalkStop::Unknown(type_chunk) => format!("Unknown({type_chunk})"),
		WalkStop::NearMiss(type_chunk) => format!("NearMiss({type_chunk})"),
		WalkStop::Revisit(offset) => format!("Revisit({})", offset_hex(offset)),
		WalkStop::MaxRecords => "MaxRecords".to_owned(),
	}
}

pub(crate) fn hitbox_issue_label(issue: HitboxIssue) -> String {
	match issue {
		HitboxIssue::HeadOutOfBounds(addr) => format!("HeadOutOfBounds({})", addr_hex(addr)),
		HitboxIssue::ChainCorrupt(addr) => format!("ChainCorrupt({})", addr_hex(addr)),
		HitboxIssue::Cycle(addr) => format!("Cycle({})", addr_hex(addr)),
	}
}

pub(crate) fn hex_bytes(raw: &[u8]) -> String {
	raw.iter().map(|byte| format!("{byte:02x}")).collect()
}
