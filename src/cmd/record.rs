use std::path::PathBuf;

use zbscan::dump::{
	DumpError, DumpImage, FrameIndex, HEADER_RECORD_SIZE, Layout, NO_HITBOX_NODE_SIZE, Result, decode_header_record, decode_hitbox, decode_no_hitbox_node,
	decode_node_at, resolve_hitbox_chain, scan_frame_sequences,
};

use crate::cmd::util::{LayoutArgs, addr_hex, emit_json, offset_hex, parse_addr, parse_offset};
use crate::cmd::view::{HitboxJson, NodeJson, hex_bytes, hitbox_json, logic_node_json};

/// Record layout to decode.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum RecordKind {
	/// Discriminant-driven logic node; the position is the record end.
	Node,
	/// Hitbox record starting at the position.
	Hitbox,
	/// Fixed-shape scene header starting at the position.
	Header,
	/// Fixed-shape node without respawn slot starting at the position.
	NoHitbox,
}

#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("position").required(true).args(["addr", "offset"])))]
pub struct Args {
	pub path: PathBuf,
	#[arg(long, value_enum)]
	pub kind: RecordKind,
	/// Absolute address of the record position.
	#[arg(long)]
	pub addr: Option<String>,
	/// File offset of the record position.
	#[arg(long)]
	pub offset: Option<String>,
	#[command(flatten)]
	pub layout: LayoutArgs,
	#[arg(long)]
	pub json: bool,
}

/// Decode one record at an explicit position.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		kind,
		addr,
		offset,
		layout,
		json,
	} = args;
	let layout = layout.layout()?;
	let image = DumpImage::open(&path)?;
	let bytes = image.bytes();

	let position = match (addr, offset) {
		(Some(addr), _) => {
			let addr = parse_addr(&addr)?;
			layout.to_offset(addr).ok_or(DumpError::OutOfBounds { addr, need: 0 })?
		}
		(None, Some(offset)) => parse_offset(&offset)?,
		(None, None) => return Err(DumpError::MissingRecordPosition),
	};

	let payload = match kind {
		RecordKind::Node => RecordJson::Node(node_record(bytes, &layout, position)?),
		RecordKind::Hitbox => {
			let record = decode_hitbox(bytes, position)?;
			RecordJson::Hitbox(hitbox_json(&record, Some(position), Some(layout.to_address(position))))
		}
		RecordKind::Header => {
			let header = decode_header_record(bytes, position)?;
			RecordJson::Header(HeaderJson {
				offset: offset_hex(position),
				size: HEADER_RECORD_SIZE,
				frame_start: addr_hex(header.frame_start),
				frame_end: addr_hex(header.frame_end),
				ko_start: addr_hex(header.ko_start),
				ko_end: addr_hex(header.ko_end),
				unknown: header.unknown.iter().copied().map(addr_hex).collect(),
				fields: hex_bytes(&header.fields),
				score: header.score,
			})
		}
		RecordKind::NoHitbox => {
			let node = decode_no_hitbox_node(bytes, position)?;
			RecordJson::NoHitbox(NoHitboxJson {
				offset: offset_hex(position),
				size: NO_HITBOX_NODE_SIZE,
				next: addr_hex(node.next),
				frame_start: addr_hex(node.frame_start),
				frame_end: addr_hex(node.frame_end),
				hitbox_frame_start: addr_hex(node.hitbox_frame_start),
				hitbox_frame_end: addr_hex(node.hitbox_frame_end),
				hitbox: addr_hex(node.hitbox),
				fields: hex_bytes(&node.fields),
				marker: addr_hex(node.marker),
				callback: addr_hex(node.callback),
				init_struct: addr_hex(node.init_struct),
			})
		}
	};

	if json {
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("position: {}", offset_hex(position));
	match payload {
		RecordJson::Node(node) => {
			println!("shape: {}", node.shape);
			println!("offset: {}", node.offset);
			println!("addr: {}", node.addr);
			for field in &node.frame_fields {
				let frame = field.frame.map(|value| value.to_string()).unwrap_or_else(|| "-".to_owned());
				println!("{}: {} frame={}", field.slot, field.addr, frame);
			}
			println!("hitbox: {}", node.hitbox.as_deref().unwrap_or("-"));
			println!("type: {} {} {} {}", node.tail.type_a, node.tail.type_b, node.tail.type_chunk, node.tail.type_d);
			println!("callback: {}", node.tail.callback);
			println!("init_struct: {}", node.tail.init_struct);
			println!("hitboxes: {}", node.hitboxes.len());
			for hitbox in &node.hitboxes {
				print_hitbox(hitbox);
			}
			if let Some(issue) = &node.hitbox_issue {
				println!("hitbox_issue: {issue}");
			}
		}
		RecordJson::Hitbox(hitbox) => print_hitbox(&hitbox),
		RecordJson::Header(header) => {
			println!("frame: {}..{}", header.frame_start, header.frame_end);
			println!("ko: {}..{}", header.ko_start, header.ko_end);
			println!("unknown: {}", header.unknown.join(","));
			println!("fields: {}", header.fields);
			println!("score: {}", header.score);
		}
		RecordJson::NoHitbox(node) => {
			println!("next: {}", node.next);
			println!("frame: {}..{}", node.frame_start, node.frame_end);
			println!("hitbox_frame: {}..{}", node.hitbox_frame_start, node.hitbox_frame_end);
			println!("hitbox: {}", node.hitbox);
			println!("marker: {}", node.marker);
			println!("callback: {}", node.callback);
			println!("init_struct: {}", node.init_struct);
		}
	}

	Ok(())
}

fn node_record(bytes: &[u8], layout: &Layout, end: usize) -> Result<NodeJson> {
	let node = decode_node_at(bytes, end)?;
	let start = end - node.size();
	let frames = FrameIndex::build(&scan_frame_sequences(bytes));

	let mut out = logic_node_json(layout, &frames, start, &node);
	match resolve_hitbox_chain(bytes, layout, layout.to_address(start), node.hitbox_ptr()) {
		Ok(chain) => {
			out.hitboxes = chain
				.iter()
				.map(|entry| hitbox_json(&entry.record, Some(entry.offset), Some(entry.addr)))
				.collect();
		}
		Err(err) => out.hitbox_issue = Some(err.to_string()),
	}
	Ok(out)
}

fn print_hitbox(hitbox: &HitboxJson) {
	println!(
		"  {}\ty={}..{}\tx={}..{}\tscore={}\tnext={}",
		hitbox.addr.as_deref().unwrap_or("-"),
		hitbox.y0,
		hitbox.y1,
		hitbox.x0,
		hitbox.x1,
		hitbox.score,
		hitbox.next
	);
}

#[derive(serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RecordJson {
	Node(NodeJson),
	Hitbox(HitboxJson),
	Header(HeaderJson),
	NoHitbox(NoHitboxJson),
}

#[derive(serde::Serialize)]
struct HeaderJson {
	offset: String,
	size: usize,
	frame_start: String,
	frame_end: String,
	ko_start: String,
	ko_end: String,
	unknown: Vec<String>,
	fields: String,
	score: i32,
}

#[derive(serde::Serialize)]
struct NoHitboxJson {
	offset: String,
	size: usize,
	next: String,
	frame_start: String,
	frame_end: String,
	hitbox_frame_start: String,
	hitbox_frame_end: String,
	hitbox: String,
	fields: String,
	marker: String,
	callback: String,
	init_struct: String,
}
