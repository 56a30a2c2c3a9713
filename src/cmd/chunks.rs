use std::path::PathBuf;

use zbscan::dump::{DumpImage, Result, analyze, build_graph};

use crate::cmd::util::{LayoutArgs, addr_hex, addr_hex_opt, emit_json, offset_hex};
use crate::cmd::view::{ChunkJson, NodeJson, chunk_json, hitbox_issue_label, node_json, stop_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub layout: LayoutArgs,
	/// Only report the chunk with this anchor-order index.
	#[arg(long)]
	pub chunk: Option<usize>,
	/// List chunks in scene table order.
	#[arg(long = "scene-order")]
	pub scene_order: bool,
	#[arg(long)]
	pub json: bool,
}

/// Walk every anchor and print the recovered chunks.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		layout,
		chunk,
		scene_order,
		json,
	} = args;
	let layout = layout.layout()?;

	let image = DumpImage::open(&path)?;
	let analysis = analyze(&image, &layout);

	let selected: Vec<usize> = match chunk {
		Some(index) => {
			analysis.chunk(index)?;
			vec![index]
		}
		None if scene_order => analysis.scene_ordered(),
		None => (0..analysis.chunks.len()).collect(),
	};

	if json {
		let payload = ChunksJson {
			path: path.display().to_string(),
			chunks: selected
				.iter()
				.map(|&index| {
					let chunk = &analysis.chunks[index];
					chunk_json(&layout, &analysis.frames, index, chunk, build_graph(&chunk.nodes).stats(layout.paths.max_depth))
				})
				.collect(),
			failures: analysis
				.failures
				.iter()
				.map(|failure| FailureJson {
					at: offset_hex(failure.anchor),
					error: failure.error.to_string(),
				})
				.collect(),
			scene_order: analysis.scene_order.iter().copied().map(addr_hex).collect(),
			scene_order_error: analysis.scene_order_error.as_ref().map(ToString::to_string),
			spares: analysis
				.spares
				.iter()
				.map(|spare| SpareJson {
					entry: addr_hex(spare.entry),
					node: node_json(&layout, &analysis.frames, &spare.node),
				})
				.collect(),
			spare_failures: analysis
				.spare_failures
				.iter()
				.map(|failure| FailureJson {
					at: addr_hex(failure.entry),
					error: failure.error.to_string(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("chunks: {}", analysis.chunks.len());
	println!("id\tanchor\tentry\tnodes\tedges\tdag\tcycles\tstop");
	for &index in &selected {
		let chunk = &analysis.chunks[index];
		let stats = build_graph(&chunk.nodes).stats(layout.paths.max_depth);
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
			index,
			offset_hex(chunk.sequence.anchor()),
			addr_hex_opt(chunk.entry_addr()),
			chunk.nodes.len(),
			stats.edges,
			stats.is_dag,
			stats.cycles,
			stop_label(chunk.stop)
		);
	}

	if chunk.is_some() {
		for &index in &selected {
			println!("nodes:");
			println!("offset\taddr\tshape\thitboxes\tsuccessors\trespawn");
			for item in &analysis.chunks[index].nodes {
				let successors: Vec<String> = item.node.successors().into_iter().map(addr_hex).collect();
				let hitboxes = match item.hitbox_issue {
					Some(issue) => hitbox_issue_label(issue),
					None => item.hitboxes.len().to_string(),
				};
				println!(
					"{}\t{}\t{}\t{}\t{}\t{}",
					offset_hex(item.offset),
					addr_hex(item.addr),
					item.node.shape().label(),
					hitboxes,
					if successors.is_empty() { "-".to_owned() } else { successors.join(",") },
					addr_hex_opt(item.node.respawn())
				);
			}
		}
	}

	println!("failures: {}", analysis.failures.len());
	for failure in &analysis.failures {
		println!("  {}: {}", offset_hex(failure.anchor), failure.error);
	}
	println!("spares: {}", analysis.spares.len());
	for spare in &analysis.spares {
		println!("  {} -> {} {}", addr_hex(spare.entry), addr_hex(spare.node.addr), spare.node.node.shape().label());
	}
	for failure in &analysis.spare_failures {
		println!("  {}: {}", addr_hex(failure.entry), failure.error);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct FailureJson {
	at: String,
	error: String,
}

#[derive(serde::Serialize)]
struct SpareJson {
	entry: String,
	node: NodeJson,
}

#[derive(serde::Serialize)]
struct ChunksJson {
	path: String,
	chunks: Vec<ChunkJson>,
	failures: Vec<FailureJson>,
	scene_order: Vec<String>,
	scene_order_error: Option<String>,
	spares: Vec<SpareJson>,
	spare_failures: Vec<FailureJson>,
}
