use std::path::PathBuf;

use zbscan::dump::{DumpImage, Result, analyze};

use crate::cmd::util::{LayoutArgs, addr_hex, addr_hex_opt, emit_json};
use crate::cmd::view::{PathJson, path_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub layout: LayoutArgs,
	/// Only report the chunk with this anchor-order index.
	#[arg(long)]
	pub chunk: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Enumerate playable animation paths per chunk.
pub fn run(args: Args) -> Result<()> {
	let Args { path, layout, chunk, json } = args;
	let layout = layout.layout()?;

	let image = DumpImage::open(&path)?;
	let analysis = analyze(&image, &layout);

	let selected: Vec<usize> = match chunk {
		Some(index) => vec![index],
		None => analysis.scene_ordered(),
	};

	let mut reports = Vec::with_capacity(selected.len());
	for index in selected {
		let paths = analysis.paths(index, &layout)?;
		reports.push((index, paths));
	}

	if json {
		let payload = PathsJson {
			path: path.display().to_string(),
			max_depth: layout.paths.max_depth,
			chunks: reports
				.iter()
				.map(|(index, paths)| ChunkPathsJson {
					id: *index,
					entry: analysis.chunks[*index].entry_addr().map(addr_hex),
					paths: paths.iter().map(path_json).collect(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("max_depth: {}", layout.paths.max_depth);
	for (index, paths) in &reports {
		println!("chunk {} (entry {}): {} paths", index, addr_hex_opt(analysis.chunks[*index].entry_addr()), paths.len());
		for (number, item) in paths.iter().enumerate() {
			let steps: Vec<String> = item
				.steps
				.iter()
				.map(|step| format!("{}[{}..{}]", addr_hex(step.addr), step.frame_start, step.frame_end))
				.collect();
			println!(
				"  {}\tframes={}\thitboxes={}\t{}",
				number,
				item.total_frames,
				item.total_hitboxes,
				steps.join(" -> ")
			);
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ChunkPathsJson {
	id: usize,
	entry: Option<String>,
	paths: Vec<PathJson>,
}

#[derive(serde::Serialize)]
struct PathsJson {
	path: String,
	max_depth: usize,
	chunks: Vec<ChunkPathsJson>,
}
