use std::path::PathBuf;

use zbscan::dump::{DumpImage, NodeShape, Result, analyze};

use crate::cmd::util::{LayoutArgs, addr_hex, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub layout: LayoutArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print image-level scan and walk statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, layout, json } = args;
	let layout = layout.layout()?;

	let image = DumpImage::open(&path)?;
	let analysis = analyze(&image, &layout);

	let mut shapes = [0_usize; NodeShape::ALL.len()];
	for item in analysis.chunks.iter().flat_map(|chunk| chunk.nodes.iter()) {
		shapes[usize::from(item.node.shape().type_chunk())] += 1;
	}
	let markers: usize = analysis.frame_sequences.iter().map(|sequence| sequence.len()).sum();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: image.compression.as_str().to_owned(),
			image_len: image.len(),
			bias: addr_hex(layout.bias),
			frame_sequences: analysis.frame_sequences.len(),
			markers,
			chunks: analysis.chunks.len(),
			failed_chunks: analysis.failures.len(),
			nodes: analysis.node_count(),
			shapes: NodeShape::ALL
				.iter()
				.map(|shape| ShapeCountJson {
					shape: shape.label(),
					count: shapes[usize::from(shape.type_chunk())],
				})
				.collect(),
			scene_order: analysis.scene_order.len(),
			spares: analysis.spares.len(),
			spare_failures: analysis.spare_failures.len(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("compression: {}", image.compression.as_str());
	println!("image_len: {}", image.len());
	println!("bias: {}", addr_hex(layout.bias));
	println!("frame_sequences: {}", analysis.frame_sequences.len());
	println!("markers: {markers}");
	println!("chunks: {}", analysis.chunks.len());
	println!("failed_chunks: {}", analysis.failures.len());
	println!("nodes: {}", analysis.node_count());
	println!("shapes:");
	for shape in NodeShape::ALL {
		println!("  {}: {}", shape.label(), shapes[usize::from(shape.type_chunk())]);
	}
	println!("scene_order: {}", analysis.scene_order.len());
	println!("spares: {}", analysis.spares.len());
	println!("spare_failures: {}", analysis.spare_failures.len());
	if let Some(error) = &analysis.scene_order_error {
		println!("scene_order_error: {error}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ShapeCountJson {
	shape: String,
	count: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: String,
	image_len: usize,
	bias: String,
	frame_sequences: usize,
	markers: usize,
	chunks: usize,
	failed_chunks: usize,
	nodes: usize,
	shapes: Vec<ShapeCountJson>,
	scene_order: usize,
	spares: usize,
	spare_failures: usize,
}
