use std::path::PathBuf;

use zbscan::dump::{DumpImage, Result, scan_frame_sequences};

use crate::cmd::util::{LayoutArgs, addr_hex, emit_json, offset_hex};
use crate::cmd::view::{SequenceJson, sequence_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub layout: LayoutArgs,
	#[arg(long)]
	pub json: bool,
}

/// List frame marker runs in offset order.
pub fn run(args: Args) -> Result<()> {
	let Args { path, layout, json } = args;
	let layout = layout.layout()?;

	let image = DumpImage::open(&path)?;
	let sequences = scan_frame_sequences(image.bytes());

	if json {
		let payload = MarkersJson {
			path: path.display().to_string(),
			sequences: sequences.iter().map(|sequence| sequence_json(&layout, sequence)).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("sequences: {}", sequences.len());
	println!("idx\tanchor\taddr\tlen\tframes");
	for (index, sequence) in sequences.iter().enumerate() {
		let values: Vec<String> = sequence.markers().iter().map(|marker| marker.value.to_string()).collect();
		println!(
			"{}\t{}\t{}\t{}\t{}",
			index,
			offset_hex(sequence.anchor()),
			addr_hex(layout.to_address(sequence.anchor())),
			sequence.len(),
			values.join(",")
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct MarkersJson {
	path: String,
	sequences: Vec<SequenceJson>,
}
