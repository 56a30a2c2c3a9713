#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "zbscan", about = "Logic-node graph recovery from big-endian memory dumps")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Image-level scan and walk statistics.
	Info(cmd::info::Args),
	/// Frame marker runs.
	Markers(cmd::markers::Args),
	/// Chunks recovered by anchored walks.
	Chunks(cmd::chunks::Args),
	/// Playable animation paths.
	Paths(cmd::paths::Args),
	/// Decode one record at an explicit position.
	Record(cmd::record::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();
}

fn run() -> zbscan::dump::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Markers(args) => cmd::markers::run(args),
		Commands::Chunks(args) => cmd::chunks::run(args),
		Commands::Paths(args) => cmd::paths::run(args),
		Commands::Record(args) => cmd::record::run(args),
	}
}
