use std::io::Write;

use zbscan::dump::{DumpError, Layout, Result, SceneTable};

/// Layout overrides shared by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LayoutArgs {
	/// Address bias added to file offsets.
	#[arg(long)]
	pub bias: Option<String>,
	/// Scene order table as `ADDR:LEN`.
	#[arg(long = "scene-table")]
	pub scene_table: Option<String>,
	/// Maximum edges per enumerated path.
	#[arg(long = "max-depth")]
	pub max_depth: Option<usize>,
	/// Maximum records decoded from one anchor.
	#[arg(long = "max-records")]
	pub max_records: Option<usize>,
	/// Always continue from the record start after a hitbox list.
	#[arg(long = "no-boundary-correction")]
	pub no_boundary_correction: bool,
}

impl LayoutArgs {
	/// Apply the overrides on top of the default layout.
	pub(crate) fn layout(&self) -> Result<Layout> {
		let mut layout = Layout::default();
		if let Some(bias) = &self.bias {
			layout.bias = parse_addr(bias)?;
		}
		if let Some(table) = &self.scene_table {
			layout.scene_table = Some(parse_scene_table(table)?);
		}
		if let Some(max_depth) = self.max_depth {
			layout.paths.max_depth = max_depth;
		}
		if let Some(max_records) = self.max_records {
			layout.walk.max_records = max_records;
		}
		layout.walk.boundary_correction = !self.no_boundary_correction;
		Ok(layout)
	}
}

/// Parse decimal or `0x`-prefixed hex 32-bit address literal.
pub(crate) fn parse_addr(value: &str) -> Result<u32> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		u32::from_str_radix(stripped, 16)
	} else {
		value.parse::<u32>()
	};

	parsed.map_err(|_| DumpError::InvalidAddressLiteral { value: value.to_owned() })
}

/// Parse a decimal or `0x`-prefixed hex file offset.
pub(crate) fn parse_offset(value: &str) -> Result<usize> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		usize::from_str_radix(stripped, 16)
	} else {
		value.parse::<usize>()
	};

	parsed.map_err(|_| DumpError::InvalidOffsetLiteral { value: value.to_owned() })
}

/// Parse `ADDR:LEN` scene table location.
pub(crate) fn parse_scene_table(value: &str) -> Result<SceneTable> {
	let invalid = || DumpError::InvalidSceneTable { value: value.to_owned() };
	let (addr, len) = value.split_once(':').ok_or_else(invalid)?;
	let addr = parse_addr(addr).map_err(|_| invalid())?;
	let len = parse_addr(len).map_err(|_| invalid())?;
	if addr == 0 || len == 0 {
		return Err(invalid());
	}
	Ok(SceneTable { addr, len: len as usize })
}

/// Render address as fixed-width hex.
pub(crate) fn addr_hex(addr: u32) -> String {
	format!("0x{addr:08x}")
}

/// Render file offset as fixed-width hex.
pub(crate) fn offset_hex(offset: usize) -> String {
	format!("0x{offset:08x}")
}

/// Render optional address, `-` when absent.
pub(crate) fn addr_hex_opt(addr: Option<u32>) -> String {
	addr.map(addr_hex).unwrap_or_else(|| "-".to_owned())
}

/// Write pretty JSON to stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let mut out = std::io::stdout().lock();
	serde_json::to_writer_pretty(&mut out, payload).map_err(std::io::Error::from)?;
	writeln!(out)?;
	Ok(())
}
