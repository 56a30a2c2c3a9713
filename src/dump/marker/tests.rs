use zbscan_testkit::ImageBuilder;

use crate::dump::{FrameIndex, Layout, MARKER_SIZE, parse_marker, scan_frame_sequences};

#[test]
fn two_markers_then_junk_form_one_sequence() {
	let mut bytes = b"00100\0".to_vec();
	bytes.extend_from_slice(b"00101\0");
	bytes.extend_from_slice(b"wxyz");

	let sequences = scan_frame_sequences(&bytes);
	assert_eq!(sequences.len(), 1);
	assert_eq!(sequences[0].anchor(), 0);
	let values: Vec<u32> = sequences[0].markers().iter().map(|marker| marker.value).collect();
	assert_eq!(values, vec![100, 101]);
}

#[test]
fn single_marker_is_discarded() {
	let mut image = ImageBuilder::new(64);
	image.put_marker(8, 42);
	assert!(scan_frame_sequences(image.bytes()).is_empty());
}

#[test]
fn short_run_rewinds_and_later_run_is_found() {
	let mut image = ImageBuilder::new(96);
	image.put_marker(3, 7);
	image.put_bytes(9, b"ab");
	image.put_markers(40, &[10_548, 10_549, 10_550]);

	let sequences = scan_frame_sequences(image.bytes());
	assert_eq!(sequences.len(), 1);
	assert_eq!(sequences[0].anchor(), 40);
	assert_eq!(sequences[0].len(), 3);
}

#[test]
fn run_touching_end_of_buffer_is_kept() {
	let mut image = ImageBuilder::new(20);
	image.put_markers(8, &[1, 2]);
	let sequences = scan_frame_sequences(image.bytes());
	assert_eq!(sequences.len(), 1);
	assert_eq!(sequences[0].anchor(), 8);
}

#[test]
fn marker_requires_terminator_and_digits() {
	assert_eq!(parse_marker(b"12345\0", 0), Some(12_345));
	assert_eq!(parse_marker(b"12345x", 0), None);
	assert_eq!(parse_marker(b"12a45\0", 0), None);
	assert_eq!(parse_marker(b"1234", 0), None);
}

#[test]
fn sequences_are_contiguous_and_at_least_two_long() {
	// Deterministic noise biased towards digits and zero bytes.
	let mut state = 0x2545_f491_u32;
	let mut bytes = Vec::with_capacity(8192);
	for _ in 0..8192 {
		state ^= state << 13;
		state ^= state >> 17;
		state ^= state << 5;
		let byte = match state % 8 {
			0 | 1 => 0,
			2..=6 => b'0' + (state >> 8) as u8 % 10,
			_ => (state >> 16) as u8,
		};
		bytes.push(byte);
	}

	let sequences = scan_frame_sequences(&bytes);
	let mut last_end = 0;
	for sequence in &sequences {
		assert!(sequence.len() >= 2);
		assert!(sequence.anchor() >= last_end, "sequences are ordered and disjoint");
		for pair in sequence.markers().windows(2) {
			assert_eq!(pair[1].offset - pair[0].offset, MARKER_SIZE);
		}
		last_end = sequence.markers().last().map(|marker| marker.offset + MARKER_SIZE).unwrap_or(0);
	}
}

#[test]
fn frame_index_resolves_frame_pointers() {
	let mut image = ImageBuilder::new(64);
	image.put_markers(16, &[300, 301]);
	let layout = Layout::default();
	let index = FrameIndex::build(&scan_frame_sequences(image.bytes()));

	let hit = index.frame_ptr(&layout, image.addr(22));
	assert_eq!(hit.offset, Some(22));
	assert_eq!(hit.frame, Some(301));

	let miss = index.frame_ptr(&layout, image.addr(23));
	assert_eq!(miss.frame, None);

	let null = index.frame_ptr(&layout, 0);
	assert_eq!(null.offset, None);
	assert_eq!(null.frame, None);
}
