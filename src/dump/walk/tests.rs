use zbscan_testkit::ImageBuilder;

use crate::dump::{DumpError, HitboxIssue, Layout, WalkStop, resume_offset, scan_frame_sequences, walk_chunk};

const ANCHOR: usize = 300;
const NODE_A_START: usize = 250;
const NODE_B_START: usize = 208;
const HITBOX_ONE: usize = 400;
const HITBOX_TWO: usize = 440;

/// Two-node chain: a type-2 node with a two-record hitbox list, preceded by a type-0 node.
fn chain_image(b_init_struct: u32) -> ImageBuilder {
	let mut image = ImageBuilder::new(512);
	image.put_markers(ANCHOR, &[100, 101, 102]);

	let node_a = [
		0,
		image.addr(NODE_B_START),
		image.addr(ANCHOR),
		image.addr(ANCHOR + 12),
		image.addr(ANCHOR),
		image.addr(ANCHOR + 6),
		image.addr(HITBOX_ONE),
	];
	assert_eq!(image.put_node(ANCHOR, 2, &node_a), NODE_A_START);
	image.put_hitbox(HITBOX_ONE, [10, 20, 30, 40], image.addr(HITBOX_TWO), 500);
	image.put_hitbox(HITBOX_TWO, [50, 60, 70, 80], 0, 250);

	let node_b = [image.addr(NODE_A_START), image.addr(ANCHOR), image.addr(ANCHOR + 6), 0, 0];
	assert_eq!(image.put_node(NODE_A_START, 0, &node_b), NODE_B_START);
	image.put_u32(NODE_A_START - 4, b_init_struct);
	image.put_terminator(NODE_B_START);
	image
}

#[test]
fn walk_decodes_chain_until_unknown_discriminant() {
	let image = chain_image(0x0004_8000);
	let sequences = scan_frame_sequences(image.bytes());
	assert_eq!(sequences.len(), 1);

	let chunk = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 2);
	assert_eq!(chunk.nodes[0].offset, NODE_A_START);
	assert_eq!(chunk.nodes[0].addr, image.addr(NODE_A_START));
	assert_eq!(chunk.nodes[0].node.shape().type_chunk(), 2);
	assert_eq!(chunk.nodes[0].hitboxes.len(), 2);
	assert_eq!(chunk.nodes[0].hitboxes[1].record.score, 250);
	assert_eq!(chunk.nodes[1].offset, NODE_B_START);
	assert!(chunk.nodes[1].hitboxes.is_empty());
	assert_eq!(chunk.start, NODE_B_START);
	assert_eq!(chunk.stop, WalkStop::Unknown(0xFF));
	assert_eq!(chunk.first_addr(), Some(image.addr(NODE_A_START)));
	assert_eq!(chunk.entry_addr(), Some(image.addr(NODE_B_START)));
}

#[test]
fn non_address_word_moves_cursor_to_last_hitbox() {
	let mut image = chain_image(0x0000_1234);
	// Discriminant byte of the tail that would end at the last hitbox record.
	image.put_bytes(HITBOX_TWO - 22 + 12, &[0xFF]);
	let sequences = scan_frame_sequences(image.bytes());

	let chunk = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 1);
	assert_eq!(chunk.start, HITBOX_TWO);
	assert_eq!(chunk.stop, WalkStop::Unknown(0xFF));

	let mut layout = Layout::default();
	layout.walk.boundary_correction = false;
	let chunk = walk_chunk(image.bytes(), &layout, &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 2);
	assert_eq!(chunk.start, NODE_B_START);
}

#[test]
fn near_miss_discriminant_stops_walk() {
	let mut image = chain_image(0x0004_8000);
	image.put_tail(NODE_B_START, 8);
	let sequences = scan_frame_sequences(image.bytes());

	let chunk = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 2);
	assert_eq!(chunk.stop, WalkStop::NearMiss(8));
}

#[test]
fn broken_hitbox_head_is_scoped_to_its_node() {
	let mut image = chain_image(0x0004_8000);
	let bad = image.addr(510);
	image.put_u32(ANCHOR - 22 - 4, bad);
	let sequences = scan_frame_sequences(image.bytes());

	let chunk = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 2);
	assert!(chunk.nodes[0].hitboxes.is_empty());
	assert_eq!(chunk.nodes[0].hitbox_issue, Some(HitboxIssue::HeadOutOfBounds(bad)));
}

#[test]
fn corrupt_hitbox_link_keeps_node_and_skips_correction() {
	let mut image = chain_image(0x0000_1234);
	let bad = image.addr(2000);
	image.put_hitbox(HITBOX_TWO, [50, 60, 70, 80], bad, 250);
	let sequences = scan_frame_sequences(image.bytes());

	let chunk = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 2);
	assert!(chunk.nodes[0].hitboxes.is_empty());
	assert_eq!(chunk.nodes[0].hitbox_issue, Some(HitboxIssue::ChainCorrupt(bad)));
	assert_eq!(chunk.nodes[1].offset, NODE_B_START);
	assert_eq!(chunk.start, NODE_B_START);
	assert_eq!(chunk.stop, WalkStop::Unknown(0xFF));
}

#[test]
fn cyclic_hitbox_list_keeps_node_and_skips_correction() {
	let mut image = chain_image(0x0000_1234);
	let first = image.addr(HITBOX_ONE);
	image.put_hitbox(HITBOX_TWO, [50, 60, 70, 80], first, 250);
	let sequences = scan_frame_sequences(image.bytes());

	let chunk = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 2);
	assert!(chunk.nodes[0].hitboxes.is_empty());
	assert_eq!(chunk.nodes[0].hitbox_issue, Some(HitboxIssue::Cycle(first)));
	assert!(chunk.nodes[1].hitbox_issue.is_none());
	assert_eq!(chunk.start, NODE_B_START);
}

#[test]
fn walk_reaching_image_start_is_an_error() {
	let mut image = ImageBuilder::new(64);
	image.put_markers(30, &[1, 2]);
	let sequences = scan_frame_sequences(image.bytes());

	let err = walk_chunk(image.bytes(), &Layout::default(), &sequences[0]).expect_err("record crosses image start");
	assert!(matches!(err, DumpError::BelowBufferStart { cursor: 30, need: 42 }));
}

#[test]
fn record_budget_stops_walk() {
	let image = chain_image(0x0004_8000);
	let sequences = scan_frame_sequences(image.bytes());
	let mut layout = Layout::default();
	layout.walk.max_records = 1;

	let chunk = walk_chunk(image.bytes(), &layout, &sequences[0]).expect("walk succeeds");
	assert_eq!(chunk.nodes.len(), 1);
	assert_eq!(chunk.stop, WalkStop::MaxRecords);
}

#[test]
fn resume_offset_only_moves_without_plausible_address() {
	let mut image = ImageBuilder::new(64);
	image.put_u32(16, 0x0004_0000);
	image.put_u32(36, 0x0000_ffff);

	assert_eq!(resume_offset(image.bytes(), 20, Some(48)), 20);
	assert_eq!(resume_offset(image.bytes(), 40, Some(48)), 48);
	assert_eq!(resume_offset(image.bytes(), 40, None), 40);
	assert_eq!(resume_offset(image.bytes(), 2, Some(48)), 2);
}
