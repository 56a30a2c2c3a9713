use zbscan_testkit::{ImageBuilder, node_size};

use crate::dump::{
	Discriminant, DumpError, HITBOX_SIZE, HitboxRecord, LogicNode, NodeShape, NodeTail, Slot, decode_hitbox, decode_node, decode_node_at, probe_discriminant,
};

#[test]
fn zeroed_type0_record_has_no_hitbox() {
	let mut image = ImageBuilder::new(128);
	image.put_node(100, 0, &[0; 5]);

	let probe = probe_discriminant(image.bytes(), 100).expect("probe succeeds");
	let Discriminant::Shape(shape) = probe else {
		panic!("expected trusted shape, got {probe:?}");
	};
	assert_eq!(shape.type_chunk(), 0);

	let node = decode_node(image.bytes(), 100, shape).expect("decode succeeds");
	assert_eq!(node.size(), 42);
	assert_eq!(node.hitbox_ptr(), 0);
	assert!(node.successors().is_empty());
	assert_eq!(node.respawn(), None);
}

#[test]
fn shape_sizes_follow_leading_count() {
	for shape in NodeShape::ALL {
		let k = usize::from(shape.type_chunk());
		assert_eq!(shape.leading_count(), k + 5);
		assert_eq!(shape.size(), 22 + 4 * (k + 5));
		assert_eq!(shape.size(), node_size(shape.type_chunk()));
		assert_eq!(shape.slots().len(), shape.leading_count());
		assert_eq!(shape.has_hitbox(), shape.slots().last() == Some(&Slot::Hitbox));
	}
}

#[test]
fn every_shape_re_encodes_to_identical_fields() {
	for shape in NodeShape::ALL {
		let leading: Vec<u32> = (0..shape.leading_count() as u32).map(|index| 0x0004_0000 + index * 0x10).collect();
		let tail = NodeTail {
			fields: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
			type_a: 0x20,
			type_b: 0x02,
			type_chunk: shape.type_chunk(),
			type_d: 0x11,
			callback: 0x0001_2345,
			init_struct: 0x0004_8000,
		};
		let node = LogicNode::new(shape, leading, tail).expect("leading count matches");

		let mut bytes = vec![0xEE_u8; 8];
		bytes.extend_from_slice(&node.to_bytes());
		let end = bytes.len();
		assert_eq!(end - 8, shape.size(), "encoded length for {}", shape.label());

		let decoded = decode_node_at(&bytes, end).expect("decode succeeds");
		assert_eq!(decoded, node);
		assert_eq!(decoded.to_bytes(), node.to_bytes());
	}
}

#[test]
fn hitbox_pointer_is_last_leading_slot_from_shape_two() {
	let mut image = ImageBuilder::new(256);
	let leading = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x0004_1234];
	image.put_node(200, 2, &leading);

	let node = decode_node_at(image.bytes(), 200).expect("decode succeeds");
	assert_eq!(node.hitbox_ptr(), 0x0004_1234);
	assert_eq!(node.respawn(), Some(0x10));
	assert_eq!(node.successors(), vec![0x20]);
	assert_eq!(node.slot(Slot::FrameStart), Some(0x30));
	assert_eq!(node.frame_slots().count(), 6);
}

#[test]
fn shape_one_link_is_a_successor_and_no_hitbox() {
	let mut image = ImageBuilder::new(128);
	image.put_node(100, 1, &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

	let node = decode_node_at(image.bytes(), 100).expect("decode succeeds");
	assert_eq!(node.hitbox_ptr(), 0);
	assert_eq!(node.successors(), vec![0x11, 0x66]);
	assert_eq!(node.slot(Slot::Respawn), None);
}

#[test]
fn discriminant_bands() {
	assert!(matches!(Discriminant::classify(6), Discriminant::Shape(_)));
	assert_eq!(Discriminant::classify(7), Discriminant::NearMiss(7));
	assert_eq!(Discriminant::classify(9), Discriminant::NearMiss(9));
	assert_eq!(Discriminant::classify(10), Discriminant::Unknown(10));
	assert_eq!(Discriminant::classify(0xFF), Discriminant::Unknown(0xFF));
}

#[test]
fn untrusted_discriminant_is_rejected_by_decode_node_at() {
	let mut image = ImageBuilder::new(64);
	image.put_tail(40, 8);
	let err = decode_node_at(image.bytes(), 40).expect_err("near miss is not decoded");
	assert!(matches!(err, DumpError::UnknownShape { type_chunk: 8, offset: 40 }));
}

#[test]
fn record_reaching_before_buffer_start_fails() {
	let mut image = ImageBuilder::new(64);
	image.put_tail(30, 6);
	let err = decode_node_at(image.bytes(), 30).expect_err("type 6 needs 66 bytes");
	assert!(matches!(err, DumpError::BelowBufferStart { cursor: 30, need: 66 }));

	let err = probe_discriminant(image.bytes(), 10).expect_err("tail does not fit");
	assert!(matches!(err, DumpError::BelowBufferStart { cursor: 10, need: 22 }));
}

#[test]
fn hitbox_record_decodes_and_encodes() {
	let mut image = ImageBuilder::new(64);
	image.put_hitbox(8, [34, 73, -54, 122], 0x0004_0000, 500);

	let hitbox = decode_hitbox(image.bytes(), 8).expect("decode succeeds");
	assert_eq!(
		hitbox,
		HitboxRecord {
			y0: 34,
			y1: 73,
			x0: -54,
			x1: 122,
			next: 0x0004_0000,
			score: 500,
		}
	);
	assert_eq!(hitbox.to_bytes().as_slice(), &image.bytes()[8..8 + HITBOX_SIZE]);

	let err = decode_hitbox(image.bytes(), 50).expect_err("record overruns image");
	assert!(matches!(err, DumpError::UnexpectedEof { .. }));
}
