use zbscan_testkit::ImageBuilder;

use crate::dump::{DumpError, DumpImage, Layout, SceneTable, WalkStop, analyze};

fn scene_image() -> ImageBuilder {
	let mut image = ImageBuilder::new(1024);

	// Anchor too close to the image start for any record.
	image.put_markers(30, &[1, 2]);

	image.put_markers(300, &[100, 101, 102]);
	let node_a = [
		0,
		0,
		image.addr(300),
		image.addr(312),
		image.addr(300),
		image.addr(306),
		image.addr(400),
	];
	let a = image.put_node(300, 2, &node_a);
	image.put_hitbox(400, [10, 20, 30, 40], image.addr(440), 500);
	image.put_hitbox(440, [50, 60, 70, 80], 0, 250);

	let node_b = [image.addr(a), image.addr(300), image.addr(306), 0, 0];
	let b = image.put_node(a, 0, &node_b);
	image.put_u32(a - 4, 0x0004_8000);
	image.put_terminator(b);

	let spare = [0, image.addr(300), image.addr(312), 0, 0];
	image.put_node(700, 0, &spare);
	let table = [image.addr(a), 0, image.addr(700)];
	for (index, entry) in table.iter().enumerate() {
		image.put_u32(600 + index * 4, *entry);
	}
	image
}

#[test]
fn empty_image_yields_empty_analysis() {
	let analysis = analyze(&DumpImage::from_bytes(Vec::new()), &Layout::default());
	assert!(analysis.frame_sequences.is_empty());
	assert!(analysis.chunks.is_empty());
	assert!(analysis.failures.is_empty());
	assert!(analysis.scene_order.is_empty());
	assert!(analysis.spares.is_empty());
	assert_eq!(analysis.node_count(), 0);
}

#[test]
fn failed_walk_does_not_stop_other_chunks() {
	let image = scene_image();
	let layout = Layout {
		scene_table: Some(SceneTable { addr: image.addr(600), len: 3 }),
		..Layout::default()
	};
	let analysis = analyze(&DumpImage::from_bytes(image.bytes().to_vec()), &layout);

	assert_eq!(analysis.frame_sequences.len(), 2);
	assert_eq!(analysis.failures.len(), 1);
	assert_eq!(analysis.failures[0].anchor, 30);
	assert!(matches!(analysis.failures[0].error, DumpError::BelowBufferStart { .. }));

	assert_eq!(analysis.chunks.len(), 1);
	let chunk = analysis.chunk(0).expect("chunk exists");
	assert_eq!(chunk.nodes.len(), 2);
	assert_eq!(chunk.stop, WalkStop::Unknown(0xFF));
	assert_eq!(analysis.node_count(), 2);

	assert_eq!(analysis.scene_order, vec![image.addr(250), 0, image.addr(700)]);
	assert!(analysis.scene_order_error.is_none());
	assert_eq!(analysis.scene_ordered(), vec![0]);
	assert_eq!(analysis.spares.len(), 1);
	assert_eq!(analysis.spares[0].node.addr, image.addr(658));
	assert!(analysis.spare_failures.is_empty());
}

#[test]
fn default_layout_reads_no_scene_table() {
	let image = scene_image();
	assert!(Layout::default().scene_table.is_none());
	let analysis = analyze(&DumpImage::from_bytes(image.bytes().to_vec()), &Layout::default());

	assert_eq!(analysis.chunks.len(), 1);
	assert!(analysis.scene_order.is_empty());
	assert!(analysis.scene_order_error.is_none());
	assert!(analysis.spares.is_empty());
	assert_eq!(analysis.scene_ordered(), vec![0]);
}

#[test]
fn chunk_paths_aggregate_frames_and_hitboxes() {
	let image = scene_image();
	let layout = Layout::default();
	let analysis = analyze(&DumpImage::from_bytes(image.bytes().to_vec()), &layout);

	let paths = analysis.paths(0, &layout).expect("chunk exists");
	assert_eq!(paths.len(), 1);
	let addrs: Vec<u32> = paths[0].steps.iter().map(|step| step.addr).collect();
	assert_eq!(addrs, vec![image.addr(208), image.addr(250)]);
	assert_eq!(paths[0].total_frames, 5);
	assert_eq!(paths[0].total_hitboxes, 2);
	assert_eq!(paths[0].steps[1].hitboxes[0].frame_end, Some(101));

	let err = analysis.paths(1, &layout).expect_err("only one chunk");
	assert!(matches!(err, DumpError::ChunkOutOfRange { index: 1, count: 1 }));
}

#[test]
fn unreadable_scene_table_is_recorded() {
	let image = scene_image();
	let layout = Layout {
		scene_table: Some(SceneTable { addr: image.addr(1020), len: 8 }),
		..Layout::default()
	};
	let analysis = analyze(&DumpImage::from_bytes(image.bytes().to_vec()), &layout);
	assert!(analysis.scene_order.is_empty());
	assert!(matches!(analysis.scene_order_error, Some(DumpError::OutOfBounds { .. })));
	assert_eq!(analysis.chunks.len(), 1);
}
