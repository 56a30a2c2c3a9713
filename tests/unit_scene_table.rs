#![allow(missing_docs)]

use zbscan::dump::{DumpImage, Layout, SceneTable, analyze};
use zbscan_testkit::{sample, sample_scene};

fn scene_layout(image: &zbscan_testkit::ImageBuilder) -> Layout {
	Layout {
		scene_table: Some(SceneTable {
			addr: image.addr(sample::SCENE_TABLE),
			len: 2,
		}),
		..Layout::default()
	}
}

#[test]
fn table_entries_outside_walks_become_spares() {
	let image = sample_scene();
	let layout = scene_layout(&image);
	let analysis = analyze(&DumpImage::from_bytes(image.bytes().to_vec()), &layout);

	assert_eq!(analysis.scene_order, vec![image.addr(sample::NODES[0]), image.addr(sample::SPARE_END)]);
	assert_eq!(analysis.spares.len(), 1);
	assert_eq!(analysis.spares[0].entry, image.addr(sample::SPARE_END));
	assert_eq!(analysis.spares[0].node.offset, sample::SPARE_END - 42);
	assert!(analysis.spare_failures.is_empty());
	assert_eq!(analysis.scene_ordered(), vec![0]);
}

#[test]
fn spare_frame_fields_resolve_against_all_markers() {
	let image = sample_scene();
	let layout = scene_layout(&image);
	let analysis = analyze(&DumpImage::from_bytes(image.bytes().to_vec()), &layout);

	let spare = &analysis.spares[0].node.node;
	let frames: Vec<Option<u32>> = spare
		.frame_slots()
		.map(|(_, addr)| analysis.frames.frame_ptr(&layout, addr).frame)
		.collect();
	assert_eq!(frames, vec![None, Some(200), Some(210), None, None]);
}
