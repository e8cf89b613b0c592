//! End-to-end pipeline tests over real PNG files on disk.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tilemerge::codec::PngCodec;
use tilemerge::pipeline::{merge_directory, MergeError, MergeOptions};

fn write_tile(dir: &Path, zoom: u32, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    image
        .save(dir.join(format!("{}x{}x{}.png", zoom, x, y)))
        .unwrap();
}

#[test]
fn merges_variable_size_pyramid_end_to_end() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    // Zoom 1: a single tile.
    write_tile(input.path(), 1, 0, 0, 32, 32, [200, 0, 0, 255]);

    // Zoom 2: a 2×2 grid with per-row and per-column sizes.
    write_tile(input.path(), 2, 0, 0, 64, 64, [255, 0, 0, 255]);
    write_tile(input.path(), 2, 1, 0, 32, 64, [0, 255, 0, 255]);
    write_tile(input.path(), 2, 0, 1, 64, 48, [0, 0, 255, 255]);
    write_tile(input.path(), 2, 1, 1, 32, 48, [255, 255, 0, 255]);

    // Decoration that discovery must ignore.
    fs::write(input.path().join("readme.txt"), b"tiles").unwrap();
    fs::write(input.path().join("preview.png"), b"not a tile name").unwrap();

    let options = MergeOptions::new(output.path());
    let written = merge_directory(input.path(), &PngCodec::new(), &options).unwrap();

    assert_eq!(
        written,
        vec![
            output.path().join("tile1.png"),
            output.path().join("tile2.png"),
        ]
    );

    let zoom1 = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!((zoom1.width(), zoom1.height()), (32, 32));
    assert_eq!(*zoom1.get_pixel(31, 31), Rgba([200, 0, 0, 255]));

    let zoom2 = image::open(&written[1]).unwrap().to_rgba8();
    assert_eq!((zoom2.width(), zoom2.height()), (96, 112));

    // One probe inside each tile's region.
    assert_eq!(*zoom2.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    assert_eq!(*zoom2.get_pixel(95, 0), Rgba([0, 255, 0, 255]));
    assert_eq!(*zoom2.get_pixel(0, 111), Rgba([0, 0, 255, 255]));
    assert_eq!(*zoom2.get_pixel(95, 111), Rgba([255, 255, 0, 255]));

    // And the exact boundaries: the last green column and first yellow row.
    assert_eq!(*zoom2.get_pixel(64, 63), Rgba([0, 255, 0, 255]));
    assert_eq!(*zoom2.get_pixel(64, 64), Rgba([255, 255, 0, 255]));
}

#[test]
fn merged_output_round_trips_through_codec() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    // Patterned tiles so a re-decode catches any byte-level difference.
    for (x, y) in [(0u32, 0u32), (1, 0), (0, 1), (1, 1)] {
        let image = RgbaImage::from_fn(16, 16, |u, v| {
            Rgba([u as u8 * 16, v as u8 * 16, (x + y * 2) as u8 * 60, 255])
        });
        image
            .save(input.path().join(format!("1x{}x{}.png", x, y)))
            .unwrap();
    }

    let options = MergeOptions::new(output.path());
    let written = merge_directory(input.path(), &PngCodec::new(), &options).unwrap();
    assert_eq!(written.len(), 1);

    let first = image::open(&written[0]).unwrap().to_rgba8();
    let second = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!((first.width(), first.height()), (32, 32));

    // Spot-check a pixel from the (1, 1) tile's region.
    assert_eq!(*first.get_pixel(17, 17), Rgba([16, 16, 180, 255]));
}

#[test]
fn interior_gap_is_transparent_in_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_tile(input.path(), 2, 0, 0, 16, 16, [1, 1, 1, 255]);
    write_tile(input.path(), 2, 1, 0, 16, 16, [2, 2, 2, 255]);
    write_tile(input.path(), 2, 0, 1, 16, 16, [3, 3, 3, 255]);
    // (1, 1) intentionally missing.

    let options = MergeOptions::new(output.path());
    let written = merge_directory(input.path(), &PngCodec::new(), &options).unwrap();

    let merged = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(*merged.get_pixel(20, 20), Rgba([0, 0, 0, 0]));
    assert_eq!(*merged.get_pixel(15, 15), Rgba([1, 1, 1, 255]));
}

#[test]
fn zoom_filter_processes_only_requested_level() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_tile(input.path(), 1, 0, 0, 8, 8, [1, 1, 1, 255]);
    write_tile(input.path(), 2, 0, 0, 8, 8, [2, 2, 2, 255]);

    let options = MergeOptions::new(output.path()).with_zoom(1);
    let written = merge_directory(input.path(), &PngCodec::new(), &options).unwrap();

    assert_eq!(written, vec![output.path().join("tile1.png")]);
    assert!(!output.path().join("tile2.png").exists());
}

#[test]
fn failed_zoom_level_leaves_no_partial_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    // Zoom 2 has an undecodable tile; the run must abort without writing
    // anything for that level.
    write_tile(input.path(), 2, 0, 0, 8, 8, [1, 1, 1, 255]);
    fs::write(input.path().join("2x1x0.png"), b"corrupt").unwrap();

    let options = MergeOptions::new(output.path());
    let result = merge_directory(input.path(), &PngCodec::new(), &options);

    assert!(matches!(result, Err(MergeError::Load { zoom: 2, .. })));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}
