//! Grid composition: merging one zoom level's tiles into a canvas.
//!
//! Tiles form a sparse rectangular grid addressed by (x, y), (0, 0) at
//! the top-left. Tiles are not assumed to share one global size, but the
//! grid must be separable: every tile in row y has the height of the
//! reference tile at (0, y), and every tile in column x has the width of
//! the reference tile at (x, 0). Extents are computed from those
//! reference tiles, so a missing reference tile is fatal for the zoom
//! level. Interior gaps are filled with [`BLANK`].
//!
//! Composition copies pixel data scanline-by-scanline: each source row is
//! one contiguous `copy_from_slice` into the strided canvas buffer.

use crate::coord::Coordinate;
use crate::tileset::DecodedTile;
use image::{Rgba, RgbaImage};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Fill for grid cells with no tile: fully transparent black.
pub const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Errors computing or filling a zoom level's canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A tile required for extent computation is absent.
    ///
    /// Row heights come from column 0 and column widths from row 0, so
    /// every (x, 0) and (0, y) cell inside the grid extents must exist.
    MissingReferenceTile { x: u32, y: u32 },
    /// A tile's width differs from its column's reference width.
    InconsistentTileWidth {
        coord: Coordinate,
        actual: u32,
        expected: u32,
        reference: Coordinate,
    },
    /// A tile's height differs from its row's reference height.
    InconsistentTileHeight {
        coord: Coordinate,
        actual: u32,
        expected: u32,
        reference: Coordinate,
    },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::MissingReferenceTile { x, y } => {
                write!(f, "missing reference tile at ({}, {})", x, y)
            }
            ComposeError::InconsistentTileWidth {
                coord,
                actual,
                expected,
                reference,
            } => write!(
                f,
                "tile {} is {} pixels wide but its column reference {} is {}",
                coord, actual, reference, expected
            ),
            ComposeError::InconsistentTileHeight {
                coord,
                actual,
                expected,
                reference,
            } => write!(
                f,
                "tile {} is {} pixels tall but its row reference {} is {}",
                coord, actual, reference, expected
            ),
        }
    }
}

impl std::error::Error for ComposeError {}

/// Merges one zoom level's decoded tiles into a single RGBA canvas.
///
/// Canvas width is the sum of the reference-row tile widths and canvas
/// height the sum of the reference-column tile heights, covering
/// columns `0..=max_x` and rows `0..=max_y` of the coordinates present.
/// An empty tile set reports the (0, 0) reference tile as missing.
pub fn compose(tiles: &[DecodedTile]) -> Result<RgbaImage, ComposeError> {
    let grid: BTreeMap<Coordinate, &DecodedTile> = tiles
        .iter()
        .map(|t| (t.descriptor.key.coord, t))
        .collect();

    let max_x = grid.keys().map(|c| c.x).max().unwrap_or(0);
    let max_y = grid.keys().map(|c| c.y).max().unwrap_or(0);

    // Column widths from the reference row (y = 0).
    let mut col_widths = Vec::with_capacity(max_x as usize + 1);
    for x in 0..=max_x {
        let tile = grid
            .get(&Coordinate::new(x, 0))
            .ok_or(ComposeError::MissingReferenceTile { x, y: 0 })?;
        col_widths.push(tile.width());
    }

    // Row heights from the reference column (x = 0).
    let mut row_heights = Vec::with_capacity(max_y as usize + 1);
    for y in 0..=max_y {
        let tile = grid
            .get(&Coordinate::new(0, y))
            .ok_or(ComposeError::MissingReferenceTile { x: 0, y })?;
        row_heights.push(tile.height());
    }

    // The extent math above only holds if the grid is separable; check it
    // up front instead of producing a corrupt canvas.
    for (coord, tile) in &grid {
        let expected_width = col_widths[coord.x as usize];
        if tile.width() != expected_width {
            return Err(ComposeError::InconsistentTileWidth {
                coord: *coord,
                actual: tile.width(),
                expected: expected_width,
                reference: Coordinate::new(coord.x, 0),
            });
        }
        let expected_height = row_heights[coord.y as usize];
        if tile.height() != expected_height {
            return Err(ComposeError::InconsistentTileHeight {
                coord: *coord,
                actual: tile.height(),
                expected: expected_height,
                reference: Coordinate::new(0, coord.y),
            });
        }
    }

    let width: u32 = col_widths.iter().sum();
    let height: u32 = row_heights.iter().sum();
    debug!(
        max_x,
        max_y,
        width,
        height,
        tiles = grid.len(),
        "Computed canvas extents"
    );

    let mut canvas = RgbaImage::from_pixel(width, height, BLANK);

    // Row-major scan: top-to-bottom rows, left-to-right columns.
    let mut pix_y = 0u32;
    for y in 0..=max_y {
        let mut pix_x = 0u32;
        for x in 0..=max_x {
            if let Some(tile) = grid.get(&Coordinate::new(x, y)) {
                blit(&mut canvas, &tile.image, pix_x, pix_y);
            }
            pix_x += col_widths[x as usize];
        }
        pix_y += row_heights[y as usize];
    }

    Ok(canvas)
}

/// Copies a tile into the canvas at (pix_x, pix_y), one scanline at a time.
///
/// Source rows are contiguous; destination rows are strided by the canvas
/// width. The caller guarantees the tile fits inside the canvas.
fn blit(canvas: &mut RgbaImage, tile: &RgbaImage, pix_x: u32, pix_y: u32) {
    let canvas_width = canvas.width() as usize;
    let row_bytes = tile.width() as usize * 4;
    let src = tile.as_raw();
    let dst: &mut [u8] = canvas;

    for v in 0..tile.height() as usize {
        let dst_start = ((pix_y as usize + v) * canvas_width + pix_x as usize) * 4;
        let src_start = v * row_bytes;
        dst[dst_start..dst_start + row_bytes]
            .copy_from_slice(&src[src_start..src_start + row_bytes]);
    }
}
