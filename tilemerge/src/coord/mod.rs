//! Tile grid coordinate types.
//!
//! A tile pyramid is addressed by zoom level and a non-negative (x, y)
//! grid position within that level. (0, 0) is the top-left cell; x grows
//! to the right, y grows downward, matching the visual layout of the
//! merged output.

use std::fmt;

/// Grid position of a tile within one zoom level.
///
/// Ordered by (x, then y) so sorted containers iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Column index, increasing rightward from 0.
    pub x: u32,
    /// Row index, increasing downward from 0.
    pub y: u32,
}

impl Coordinate {
    /// Creates a coordinate from column and row indices.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unique identity of a tile slot in the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileKey {
    /// Zoom level the tile belongs to.
    pub zoom: u32,
    /// Grid position within the zoom level.
    pub coord: Coordinate,
}

impl TileKey {
    /// Creates a key from a zoom level and grid position.
    pub fn new(zoom: u32, coord: Coordinate) -> Self {
        Self { zoom, coord }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zoom {} {}", self.zoom, self.coord)
    }
}
