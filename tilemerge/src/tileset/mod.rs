//! Tile discovery, indexing, and loading.
//!
//! This module turns a flat directory of tile images into an in-memory
//! index and resolves indexed tiles to decoded pixel buffers:
//!
//! ```text
//! directory entries → filename parser → TileIndex
//!                                          │ (per zoom level)
//!                                          ▼
//!                                     tile loader → DecodedTile set
//! ```
//!
//! Discovery reads no pixel data; decoding happens per zoom level on
//! demand so peak memory stays bounded to one level's tiles.

mod filename;
mod index;
mod loader;

pub use filename::{parse_tile_filename, ParseError, ParsedTileName};
pub use index::{discover, DiscoverError, TileDescriptor, TileIndex, ZoomLevel};
pub use loader::{load_zoom_tiles, DecodedTile, LoadError};
