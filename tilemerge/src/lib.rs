//! TileMerge - merge a pyramid of map tiles into per-zoom images.
//!
//! This library takes a flat directory of tile images whose filenames
//! carry `{zoom}x{x}x{y}` coordinates, indexes them into a sparse
//! per-zoom grid, and composes each zoom level into a single merged
//! raster written as one output file per level.
//!
//! # High-Level API
//!
//! ```ignore
//! use tilemerge::codec::PngCodec;
//! use tilemerge::pipeline::{merge_directory, MergeOptions};
//!
//! let options = MergeOptions::new("out").with_prefix("map_");
//! let written = merge_directory("tiles".as_ref(), &PngCodec::new(), &options)?;
//! ```
//!
//! The modules mirror the data flow: [`tileset`] discovers and loads
//! tiles, [`compose`] merges one zoom level's grid into a canvas, and
//! [`pipeline`] drives the whole run through the [`codec`] boundary.

pub mod codec;
pub mod compose;
pub mod coord;
pub mod logging;
pub mod pipeline;
pub mod tileset;

/// Version of the tilemerge library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
