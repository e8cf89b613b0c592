//! Merge pipeline driver.
//!
//! Runs the full per-zoom sequence over a tile index:
//!
//! ```text
//! TileIndex → (per zoom) load tiles → compose canvas → encode → write file
//! ```
//!
//! Zoom levels are processed sequentially in ascending order; each
//! level's decoded tiles and canvas are dropped before the next level
//! begins. The run aborts on the first zoom level that fails and the
//! error is surfaced to the caller with the zoom context attached.

use crate::codec::{CodecError, TileCodec};
use crate::compose::{compose, ComposeError};
use crate::tileset::{discover, load_zoom_tiles, DiscoverError, LoadError, TileIndex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Default output filename prefix.
pub const DEFAULT_PREFIX: &str = "tile";

/// Output settings for a merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Directory merged images are written into.
    pub output_dir: PathBuf,
    /// Output filename prefix; files are named `<prefix><zoom>.<ext>`.
    pub prefix: String,
    /// Restrict the run to a single zoom level.
    pub zoom: Option<u32>,
}

impl MergeOptions {
    /// Creates options with the default prefix and no zoom restriction.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            zoom: None,
        }
    }

    /// Sets the output filename prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Restricts processing to one zoom level.
    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

/// Errors that abort a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Tile discovery failed before any processing began.
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    /// The requested zoom level has no tiles in the index.
    #[error("zoom level {0} not found in tile set")]
    ZoomNotFound(u32),

    /// A tile of this zoom level could not be read or decoded.
    #[error("zoom {zoom}: {source}")]
    Load { zoom: u32, source: LoadError },

    /// The zoom level's grid could not be composed.
    #[error("zoom {zoom}: {source}")]
    Compose { zoom: u32, source: ComposeError },

    /// The composed canvas could not be encoded.
    #[error("zoom {zoom}: {source}")]
    Encode { zoom: u32, source: CodecError },

    /// The encoded output could not be written.
    #[error("zoom {zoom}: failed to write '{path}': {source}")]
    Write {
        zoom: u32,
        path: PathBuf,
        source: io::Error,
    },
}

/// Discovers tiles in `input_dir` and merges every zoom level.
///
/// Convenience wrapper combining [`discover`] and [`run`].
pub fn merge_directory(
    input_dir: &Path,
    codec: &dyn TileCodec,
    options: &MergeOptions,
) -> Result<Vec<PathBuf>, MergeError> {
    let index = discover(input_dir)?;
    run(&index, codec, options)
}

/// Merges each selected zoom level of the index into one output image.
///
/// Returns the paths written, in zoom order. The run stops at the first
/// failing zoom level; levels already written stay on disk.
pub fn run(
    index: &TileIndex,
    codec: &dyn TileCodec,
    options: &MergeOptions,
) -> Result<Vec<PathBuf>, MergeError> {
    let zooms: Vec<u32> = match options.zoom {
        Some(zoom) => {
            if index.level(zoom).is_none() {
                return Err(MergeError::ZoomNotFound(zoom));
            }
            vec![zoom]
        }
        None => index.zoom_levels().collect(),
    };

    if zooms.is_empty() {
        warn!("No tiles discovered, nothing to merge");
        return Ok(Vec::new());
    }

    let mut written = Vec::with_capacity(zooms.len());
    for zoom in zooms {
        written.push(merge_zoom_level(index, codec, options, zoom)?);
    }
    Ok(written)
}

/// Runs load → compose → encode → write for one zoom level.
fn merge_zoom_level(
    index: &TileIndex,
    codec: &dyn TileCodec,
    options: &MergeOptions,
    zoom: u32,
) -> Result<PathBuf, MergeError> {
    // Present by construction: callers only pass zooms from the index.
    let level = index
        .level(zoom)
        .ok_or(MergeError::ZoomNotFound(zoom))?;

    info!(zoom, tiles = level.len(), codec = codec.name(), "Loading zoom level");
    let tiles =
        load_zoom_tiles(level, codec).map_err(|source| MergeError::Load { zoom, source })?;

    let canvas = compose(&tiles).map_err(|source| MergeError::Compose { zoom, source })?;
    drop(tiles);
    info!(
        zoom,
        width = canvas.width(),
        height = canvas.height(),
        "Composed merged canvas"
    );

    let bytes = codec
        .encode(&canvas)
        .map_err(|source| MergeError::Encode { zoom, source })?;

    let path = options
        .output_dir
        .join(format!("{}{}.{}", options.prefix, zoom, codec.extension()));
    fs::write(&path, bytes).map_err(|source| MergeError::Write {
        zoom,
        path: path.clone(),
        source,
    })?;

    info!(zoom, output = %path.display(), "Wrote merged image");
    Ok(path)
}
