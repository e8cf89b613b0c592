//! Tile loading: descriptors to decoded pixel buffers.
//!
//! Loading one zoom level is all-or-nothing: a tile that cannot be read
//! or decoded aborts the whole level, since a silently dropped tile would
//! corrupt the grid geometry downstream. The error carries the tile's
//! slot and source path so the operator can find the offending file.

use crate::codec::{CodecError, TileCodec};
use crate::coord::TileKey;
use crate::tileset::index::{TileDescriptor, ZoomLevel};
use image::RgbaImage;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// A tile with its pixel data resolved.
///
/// Owned by the zoom-level pass that requested it and dropped once that
/// level's output is written.
#[derive(Debug, Clone)]
pub struct DecodedTile {
    /// The discovered tile this buffer came from.
    pub descriptor: TileDescriptor,
    /// Row-major RGBA8 pixels.
    pub image: RgbaImage,
}

impl DecodedTile {
    /// Pixel width of the tile.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height of the tile.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Error loading a zoom level's tile set.
#[derive(Debug)]
pub enum LoadError {
    /// Reading the tile file failed.
    Io {
        key: TileKey,
        path: PathBuf,
        source: io::Error,
    },
    /// The codec rejected the tile's bytes.
    Decode {
        key: TileKey,
        path: PathBuf,
        source: CodecError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { key, path, source } => {
                write!(f, "failed to read tile {} ('{}'): {}", key, path.display(), source)
            }
            LoadError::Decode { key, path, source } => {
                write!(f, "failed to decode tile {} ('{}'): {}", key, path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Decode { source, .. } => Some(source),
        }
    }
}

/// Decodes every tile of one zoom level, in coordinate order.
pub fn load_zoom_tiles(
    level: &ZoomLevel,
    codec: &dyn TileCodec,
) -> Result<Vec<DecodedTile>, LoadError> {
    let mut tiles = Vec::with_capacity(level.len());
    for descriptor in level.values() {
        let bytes = fs::read(&descriptor.path).map_err(|source| LoadError::Io {
            key: descriptor.key,
            path: descriptor.path.clone(),
            source,
        })?;

        let image = codec.decode(&bytes).map_err(|source| LoadError::Decode {
            key: descriptor.key,
            path: descriptor.path.clone(),
            source,
        })?;

        debug!(
            tile = %descriptor.key,
            width = image.width(),
            height = image.height(),
            "Decoded tile"
        );

        tiles.push(DecodedTile {
            descriptor: descriptor.clone(),
            image,
        });
    }
    Ok(tiles)
}
