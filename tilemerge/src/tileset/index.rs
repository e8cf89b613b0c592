//! Tile discovery and the sparse per-zoom index.
//!
//! Discovery walks one directory (non-recursive), keeps entries with a
//! `png` extension (ASCII case-insensitive), extracts (zoom, x, y) from
//! each filename, and records a descriptor per tile slot. Files whose
//! names carry no coordinate triple are skipped with a debug log; they
//! are expected in real tile folders (readme files, previews, etc.).
//!
//! The index is populated once and read-only afterwards. If two files
//! resolve to the same (zoom, x, y) slot, the later directory entry wins.

use crate::coord::{Coordinate, TileKey};
use crate::tileset::filename::parse_tile_filename;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A discovered tile: its slot in the pyramid plus the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDescriptor {
    /// Pyramid slot this file fills.
    pub key: TileKey,
    /// Source image file.
    pub path: PathBuf,
}

/// All tiles discovered for one zoom level, keyed by grid position.
pub type ZoomLevel = BTreeMap<Coordinate, TileDescriptor>;

/// Sparse mapping zoom → (x, y) → tile descriptor.
#[derive(Debug, Clone, Default)]
pub struct TileIndex {
    levels: BTreeMap<u32, ZoomLevel>,
}

impl TileIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, overwriting any previous tile in its slot.
    pub fn insert(&mut self, descriptor: TileDescriptor) {
        self.levels
            .entry(descriptor.key.zoom)
            .or_default()
            .insert(descriptor.key.coord, descriptor);
    }

    /// Zoom levels present, in ascending order.
    pub fn zoom_levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    /// Tiles of one zoom level, or `None` if the level has no tiles.
    pub fn level(&self, zoom: u32) -> Option<&ZoomLevel> {
        self.levels.get(&zoom)
    }

    /// Number of tiles recorded for a zoom level.
    pub fn tile_count(&self, zoom: u32) -> usize {
        self.levels.get(&zoom).map_or(0, |l| l.len())
    }

    /// True if no tiles were discovered at all.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Error reading the tile directory during discovery.
#[derive(Debug)]
pub enum DiscoverError {
    /// Directory listing failed.
    ReadDir { path: PathBuf, source: io::Error },
}

impl fmt::Display for DiscoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverError::ReadDir { path, source } => {
                write!(f, "failed to read directory '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DiscoverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoverError::ReadDir { source, .. } => Some(source),
        }
    }
}

/// Builds a [`TileIndex`] from a flat directory of tile images.
///
/// No pixel data is read; the index only records paths. Per-zoom tile
/// counts are logged once discovery completes.
pub fn discover(dir: &Path) -> Result<TileIndex, DiscoverError> {
    let entries = fs::read_dir(dir).map_err(|source| DiscoverError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut index = TileIndex::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoverError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match parse_tile_filename(filename) {
            Ok(parsed) => {
                let key = TileKey::new(parsed.zoom, Coordinate::new(parsed.x, parsed.y));
                index.insert(TileDescriptor { key, path });
            }
            Err(e) => {
                // Stray non-tile files are tolerated by design.
                debug!(file = filename, error = %e, "Skipping file without tile coordinates");
            }
        }
    }

    for zoom in index.zoom_levels() {
        info!(zoom, tiles = index.tile_count(zoom), "Discovered zoom level");
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_discover_indexes_tiles_per_zoom() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1x0x0.png");
        touch(dir.path(), "2x0x0.png");
        touch(dir.path(), "2x0x1.png");
        touch(dir.path(), "2x1x0.png");
        touch(dir.path(), "2x1x1.png");

        let index = discover(dir.path()).unwrap();

        assert_eq!(index.zoom_levels().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(index.tile_count(1), 1);
        assert_eq!(index.tile_count(2), 4);

        let level = index.level(2).unwrap();
        for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            let coord = Coordinate::new(x, y);
            let descriptor = level.get(&coord).unwrap();
            assert_eq!(descriptor.key, TileKey::new(2, coord));
            assert_eq!(
                descriptor.path,
                dir.path().join(format!("2x{}x{}.png", x, y))
            );
        }
    }

    #[test]
    fn test_discover_skips_non_png_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2x0x0.png");
        touch(dir.path(), "2x0x1.jpg");
        touch(dir.path(), "2x1x0.txt");
        touch(dir.path(), "2x1x1");

        let index = discover(dir.path()).unwrap();
        assert_eq!(index.tile_count(2), 1);
    }

    #[test]
    fn test_discover_extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2x0x0.PNG");
        touch(dir.path(), "2x0x1.Png");

        let index = discover(dir.path()).unwrap();
        assert_eq!(index.tile_count(2), 2);
    }

    #[test]
    fn test_discover_skips_unparseable_names_silently() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "preview.png");
        touch(dir.path(), "2x0x0.png");

        let index = discover(dir.path()).unwrap();
        assert_eq!(index.tile_count(2), 1);
    }

    #[test]
    fn test_discover_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "2x0x0.png");

        let index = discover(dir.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_discover_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = discover(&missing);
        assert!(matches!(result, Err(DiscoverError::ReadDir { .. })));
    }

    #[test]
    fn test_index_last_insert_wins() {
        let mut index = TileIndex::new();
        let key = TileKey::new(2, Coordinate::new(0, 0));
        index.insert(TileDescriptor {
            key,
            path: PathBuf::from("first.png"),
        });
        index.insert(TileDescriptor {
            key,
            path: PathBuf::from("second.png"),
        });

        assert_eq!(index.tile_count(2), 1);
        let descriptor = index.level(2).unwrap().get(&key.coord).unwrap();
        assert_eq!(descriptor.path, PathBuf::from("second.png"));
    }

    #[test]
    fn test_level_iteration_is_sorted_by_coordinate() {
        let mut index = TileIndex::new();
        for (x, y) in [(1, 1), (0, 1), (1, 0), (0, 0)] {
            let key = TileKey::new(3, Coordinate::new(x, y));
            index.insert(TileDescriptor {
                key,
                path: PathBuf::from(format!("3x{}x{}.png", x, y)),
            });
        }

        let coords: Vec<_> = index.level(3).unwrap().keys().copied().collect();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
            ]
        );
    }
}
