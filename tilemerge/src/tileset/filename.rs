//! Tile filename parsing.
//!
//! Tile files carry their pyramid position in the filename as three
//! decimal integers separated by literal `x`:
//!
//! `{zoom}x{x}x{y}`
//!
//! Examples:
//! - `2x0x3.png` (zoom 2, column 0, row 3)
//! - `map_4x12x7_final.png` (decoration around the triple is tolerated)
//!
//! The first occurrence of the pattern anywhere in the name wins; there is
//! no assumption on digit count per field. The triple maps to (zoom, x, y).

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Coordinates extracted from a tile filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTileName {
    /// Zoom level.
    pub zoom: u32,
    /// Column index (increases rightward).
    pub x: u32,
    /// Row index (increases downward).
    pub y: u32,
}

/// Error parsing a tile filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Filename contains no `{zoom}x{x}x{y}` triple.
    NoMatch,
    /// Zoom field does not fit in a u32.
    InvalidZoom(String),
    /// X field does not fit in a u32.
    InvalidX(String),
    /// Y field does not fit in a u32.
    InvalidY(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoMatch => write!(f, "filename doesn't match tile pattern"),
            ParseError::InvalidZoom(s) => write!(f, "invalid zoom level: {}", s),
            ParseError::InvalidX(s) => write!(f, "invalid x coordinate: {}", s),
            ParseError::InvalidY(s) => write!(f, "invalid y coordinate: {}", s),
        }
    }
}

impl std::error::Error for ParseError {}

/// Get the tile filename regex.
///
/// Pattern: `<zoom>x<x>x<y>` — three digit groups separated by literal `x`.
fn tile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // (\d+) - zoom level
        // x     - separator
        // (\d+) - column
        // x     - separator
        // (\d+) - row
        Regex::new(r"(\d+)x(\d+)x(\d+)").unwrap()
    })
}

/// Parse a tile filename to extract (zoom, x, y).
///
/// Scans for the first match of the coordinate triple, tolerating any
/// prefix, suffix, or extension around it. Callers pass the filename,
/// not the full path.
///
/// # Examples
///
/// ```
/// use tilemerge::tileset::parse_tile_filename;
///
/// let parsed = parse_tile_filename("2x0x3.png").unwrap();
/// assert_eq!(parsed.zoom, 2);
/// assert_eq!(parsed.x, 0);
/// assert_eq!(parsed.y, 3);
/// ```
pub fn parse_tile_filename(filename: &str) -> Result<ParsedTileName, ParseError> {
    let captures = tile_pattern()
        .captures(filename)
        .ok_or(ParseError::NoMatch)?;

    let zoom_str = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let zoom = zoom_str
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidZoom(zoom_str.to_string()))?;

    let x_str = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
    let x = x_str
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidX(x_str.to_string()))?;

    let y_str = captures.get(3).map(|m| m.as_str()).unwrap_or_default();
    let y = y_str
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidY(y_str.to_string()))?;

    Ok(ParsedTileName { zoom, x, y })
}
