//! Image codec abstraction for tile decode and canvas encode.
//!
//! The merge pipeline treats the image codec as an opaque capability:
//! `decode(bytes)` produces an RGBA8 pixel buffer with dimensions, and
//! `encode(pixels)` produces the output file bytes. The [`TileCodec`]
//! trait keeps that boundary explicit so the compositor and driver never
//! touch format details, and tests can substitute a mock codec.
//!
//! # Available Codecs
//!
//! - [`PngCodec`] - PNG decode/encode via the `image` crate

mod png;

pub use png::PngCodec;

use image::RgbaImage;
use std::fmt;

/// Errors reported by the codec boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The codec rejected the input bytes (corrupt, truncated, wrong format).
    Decode(String),
    /// The codec failed to produce output bytes for a pixel buffer.
    Encode(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Decode(msg) => write!(f, "decode error: {}", msg),
            CodecError::Encode(msg) => write!(f, "encode error: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

/// Codec capability used by the tile loader and the pipeline driver.
///
/// The pixel format is fixed at RGBA8 (4 bytes per pixel, row-major);
/// there is no color-space or bit-depth negotiation at this seam.
pub trait TileCodec {
    /// Decodes image file bytes into an RGBA8 buffer.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError>;

    /// Encodes an RGBA8 buffer into image file bytes.
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError>;

    /// File extension for encoded output (without the dot).
    fn extension(&self) -> &str;

    /// Codec name for logging and identification.
    fn name(&self) -> &str;
}
