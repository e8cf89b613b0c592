//! PNG codec implementation backed by the `image` crate.

use super::{CodecError, TileCodec};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// PNG decoder/encoder.
///
/// Decoding accepts any PNG the `image` crate understands and converts
/// the pixels to RGBA8. Encoding always writes RGBA8 PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl PngCodec {
    /// Creates a new PNG codec.
    pub fn new() -> Self {
        Self
    }
}

impl TileCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError> {
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(img.to_rgba8())
    }

    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer)
    }

    fn extension(&self) -> &str {
        "png"
    }

    fn name(&self) -> &str {
        "PNG"
    }
}
