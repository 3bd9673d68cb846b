//! Decoded image type.

use crate::CanonicalFormat;

/// A decoded, normalized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Canonical pixel layout.
    pub format: CanonicalFormat,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major order, `format.step()` bytes per pixel.
    /// Length is width * height * step.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given format, dimensions and pixel data.
    pub fn new(format: CanonicalFormat, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            Some(pixels.len()),
            format.buffer_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            format,
            width,
            height,
            pixels,
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Samples of the pixel at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let step = self.format.step();
        let start = (y as usize * self.width as usize + x as usize) * step;
        self.pixels.get(start..start + step)
    }
}
