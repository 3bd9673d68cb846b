//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core pngseq types,
//! handling the conversion between Rust and JavaScript data representations.

use js_sys::Array;
use pngseq_core::{marshal, DecodedImage};
use wasm_bindgen::prelude::*;

use crate::sequence::ArrayBuilder;

/// A loaded PNG image for JavaScript.
///
/// The pixel data stays in WASM memory until requested. `pixels()` hands it
/// over as a plain array of numbers, one per byte, the way `save` takes it
/// back; `bytes()` is the cheaper `Uint8Array` copy.
#[wasm_bindgen]
pub struct JsPngImage {
    image: DecodedImage,
}

#[wasm_bindgen]
impl JsPngImage {
    /// Format tag: "GRAY", "RGB8" or "RGBA8"
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.image.format.tag().to_string()
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Channels per pixel (1, 3 or 4)
    #[wasm_bindgen(getter)]
    pub fn step(&self) -> usize {
        self.image.format.step()
    }

    /// Get the number of pixels (width * height)
    #[wasm_bindgen(getter)]
    pub fn pixel_count(&self) -> usize {
        self.image.pixel_count()
    }

    /// Get the number of bytes in the pixel buffer (width * height * step)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.image.byte_size()
    }

    /// Returns the pixel data as an Array of numbers in 0..=255.
    pub fn pixels(&self) -> Array {
        marshal::to_sequence::<ArrayBuilder>(&self.image.pixels).into_array()
    }

    /// Samples of the pixel at (x, y), or `undefined` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec<u8>> {
        self.image.pixel(x, y).map(<[u8]>::to_vec)
    }

    /// Returns the pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn bytes(&self) -> Vec<u8> {
        self.image.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPngImage {
    pub(crate) fn from_decoded(image: DecodedImage) -> Self {
        Self { image }
    }
}
