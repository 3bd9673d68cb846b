//! PNG saving WASM bindings.
//!
//! # Functions
//!
//! - [`save`] - Encode an array of samples to PNG bytes
//! - [`save_with_options`] - Same, with a `CodecOptions` object
//! - [`save_bytes`] - Encode a `Uint8Array` of samples
//!
//! # Example
//!
//! ```typescript
//! import { save } from '@pngseq/wasm';
//!
//! // 2x1 RGB: one red pixel, one blue pixel
//! const png = save('RGB8', 2, 1, [255, 0, 0, 0, 0, 255]);
//! await writable.write(new Blob([png], { type: 'image/png' }));
//! ```

use js_sys::Array;
use pngseq_core::encode::{self, EncodeRequest};
use pngseq_core::{host, CodecError, CodecOptions};
use wasm_bindgen::prelude::*;

use crate::options::parse_options;
use crate::sequence::JsSequence;

fn to_js(e: CodecError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Encode an array of samples to PNG bytes.
///
/// # Arguments
///
/// * `format` - "GRAY", "RGB8" or "RGBA8"
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `pixels` - width * height * step numbers, row-major
///
/// Values outside 0..=255 keep their low 8 bits; non-numbers count as 0.
///
/// # Errors
///
/// Returns an error if:
/// - The format tag is unknown
/// - The array length doesn't match width * height * step
/// - Width or height is zero
#[wasm_bindgen]
pub fn save(format: &str, width: u32, height: u32, pixels: &Array) -> Result<Vec<u8>, JsValue> {
    host::save_to_vec(format, width, height, &JsSequence::new(pixels)).map_err(to_js)
}

/// Encode an array of samples to PNG bytes with codec options.
///
/// `options` may be `undefined`, or an object such as
/// `{ placeholderPalette: true }`.
#[wasm_bindgen]
pub fn save_with_options(
    format: &str,
    width: u32,
    height: u32,
    pixels: &Array,
    options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let options = parse_options(options)?;
    host::save_to_vec_with_options(format, width, height, &JsSequence::new(pixels), &options)
        .map_err(to_js)
}

/// Encode raw samples from a `Uint8Array` to PNG bytes.
#[wasm_bindgen]
pub fn save_bytes(format: &str, width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, JsValue> {
    encode_bytes(format, width, height, pixels).map_err(to_js)
}

fn encode_bytes(format: &str, width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, CodecError> {
    let request = EncodeRequest::new(
        encode::mapper::parse_tag(format)?,
        width,
        height,
        pixels.to_vec(),
    )?;
    encode::write_vec(request, &CodecOptions::default())
}

/// Tests for encode bindings.
///
/// Functions returning `Result<T, JsValue>` only run on wasm32 targets; the
/// encoding itself is covered in `pngseq_core::encode`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bytes_creates_png() {
        let png = encode_bytes("GRAY", 2, 2, &[0, 85, 170, 255]).unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        let image = pngseq_core::decode_memory(&png).unwrap();
        assert_eq!(image.pixels, vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_encode_bytes_checks_length() {
        let err = encode_bytes("RGB8", 2, 2, &[0; 11]).unwrap_err();
        assert!(err.to_string().contains("expected 12"));
    }

    #[test]
    fn test_encode_bytes_unknown_format() {
        assert_eq!(
            encode_bytes("BGR8", 1, 1, &[0; 3]).unwrap_err(),
            CodecError::UnsupportedFormat("BGR8".to_string())
        );
    }
}
