//! PNG loading WASM bindings.
//!
//! # Functions
//!
//! - [`load`] - Decode a PNG from bytes
//! - [`load_with_options`] - Decode with a `CodecOptions` object
//!
//! # Example
//!
//! ```typescript
//! import { load } from '@pngseq/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = load(bytes);
//! console.log(`${image.format} ${image.width}x${image.height}`);
//! const pixels = image.pixels(); // [r, g, b, ...]
//! ```

use pngseq_core::decode;
use pngseq_core::source::ByteSource;
use wasm_bindgen::prelude::*;

use crate::options::parse_options;
use crate::types::JsPngImage;

/// Decode a PNG image from bytes.
///
/// Every color type and bit depth is normalized to GRAY, RGB8 or RGBA8.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes do not start with a PNG signature
/// - The PNG is corrupted or truncated
/// - The image normalizes to gray with alpha, which has no canonical format
#[wasm_bindgen]
pub fn load(bytes: &[u8]) -> Result<JsPngImage, JsValue> {
    decode::decode_memory(bytes)
        .map(JsPngImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a PNG image from bytes with codec options.
///
/// `options` may be `undefined`, or an object such as
/// `{ maxDecodeBytes: 67108864 }`.
#[wasm_bindgen]
pub fn load_with_options(bytes: &[u8], options: JsValue) -> Result<JsPngImage, JsValue> {
    let options = parse_options(options)?;
    let source = ByteSource::from_memory(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    decode::decode_with_options(source, &options)
        .map(JsPngImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use pngseq_core::{save_to_vec, Sequence};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_load_rgba() {
        let seq: Sequence = vec![10, 20, 30, 40].into();
        let bytes = save_to_vec("RGBA8", 1, 1, &seq).unwrap();
        let image = load(&bytes).unwrap();
        assert_eq!(image.format(), "RGBA8");
        let pixels = image.pixels();
        assert_eq!(pixels.length(), 4);
        assert_eq!(pixels.get(0).as_f64(), Some(10.0));
        assert_eq!(pixels.get(3).as_f64(), Some(40.0));
    }

    #[wasm_bindgen_test]
    fn test_load_rejects_non_png() {
        assert!(load(b"GIF89a").is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_with_undefined_options() {
        let seq: Sequence = vec![1, 2].into();
        let bytes = save_to_vec("GRAY", 2, 1, &seq).unwrap();
        let image = load_with_options(&bytes, JsValue::UNDEFINED).unwrap();
        assert_eq!(image.width(), 2);
    }
}
