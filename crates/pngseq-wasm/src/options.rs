//! `CodecOptions` from JavaScript objects.

use pngseq_core::CodecOptions;
use wasm_bindgen::JsValue;

/// Deserialize codec options; `undefined` and `null` mean defaults.
pub(crate) fn parse_options(value: JsValue) -> Result<CodecOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CodecOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid codec options: {}", e)))
}
