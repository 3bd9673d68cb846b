//! pngseq WASM - WebAssembly bindings for pngseq
//!
//! This crate provides WASM bindings to expose the pngseq-core load/save
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for loaded images
//! - `sequence` - JS arrays as 1-indexed host sequences
//! - `decode` - PNG loading bindings
//! - `encode` - PNG saving bindings
//! - `options` - Codec options from JS objects
//! - `logger` - `log` output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { load, save } from '@pngseq/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = load(new Uint8Array(await file.arrayBuffer()));
//! const png = save(image.format, image.width, image.height, image.pixels());
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod options;
mod sequence;
mod types;

// Re-export public types
pub use decode::{load, load_with_options};
pub use encode::{save, save_bytes, save_with_options};
pub use types::JsPngImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Set console log verbosity: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = logger::parse_level(level).map_err(|e| JsValue::from_str(&e))?;
    log::set_max_level(level);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    pngseq_core::version().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
