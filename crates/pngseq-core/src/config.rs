//! Codec options shared by `load` and `save`.

use serde::{Deserialize, Serialize};

/// Tunables for a decode or encode call.
///
/// Defaults give the standard behavior; hosts usually never touch these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecOptions {
    /// Write a zeroed 256-entry PLTE chunk on RGB/RGBA output, reproducing
    /// the byte layout of files written by older tooling. Ignored for GRAY.
    pub placeholder_palette: bool,
    /// Cap on the engine's working allocations while decoding, in bytes.
    /// `None` uses the engine default.
    pub max_decode_bytes: Option<usize>,
}

impl CodecOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_options_default() {
        let options = CodecOptions::new();
        assert!(options.is_default());
        assert!(!options.placeholder_palette);
        assert_eq!(options.max_decode_bytes, None);
    }

    #[test]
    fn test_codec_options_not_default() {
        let mut options = CodecOptions::new();
        options.placeholder_palette = true;
        assert!(!options.is_default());
    }
}
