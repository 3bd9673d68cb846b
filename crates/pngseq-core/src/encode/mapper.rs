//! Canonical format to encoder header parameters.

use crate::config::CodecOptions;
use crate::engine::{ColorArrangement, EncodeParams};
use crate::{CanonicalFormat, CodecError};

/// Encoder color arrangement, bit depth and channel count for `format`.
pub fn layout(format: CanonicalFormat) -> (ColorArrangement, u8, usize) {
    match format {
        CanonicalFormat::Gray => (ColorArrangement::Gray, 8, 1),
        CanonicalFormat::Rgb8 => (ColorArrangement::Rgb, 8, 3),
        CanonicalFormat::Rgba8 => (ColorArrangement::Rgba, 8, 4),
    }
}

/// Parse a host format tag.
pub fn parse_tag(tag: &str) -> Result<CanonicalFormat, CodecError> {
    tag.parse()
}

/// Header parameters for a `width` x `height` image in `format`.
///
/// Output is never interlaced. The placeholder palette only applies to
/// color output.
pub fn params_for(
    format: CanonicalFormat,
    width: u32,
    height: u32,
    options: &CodecOptions,
) -> EncodeParams {
    let (color, bit_depth, _) = layout(format);
    EncodeParams {
        width,
        height,
        color,
        bit_depth,
        placeholder_palette: options.placeholder_palette && format != CanonicalFormat::Gray,
    }
}
