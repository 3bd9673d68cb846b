//! Decode-side pixel format normalization.
//!
//! Whatever the file's bit depth and color arrangement, the engine is told
//! how to reshape samples before decoding so output always lands in one of
//! the three canonical formats. No pixel is converted by hand.

use crate::engine::{ColorArrangement, Directive, Header, OutputInfo};
use crate::{CanonicalFormat, CodecError};

/// Directives for `header`, in the order they must be applied.
pub fn directives(header: &Header) -> Vec<Directive> {
    let mut out = Vec::new();
    let mut bit_depth = header.bit_depth;

    if header.color == ColorArrangement::Palette {
        out.push(Directive::PaletteToRgb);
    }
    if header.color == ColorArrangement::Gray && bit_depth < 8 {
        bit_depth = 8;
        out.push(Directive::ExpandGray);
    }
    if header.has_transparency {
        out.push(Directive::TransparencyToAlpha);
    }
    if bit_depth == 16 {
        out.push(Directive::Strip16);
    }
    // Sub-byte palette indices still need unpacking
    if bit_depth < 8 {
        out.push(Directive::Pack);
    }
    out
}

/// Map the engine's post-normalization output to a canonical format.
pub fn classify(output: &OutputInfo) -> Result<CanonicalFormat, CodecError> {
    if output.bit_depth != 8 {
        return Err(CodecError::UnsupportedColorType(format!(
            "{} at {} bits",
            output.color, output.bit_depth
        )));
    }
    match output.color {
        ColorArrangement::Gray => Ok(CanonicalFormat::Gray),
        ColorArrangement::Rgb => Ok(CanonicalFormat::Rgb8),
        ColorArrangement::Rgba => Ok(CanonicalFormat::Rgba8),
        other => Err(CodecError::UnsupportedColorType(other.to_string())),
    }
}
