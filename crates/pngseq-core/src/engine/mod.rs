//! The codec engine boundary.
//!
//! Bitstream work (chunk parsing, CRC, inflate/deflate, filtering) belongs to
//! an external engine. The decode and encode pipelines drive it only through
//! [`DecodeEngine`] and [`EncodeEngine`], so every engine call returns a
//! `Result` and an engine abort unwinds through ordinary `?` propagation.
//!
//! [`png`] provides the production implementations backed by the `png` crate.

use std::fmt;

use crate::rows::RowTable;
use crate::CodecError;

pub mod png;

pub use self::png::{PngDecodeEngine, PngEncodeEngine};

/// Color arrangement as declared in a PNG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArrangement {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
    Palette,
}

impl fmt::Display for ColorArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorArrangement::Gray => "gray",
            ColorArrangement::GrayAlpha => "gray+alpha",
            ColorArrangement::Rgb => "rgb",
            ColorArrangement::Rgba => "rgba",
            ColorArrangement::Palette => "palette",
        };
        f.write_str(name)
    }
}

/// Header fields reported by the engine before any pixel is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color: ColorArrangement,
    pub interlaced: bool,
    /// A transparency (tRNS) chunk precedes the image data.
    pub has_transparency: bool,
}

/// Engine-native transform requested before pixel decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Expand palette indices to RGB triples.
    PaletteToRgb,
    /// Scale 1/2/4-bit gray samples up to 8 bits.
    ExpandGray,
    /// Fold the transparency chunk into an explicit alpha channel.
    TransparencyToAlpha,
    /// Drop the low byte of 16-bit samples.
    Strip16,
    /// Unpack sub-byte samples to one sample per byte.
    Pack,
}

/// What the engine will emit once directives are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputInfo {
    pub color: ColorArrangement,
    pub bit_depth: u8,
    /// Bytes per output row.
    pub rowbytes: usize,
}

/// Header parameters for writing an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub width: u32,
    pub height: u32,
    pub color: ColorArrangement,
    pub bit_depth: u8,
    /// Attach a zeroed 256-entry palette to non-indexed color output.
    pub placeholder_palette: bool,
}

/// Pull-side engine. Calls must come in the order they are declared.
pub trait DecodeEngine {
    /// Parse everything up to the image data and report the header.
    fn read_header(&mut self) -> Result<Header, CodecError>;

    /// Queue a normalization directive. Takes effect at [`update_info`].
    ///
    /// [`update_info`]: DecodeEngine::update_info
    fn apply(&mut self, directive: Directive);

    /// Commit queued directives and report the resulting output shape.
    fn update_info(&mut self) -> Result<OutputInfo, CodecError>;

    /// Decode every row into the table, row `i` into entry `i`.
    fn read_image(&mut self, rows: &mut RowTable<&mut [u8]>) -> Result<(), CodecError>;

    /// Consume whatever follows the image data.
    fn read_end(&mut self) -> Result<(), CodecError>;
}

/// Push-side engine. Calls must come in the order they are declared.
pub trait EncodeEngine {
    fn write_header(&mut self, params: &EncodeParams) -> Result<(), CodecError>;

    /// Write every row of the table, in order.
    fn write_image(&mut self, rows: &RowTable<&[u8]>) -> Result<(), CodecError>;

    /// Write the trailing chunks and release the engine's hold on the sink.
    fn write_end(&mut self) -> Result<(), CodecError>;
}

/// Failure for an engine driven out of order.
pub(crate) fn out_of_order(call: &str) -> CodecError {
    log::error!("codec engine call {} made out of order", call);
    CodecError::CodecEngineFailure
}
