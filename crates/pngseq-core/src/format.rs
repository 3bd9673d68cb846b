//! Canonical pixel formats.

use std::fmt;
use std::str::FromStr;

use crate::CodecError;

/// One of the three pixel layouts all decode output is normalized into,
/// and the only layouts accepted for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalFormat {
    /// 8-bit grayscale, 1 channel.
    Gray,
    /// 8-bit RGB, 3 channels.
    Rgb8,
    /// 8-bit RGBA, 4 channels.
    Rgba8,
}

impl CanonicalFormat {
    /// Channel count per pixel ("step").
    #[inline]
    pub fn step(self) -> usize {
        match self {
            CanonicalFormat::Gray => 1,
            CanonicalFormat::Rgb8 => 3,
            CanonicalFormat::Rgba8 => 4,
        }
    }

    /// The host-facing tag string.
    pub fn tag(self) -> &'static str {
        match self {
            CanonicalFormat::Gray => "GRAY",
            CanonicalFormat::Rgb8 => "RGB8",
            CanonicalFormat::Rgba8 => "RGBA8",
        }
    }

    /// Byte length of a `width` x `height` buffer in this format.
    ///
    /// Returns `None` on overflow.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.step())
    }

    /// Byte length of a non-empty `width` x `height` image in this format.
    pub fn image_len(self, width: u32, height: u32) -> Result<usize, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidDimensions { width, height });
        }
        self.buffer_len(width, height)
            .ok_or(CodecError::InvalidDimensions { width, height })
    }
}

impl fmt::Display for CanonicalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CanonicalFormat {
    type Err = CodecError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "GRAY" => Ok(CanonicalFormat::Gray),
            "RGB8" => Ok(CanonicalFormat::Rgb8),
            "RGBA8" => Ok(CanonicalFormat::Rgba8),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }
}
