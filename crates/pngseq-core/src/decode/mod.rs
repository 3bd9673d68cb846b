//! PNG decoding into canonical pixel buffers.
//!
//! This module provides functionality for:
//! - Reading a PNG from a file or an in-memory blob
//! - Normalizing any bit depth and color type to GRAY, RGB8 or RGBA8
//! - Decoding rows straight into one contiguous, exactly-sized buffer
//!
//! # Architecture
//!
//! The pipeline drives a [`DecodeEngine`] step by step: header, directives,
//! output info, pixels, trailer. Every resource it acquires is registered in
//! a per-call [`Ledger`], so an engine abort at any step releases everything
//! acquired so far, newest first. All operations are synchronous and
//! single-threaded; nothing is shared between calls.
//!
//! # Examples
//!
//! ```ignore
//! use pngseq_core::decode::decode_file;
//!
//! let image = decode_file("sprite.png").unwrap();
//! println!("{} {}x{}", image.format, image.width, image.height);
//! ```

pub mod normalize;
mod types;

use std::path::Path;

pub use types::DecodedImage;

use crate::config::CodecOptions;
use crate::engine::{DecodeEngine, PngDecodeEngine};
use crate::guard::{Ledger, ResourceKind};
use crate::rows::{self, RowTable};
use crate::source::ByteSource;
use crate::CodecError;

/// Decode a PNG from an already-validated source with default options.
pub fn decode(source: ByteSource<'_>) -> Result<DecodedImage, CodecError> {
    decode_with_options(source, &CodecOptions::default())
}

/// Decode a PNG from an already-validated source.
pub fn decode_with_options(
    source: ByteSource<'_>,
    options: &CodecOptions,
) -> Result<DecodedImage, CodecError> {
    let ledger = Ledger::new();
    let kind = match &source {
        ByteSource::File(_) => ResourceKind::File,
        ByteSource::Memory(_) => ResourceKind::Blob,
    };
    let source = ledger.track(kind, source);
    let mut engine = ledger.track(
        ResourceKind::EngineState,
        PngDecodeEngine::new(source, options),
    );
    decode_with(&mut *engine, &ledger)
}

/// Open, validate and decode the PNG at `path`.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedImage, CodecError> {
    decode(ByteSource::open(path)?)
}

/// Validate and decode a PNG held in memory.
pub fn decode_memory(bytes: &[u8]) -> Result<DecodedImage, CodecError> {
    decode(ByteSource::from_memory(bytes)?)
}

/// Run the decode pipeline against any engine.
pub(crate) fn decode_with<E: DecodeEngine>(
    engine: &mut E,
    ledger: &Ledger,
) -> Result<DecodedImage, CodecError> {
    let header = engine.read_header()?;

    let directives = normalize::directives(&header);
    log::debug!(
        "{}x{} {} at {} bits: applying {:?}",
        header.width,
        header.height,
        header.color,
        header.bit_depth,
        directives
    );
    for directive in directives {
        engine.apply(directive);
    }

    let output = engine.update_info()?;
    let format = normalize::classify(&output)?;
    log::debug!("normalized to {} ({} bytes per row)", format, output.rowbytes);

    let mut pixels = rows::allocate_pixels(
        ledger,
        format,
        header.width,
        header.height,
        output.rowbytes,
    )?;
    {
        let table = RowTable::over_mut(&mut pixels, output.rowbytes, header.height as usize)?;
        let mut table = ledger.track(ResourceKind::RowTable, table);
        engine.read_image(&mut table)?;
    }
    engine.read_end()?;

    Ok(DecodedImage::new(
        format,
        header.width,
        header.height,
        pixels.hand_off(),
    ))
}
