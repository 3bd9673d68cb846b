//! PNG encoding from canonical pixel buffers.
//!
//! This module provides functionality for:
//! - Validating a pixel buffer against its declared format and dimensions
//! - Writing 8-bit GRAY, RGB8 or RGBA8 images to a file or to memory
//!
//! # Architecture
//!
//! Validation happens in [`EncodeRequest`] construction, before any file or
//! engine state exists. The pipeline then drives an [`EncodeEngine`] through
//! header, rows and trailer, with every resource registered in a per-call
//! [`Ledger`] so an engine abort releases everything it acquired.
//!
//! # Examples
//!
//! ```ignore
//! use pngseq_core::encode::{write_vec, EncodeRequest};
//! use pngseq_core::{CanonicalFormat, CodecOptions};
//!
//! let request = EncodeRequest::new(CanonicalFormat::Gray, 2, 2, vec![0, 64, 128, 255]).unwrap();
//! let png = write_vec(request, &CodecOptions::default()).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

pub mod mapper;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::CodecOptions;
use crate::engine::{EncodeEngine, PngEncodeEngine};
use crate::guard::{Ledger, ResourceKind};
use crate::marshal::{self, HostSequence};
use crate::rows::RowTable;
use crate::{CanonicalFormat, CodecError};

/// A validated image ready to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub format: CanonicalFormat,
    pub width: u32,
    pub height: u32,
    /// Row-major samples, exactly `width * height * format.step()` bytes.
    pub pixels: Vec<u8>,
}

impl EncodeRequest {
    /// Check `pixels` against the declared shape.
    pub fn new(
        format: CanonicalFormat,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, CodecError> {
        let expected = format.image_len(width, height)?;
        if pixels.len() != expected {
            return Err(CodecError::SizeMismatch {
                got: pixels.len(),
                expected,
                width,
                height,
                step: format.step(),
            });
        }
        Ok(Self {
            format,
            width,
            height,
            pixels,
        })
    }

    /// Parse a host format tag and marshal a host sequence into a request.
    pub fn from_sequence<Q: HostSequence + ?Sized>(
        tag: &str,
        width: u32,
        height: u32,
        sequence: &Q,
    ) -> Result<Self, CodecError> {
        let format = mapper::parse_tag(tag)?;
        let pixels = marshal::from_sequence(sequence, format, width, height)?;
        Ok(Self {
            format,
            width,
            height,
            pixels,
        })
    }

    /// Bytes per row.
    pub fn rowbytes(&self) -> usize {
        self.width as usize * self.format.step()
    }
}

/// Encode `request` as a PNG file at `path`, replacing any existing file.
pub fn write_file(
    path: impl AsRef<Path>,
    request: EncodeRequest,
    options: &CodecOptions,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let ledger = Ledger::new();
    let request = ledger.track(ResourceKind::PixelBuffer, request);

    let file = File::create(path)
        .map_err(|e| CodecError::IoError(format!("Can't open {}: {}", path.display(), e)))?;
    let mut file = ledger.track(ResourceKind::File, BufWriter::new(file));
    {
        let mut engine = ledger.track(
            ResourceKind::EngineState,
            PngEncodeEngine::new(&mut *file),
        );
        encode_with(&mut *engine, &request, options, &ledger)?;
    }
    file.flush()?;
    log::debug!(
        "wrote {}x{} {} to {}",
        request.width,
        request.height,
        request.format,
        path.display()
    );
    Ok(())
}

/// Encode `request` into an in-memory PNG stream.
pub fn write_vec(request: EncodeRequest, options: &CodecOptions) -> Result<Vec<u8>, CodecError> {
    let ledger = Ledger::new();
    let request = ledger.track(ResourceKind::PixelBuffer, request);
    let mut out = Vec::new();
    {
        let mut engine = ledger.track(ResourceKind::EngineState, PngEncodeEngine::new(&mut out));
        encode_with(&mut *engine, &request, options, &ledger)?;
    }
    Ok(out)
}

/// Run the encode pipeline against any engine.
pub(crate) fn encode_with<E: EncodeEngine>(
    engine: &mut E,
    request: &EncodeRequest,
    options: &CodecOptions,
    ledger: &Ledger,
) -> Result<(), CodecError> {
    let params = mapper::params_for(request.format, request.width, request.height, options);
    log::debug!(
        "encoding {}x{} {} as {} (palette: {})",
        params.width,
        params.height,
        request.format,
        params.color,
        params.placeholder_palette
    );
    engine.write_header(&params)?;
    {
        let table = RowTable::over(
            &request.pixels,
            request.rowbytes(),
            request.height as usize,
        )?;
        let table = ledger.track(ResourceKind::RowTable, table);
        engine.write_image(&table)?;
    }
    engine.write_end()
}
