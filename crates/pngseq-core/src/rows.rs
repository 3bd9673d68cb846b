//! Row-addressable views over a flat pixel buffer.
//!
//! The codec engine reads and writes whole rows. A [`RowTable`] slices one
//! contiguous buffer into `height` rows of `rowbytes` each, row `i` starting
//! at byte `i * rowbytes`. Tables are built per call and only lent to the one
//! bulk I/O call that needs them.

use crate::guard::{Ledger, ResourceKind, Tracked};
use crate::{CanonicalFormat, CodecError};

/// Per-row slices into a pixel buffer. `S` is `&mut [u8]` for decoding into
/// the buffer and `&[u8]` for encoding out of it.
#[derive(Debug)]
pub struct RowTable<S> {
    rows: Vec<S>,
    rowbytes: usize,
}

impl<S> RowTable<S> {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rowbytes(&self) -> usize {
        self.rowbytes
    }
}

impl<'b> RowTable<&'b mut [u8]> {
    /// Writable table for the engine's bulk pixel read.
    pub fn over_mut(
        buffer: &'b mut [u8],
        rowbytes: usize,
        height: usize,
    ) -> Result<Self, CodecError> {
        check_layout(buffer.len(), rowbytes, height)?;
        let rows = if rowbytes == 0 {
            Vec::new()
        } else {
            buffer.chunks_exact_mut(rowbytes).collect()
        };
        Ok(Self { rows, rowbytes })
    }

    pub fn rows_mut(&mut self) -> std::slice::IterMut<'_, &'b mut [u8]> {
        self.rows.iter_mut()
    }
}

impl<'b> RowTable<&'b [u8]> {
    /// Read-only table for the engine's bulk pixel write.
    pub fn over(buffer: &'b [u8], rowbytes: usize, height: usize) -> Result<Self, CodecError> {
        check_layout(buffer.len(), rowbytes, height)?;
        let rows = if rowbytes == 0 {
            Vec::new()
        } else {
            buffer.chunks_exact(rowbytes).collect()
        };
        Ok(Self { rows, rowbytes })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(|row| &**row)
    }
}

fn check_layout(len: usize, rowbytes: usize, height: usize) -> Result<(), CodecError> {
    if rowbytes.checked_mul(height) != Some(len) {
        log::error!(
            "row layout mismatch: {} rows of {} bytes over a {} byte buffer",
            height,
            rowbytes,
            len
        );
        return Err(CodecError::CodecEngineFailure);
    }
    Ok(())
}

/// Allocate the decode buffer for `format` at `width` x `height`.
///
/// `rowbytes` is what the engine reports after normalization. It must equal
/// `width * step`; anything else would misalign rows, so it fails loudly.
pub fn allocate_pixels<'l>(
    ledger: &'l Ledger,
    format: CanonicalFormat,
    width: u32,
    height: u32,
    rowbytes: usize,
) -> Result<Tracked<'l, Vec<u8>>, CodecError> {
    let expected = (width as usize).checked_mul(format.step());
    if expected != Some(rowbytes) {
        log::error!(
            "engine reported {} bytes per row for {} at width {}, expected {:?}",
            rowbytes,
            format,
            width,
            expected
        );
        return Err(CodecError::CodecEngineFailure);
    }
    let len = format
        .buffer_len(width, height)
        .ok_or(CodecError::InvalidDimensions { width, height })?;
    Ok(ledger.track(ResourceKind::PixelBuffer, vec![0u8; len]))
}
