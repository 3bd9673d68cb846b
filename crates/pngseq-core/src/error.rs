//! Error type shared by the decode and encode paths.

use thiserror::Error;

/// Errors surfaced by `load`/`save` and the components beneath them.
///
/// Every failure terminates the call. There is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// File open/read/write failure, carrying the system message.
    #[error("{0}")]
    IoError(String),

    /// Signature check failed, or the input is too short to hold one.
    #[error("Invalid PNG: {0}")]
    InvalidFormat(String),

    /// A bounds-checked memory read would run past the end of the blob.
    #[error("Truncated input: {requested} bytes requested at offset {offset} of {size}")]
    TruncatedInput {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// The normalized output is not one of GRAY, RGB8 or RGBA8.
    #[error("PNG color type {0} not supported")]
    UnsupportedColorType(String),

    /// Unknown format tag on the encode side.
    #[error("PNG type {0} not supported")]
    UnsupportedFormat(String),

    /// Encode-side pixel sequence length does not match the declared shape.
    #[error("Data number {got} invalid: expected {expected}, got {got}, from {width}*{height}*{step}")]
    SizeMismatch {
        got: usize,
        expected: usize,
        width: u32,
        height: u32,
        step: usize,
    },

    /// Width or height is zero, or their product overflows.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec engine aborted. Engine detail is logged, not carried.
    #[error("PNG codec engine failure")]
    CodecEngineFailure,
}

impl From<std::io::Error> for CodecError {
    fn from(e: std::io::Error) -> Self {
        CodecError::IoError(e.to_string())
    }
}

impl CodecError {
    /// Recover a `TruncatedInput` that travelled through the engine as an
    /// `io::Error`, or collapse anything else into `CodecEngineFailure`.
    pub(crate) fn from_engine_io(e: &std::io::Error) -> Self {
        if let Some(inner) = e.get_ref().and_then(|r| r.downcast_ref::<CodecError>()) {
            return inner.clone();
        }
        log::debug!("codec engine I/O failure: {}", e);
        CodecError::CodecEngineFailure
    }
}
