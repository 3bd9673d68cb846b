//! Entry points for a host scripting environment.
//!
//! `load` yields the canonical format tag, the dimensions and the pixels as
//! a host sequence. `save` takes the same shape back. The host supplies its
//! container through the [`marshal`](crate::marshal) traits.

use std::path::Path;

use crate::config::CodecOptions;
use crate::decode::{self, DecodedImage};
use crate::encode::{self, EncodeRequest};
use crate::marshal::{self, HostSequence, HostSequenceBuilder};
use crate::source::ByteSource;
use crate::{CanonicalFormat, CodecError};

/// A decoded image as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage<S> {
    pub format: CanonicalFormat,
    pub width: u32,
    pub height: u32,
    /// One element per byte, positions `1..=width*height*step`.
    pub pixels: S,
}

impl<S: HostSequenceBuilder> LoadedImage<S> {
    fn from_decoded(image: DecodedImage) -> Self {
        Self {
            format: image.format,
            width: image.width,
            height: image.height,
            pixels: marshal::to_sequence(&image.pixels),
        }
    }
}

/// Decode the PNG file at `path`.
pub fn load_file<S: HostSequenceBuilder>(
    path: impl AsRef<Path>,
) -> Result<LoadedImage<S>, CodecError> {
    load_with_options(ByteSource::open(path)?, &CodecOptions::default())
}

/// Decode a PNG held in memory.
pub fn load_memory<S: HostSequenceBuilder>(bytes: &[u8]) -> Result<LoadedImage<S>, CodecError> {
    load_with_options(ByteSource::from_memory(bytes)?, &CodecOptions::default())
}

/// Decode from an already-validated source.
pub fn load_with_options<S: HostSequenceBuilder>(
    source: ByteSource<'_>,
    options: &CodecOptions,
) -> Result<LoadedImage<S>, CodecError> {
    decode::decode_with_options(source, options).map(LoadedImage::from_decoded)
}

/// Encode `sequence` as a `tag` image and write it to `path`.
pub fn save<Q: HostSequence + ?Sized>(
    path: impl AsRef<Path>,
    tag: &str,
    width: u32,
    height: u32,
    sequence: &Q,
) -> Result<(), CodecError> {
    save_with_options(path, tag, width, height, sequence, &CodecOptions::default())
}

pub fn save_with_options<Q: HostSequence + ?Sized>(
    path: impl AsRef<Path>,
    tag: &str,
    width: u32,
    height: u32,
    sequence: &Q,
    options: &CodecOptions,
) -> Result<(), CodecError> {
    let request = EncodeRequest::from_sequence(tag, width, height, sequence)?;
    encode::write_file(path, request, options)
}

/// Encode `sequence` as a `tag` image into a PNG byte stream.
pub fn save_to_vec<Q: HostSequence + ?Sized>(
    tag: &str,
    width: u32,
    height: u32,
    sequence: &Q,
) -> Result<Vec<u8>, CodecError> {
    save_to_vec_with_options(tag, width, height, sequence, &CodecOptions::default())
}

pub fn save_to_vec_with_options<Q: HostSequence + ?Sized>(
    tag: &str,
    width: u32,
    height: u32,
    sequence: &Q,
    options: &CodecOptions,
) -> Result<Vec<u8>, CodecError> {
    let request = EncodeRequest::from_sequence(tag, width, height, sequence)?;
    encode::write_vec(request, options)
}
