//! pngseq Core - PNG codec bridge
//!
//! This crate loads PNG images into flat 8-bit pixel buffers and saves them
//! back, exchanging pixels with a host scripting environment as 1-indexed
//! numeric sequences. Any PNG color type and bit depth is normalized on load
//! to one of three canonical formats: GRAY, RGB8 or RGBA8.

pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod format;
pub mod guard;
pub mod host;
pub mod marshal;
pub mod rows;
pub mod source;

#[cfg(test)]
mod fixtures;

pub use config::CodecOptions;
pub use decode::{decode_file, decode_memory, DecodedImage};
pub use encode::EncodeRequest;
pub use error::CodecError;
pub use format::CanonicalFormat;
pub use host::{load_file, load_memory, save, save_to_vec, LoadedImage};
pub use marshal::{HostSequence, HostSequenceBuilder, Sequence};

/// Crate version, as reported to hosts.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
