//! Transcoding between flat pixel buffers and host sequences.
//!
//! Hosts hand pixels around as ordered numeric containers indexed from 1.
//! The marshaler only needs positional reads and writes, so a host plugs in
//! by implementing [`HostSequence`] (read side) and/or [`HostSequenceBuilder`]
//! (write side). [`Sequence`] is the in-process implementation.

use crate::{CanonicalFormat, CodecError};

/// Read access to a host's 1-indexed ordered container.
pub trait HostSequence {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Integer value at 1-based `position`; `None` if the element is missing
    /// or not a number.
    fn get(&self, position: usize) -> Option<i64>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to a host's 1-indexed ordered container.
pub trait HostSequenceBuilder: Sized {
    /// Container presized for `len` elements.
    fn with_len(len: usize) -> Self;

    /// Store `value` at 1-based `position`.
    fn set(&mut self, position: usize, value: i64);
}

/// Owned 1-indexed integer sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<i64>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values in position order, starting at position 1.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.values
    }
}

impl From<Vec<i64>> for Sequence {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}

impl FromIterator<i64> for Sequence {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl HostSequence for Sequence {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, position: usize) -> Option<i64> {
        position
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }
}

impl HostSequenceBuilder for Sequence {
    fn with_len(len: usize) -> Self {
        Self {
            values: vec![0; len],
        }
    }

    fn set(&mut self, position: usize, value: i64) {
        if let Some(slot) = position
            .checked_sub(1)
            .and_then(|i| self.values.get_mut(i))
        {
            *slot = value;
        }
    }
}

/// Widen every byte of `pixels` into a host sequence, byte `i` at position
/// `i + 1`.
pub fn to_sequence<S: HostSequenceBuilder>(pixels: &[u8]) -> S {
    let mut out = S::with_len(pixels.len());
    for (i, &sample) in pixels.iter().enumerate() {
        out.set(i + 1, i64::from(sample));
    }
    out
}

/// Host value to sample byte: non-numbers read as 0, and out-of-range
/// integers keep their low 8 bits.
#[inline]
fn sample(value: Option<i64>) -> u8 {
    value.unwrap_or(0) as u8
}

/// Pack a host sequence into a flat buffer for `format` at
/// `width` x `height`.
///
/// The length must match `width * height * step` exactly. Each pixel reads
/// exactly `step` consecutive elements, never more.
pub fn from_sequence<Q: HostSequence + ?Sized>(
    sequence: &Q,
    format: CanonicalFormat,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, CodecError> {
    let step = format.step();
    let expected = format.image_len(width, height)?;
    let got = sequence.len();
    if got != expected {
        return Err(CodecError::SizeMismatch {
            got,
            expected,
            width,
            height,
            step,
        });
    }

    let mut buffer = vec![0u8; expected];
    for (pixel, samples) in buffer.chunks_exact_mut(step).enumerate() {
        let base = pixel * step;
        for (channel, slot) in samples.iter_mut().enumerate() {
            *slot = sample(sequence.get(base + channel + 1));
        }
    }
    Ok(buffer)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = CanonicalFormat> {
        prop_oneof![
            Just(CanonicalFormat::Gray),
            Just(CanonicalFormat::Rgb8),
            Just(CanonicalFormat::Rgba8),
        ]
    }

    proptest! {
        /// Property: marshaling out and back in is the identity on bytes.
        #[test]
        fn prop_sequence_preserves_bytes(
            format in format_strategy(),
            (width, height) in (1u32..=12, 1u32..=12),
            seed in any::<u64>(),
        ) {
            let len = format.buffer_len(width, height).unwrap();
            let pixels: Vec<u8> = (0..len)
                .map(|i| (seed.wrapping_mul(i as u64 + 1) >> 7) as u8)
                .collect();
            let seq: Sequence = to_sequence(&pixels);
            prop_assert_eq!(seq.len(), len);
            let back = from_sequence(&seq, format, width, height).unwrap();
            prop_assert_eq!(back, pixels);
        }

        /// Property: any length other than width * height * step is rejected.
        #[test]
        fn prop_wrong_length_rejected(
            format in format_strategy(),
            (width, height) in (1u32..=12, 1u32..=12),
            delta in -5i64..=5,
        ) {
            prop_assume!(delta != 0);
            let expected = format.buffer_len(width, height).unwrap();
            let len = expected as i64 + delta;
            prop_assume!(len >= 0);
            let seq = Sequence::with_len(len as usize);
            let is_size_mismatch = matches!(
                from_sequence(&seq, format, width, height),
                Err(CodecError::SizeMismatch { .. })
            );
            prop_assert!(is_size_mismatch);
        }
    }
}
