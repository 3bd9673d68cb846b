//! File-level round-trips through the public host API, cross-checked against
//! an independent decoder.

use pngseq_core::{
    load_file, load_memory, save, save_to_vec, CanonicalFormat, CodecError, HostSequence,
    LoadedImage, Sequence,
};
use proptest::prelude::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pngseq-it-{}-{}.png", name, std::process::id()))
}

fn gradient(len: usize) -> Sequence {
    (0..len as i64).map(|i| (i * 37 + 11) % 256).collect()
}

fn check_file_round_trip(format: CanonicalFormat, width: u32, height: u32) {
    let len = format.buffer_len(width, height).unwrap();
    let seq = gradient(len);
    let path = temp_path(format.tag());

    save(&path, format.tag(), width, height, &seq).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let loaded: LoadedImage<Sequence> = load_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.format, format);
    assert_eq!((loaded.width, loaded.height), (width, height));
    assert_eq!(loaded.pixels, seq);

    // An unrelated decoder sees the same pixels
    let other = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap();
    assert_eq!((other.width(), other.height()), (width, height));
    let expected: Vec<u8> = seq.as_slice().iter().map(|&v| v as u8).collect();
    let actual = match format {
        CanonicalFormat::Gray => other.into_luma8().into_raw(),
        CanonicalFormat::Rgb8 => other.into_rgb8().into_raw(),
        CanonicalFormat::Rgba8 => other.into_rgba8().into_raw(),
    };
    assert_eq!(actual, expected);
}

#[test]
fn test_gray_file_round_trip() {
    check_file_round_trip(CanonicalFormat::Gray, 7, 5);
}

#[test]
fn test_rgb8_file_round_trip() {
    check_file_round_trip(CanonicalFormat::Rgb8, 4, 9);
}

#[test]
fn test_rgba8_file_round_trip() {
    check_file_round_trip(CanonicalFormat::Rgba8, 1, 1);
}

#[test]
fn test_image_crate_output_loads() {
    let mut rgba = image::RgbaImage::new(2, 1);
    rgba.put_pixel(0, 0, image::Rgba([1, 2, 3, 4]));
    rgba.put_pixel(1, 0, image::Rgba([250, 251, 252, 253]));
    let mut bytes = Vec::new();
    rgba.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let loaded: LoadedImage<Sequence> = load_memory(&bytes).unwrap();
    assert_eq!(loaded.format, CanonicalFormat::Rgba8);
    assert_eq!(
        loaded.pixels.into_vec(),
        vec![1, 2, 3, 4, 250, 251, 252, 253]
    );
}

#[test]
fn test_rgb8_size_check() {
    for len in [11usize, 13] {
        let seq = gradient(len);
        let err = save_to_vec("RGB8", 2, 2, &seq).unwrap_err();
        assert!(matches!(err, CodecError::SizeMismatch { expected: 12, .. }));
        assert!(err.to_string().contains("expected 12"));
    }
    assert!(save_to_vec("RGB8", 2, 2, &gradient(12)).is_ok());
}

#[test]
fn test_truncated_memory_png() {
    let bytes = save_to_vec("GRAY", 16, 16, &gradient(256)).unwrap();
    let cut = &bytes[..bytes.len() / 2];
    let result: Result<LoadedImage<Sequence>, _> = load_memory(cut);
    assert!(
        matches!(result, Err(CodecError::TruncatedInput { .. })),
        "got {:?}",
        result
    );
}

#[test]
fn test_not_a_png() {
    let result: Result<LoadedImage<Sequence>, _> = load_memory(b"GIF89a\x01\x00\x01\x00");
    assert!(matches!(result, Err(CodecError::InvalidFormat(_))));
}

fn format_strategy() -> impl Strategy<Value = CanonicalFormat> {
    prop_oneof![
        Just(CanonicalFormat::Gray),
        Just(CanonicalFormat::Rgb8),
        Just(CanonicalFormat::Rgba8),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: save then load is the identity for every canonical format.
    #[test]
    fn prop_memory_round_trip(
        format in format_strategy(),
        (width, height) in (1u32..=24, 1u32..=24),
        samples in prop::collection::vec(any::<u8>(), 24 * 24 * 4),
    ) {
        let len = format.buffer_len(width, height).unwrap();
        let seq: Sequence = samples[..len].iter().map(|&b| i64::from(b)).collect();

        let bytes = save_to_vec(format.tag(), width, height, &seq).unwrap();
        let loaded: LoadedImage<Sequence> = load_memory(&bytes).unwrap();

        prop_assert_eq!(loaded.format, format);
        prop_assert_eq!(loaded.width, width);
        prop_assert_eq!(loaded.height, height);
        prop_assert_eq!(loaded.pixels.len(), len);
        prop_assert_eq!(loaded.pixels, seq);
    }
}
