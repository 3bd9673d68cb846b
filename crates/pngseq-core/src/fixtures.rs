//! Synthetic PNG files for unit tests, written with the `png` encoder so
//! every color type and bit depth can be produced on demand.

use png::{BitDepth, ColorType};

fn build(
    width: u32,
    height: u32,
    color: ColorType,
    depth: BitDepth,
    palette: Option<&[u8]>,
    trns: Option<&[u8]>,
    data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette.to_vec());
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns.to_vec());
        }
        let mut writer = encoder.write_header().expect("fixture header");
        writer.write_image_data(data).expect("fixture data");
        writer.finish().expect("fixture end");
    }
    out
}

/// Plain image of the given color type and depth. `data` is packed rows.
pub(crate) fn encode(
    width: u32,
    height: u32,
    color: ColorType,
    depth: BitDepth,
    data: &[u8],
) -> Vec<u8> {
    build(width, height, color, depth, None, None, data)
}

/// Image carrying a tRNS chunk.
pub(crate) fn encode_with_trns(
    width: u32,
    height: u32,
    color: ColorType,
    depth: BitDepth,
    trns: &[u8],
    data: &[u8],
) -> Vec<u8> {
    build(width, height, color, depth, None, Some(trns), data)
}

/// 8-bit indexed image; `palette` is packed RGB triples.
pub(crate) fn palette_png(
    palette: &[u8],
    trns: Option<&[u8]>,
    width: u32,
    height: u32,
    indices: &[u8],
) -> Vec<u8> {
    build(
        width,
        height,
        ColorType::Indexed,
        BitDepth::Eight,
        Some(palette),
        trns,
        indices,
    )
}

/// Whether a chunk with this 4-byte type appears anywhere in the stream.
pub(crate) fn has_chunk(bytes: &[u8], tag: &[u8; 4]) -> bool {
    bytes.windows(4).any(|w| w == tag)
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = !0u32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

fn adler32(bytes: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in bytes {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }
    (b << 16) | a
}

fn chunk(out: &mut Vec<u8>, kind: &[u8; 4], body: &[u8]) {
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    let start = out.len();
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    let crc = crc32(&out[start..]);
    out.extend_from_slice(&crc.to_be_bytes());
}

/// 2x2 8-bit gray image stored with Adam7 interlacing, `pixels` in row-major
/// order.
///
/// The `png` encoder cannot interlace, so the stream is assembled by hand
/// with a single stored deflate block. At 2x2 only passes 1, 6 and 7 carry
/// pixels: (0,0), then (1,0), then the whole second row.
pub(crate) fn interlaced_gray_2x2(pixels: [u8; 4]) -> Vec<u8> {
    let raw = [0, pixels[0], 0, pixels[1], 0, pixels[2], pixels[3]];

    let mut zlib = vec![0x78, 0x01, 0x01];
    zlib.extend_from_slice(&(raw.len() as u16).to_le_bytes());
    zlib.extend_from_slice(&(!(raw.len() as u16)).to_le_bytes());
    zlib.extend_from_slice(&raw);
    zlib.extend_from_slice(&adler32(&raw).to_be_bytes());

    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&2u32.to_be_bytes());
    ihdr.extend_from_slice(&2u32.to_be_bytes());
    // depth 8, gray, deflate, adaptive filtering, Adam7
    ihdr.extend_from_slice(&[8, 0, 0, 0, 1]);

    let mut out = vec![137, 80, 78, 71, 13, 10, 26, 10];
    chunk(&mut out, b"IHDR", &ihdr);
    chunk(&mut out, b"IDAT", &zlib);
    chunk(&mut out, b"IEND", &[]);
    out
}
