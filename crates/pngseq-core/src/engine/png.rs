//! Engine implementations backed by the `png` crate.

use std::io::{Read, Seek, SeekFrom, Write};

use png::{BitDepth, ColorType, Transformations};

use super::{
    out_of_order, ColorArrangement, DecodeEngine, Directive, EncodeEngine, EncodeParams, Header,
    OutputInfo,
};
use crate::config::CodecOptions;
use crate::rows::RowTable;
use crate::CodecError;

fn decoding_error(e: png::DecodingError) -> CodecError {
    match e {
        png::DecodingError::IoError(io) => CodecError::from_engine_io(&io),
        other => {
            log::debug!("png decoder aborted: {}", other);
            CodecError::CodecEngineFailure
        }
    }
}

fn encoding_error(e: png::EncodingError) -> CodecError {
    match e {
        png::EncodingError::IoError(io) => CodecError::from(io),
        other => {
            log::debug!("png encoder aborted: {}", other);
            CodecError::CodecEngineFailure
        }
    }
}

fn arrangement(color: ColorType) -> ColorArrangement {
    match color {
        ColorType::Grayscale => ColorArrangement::Gray,
        ColorType::GrayscaleAlpha => ColorArrangement::GrayAlpha,
        ColorType::Rgb => ColorArrangement::Rgb,
        ColorType::Rgba => ColorArrangement::Rgba,
        ColorType::Indexed => ColorArrangement::Palette,
    }
}

fn color_type(color: ColorArrangement) -> ColorType {
    match color {
        ColorArrangement::Gray => ColorType::Grayscale,
        ColorArrangement::GrayAlpha => ColorType::GrayscaleAlpha,
        ColorArrangement::Rgb => ColorType::Rgb,
        ColorArrangement::Rgba => ColorType::Rgba,
        ColorArrangement::Palette => ColorType::Indexed,
    }
}

fn new_decoder<T: Read>(input: T, limit_bytes: Option<usize>) -> png::Decoder<T> {
    let mut decoder = match limit_bytes {
        Some(bytes) => png::Decoder::new_with_limits(input, png::Limits { bytes }),
        None => png::Decoder::new(input),
    };
    decoder.set_ignore_text_chunk(true);
    decoder
}

/// Decoder over any seekable input.
///
/// The header is read by a probe pass that parses every chunk up to the
/// image data (so a tRNS chunk is visible), then rewinds. Directives are
/// committed on a second pass, which is the one that decodes pixels.
pub struct PngDecodeEngine<R: Read + Seek> {
    input: Option<R>,
    reader: Option<png::Reader<R>>,
    limit_bytes: Option<usize>,
    transformations: Transformations,
    header: Option<Header>,
    needs_finish: bool,
}

impl<R: Read + Seek> PngDecodeEngine<R> {
    pub fn new(input: R, options: &CodecOptions) -> Self {
        Self {
            input: Some(input),
            reader: None,
            limit_bytes: options.max_decode_bytes,
            transformations: Transformations::IDENTITY,
            header: None,
            needs_finish: false,
        }
    }
}

impl<R: Read + Seek> DecodeEngine for PngDecodeEngine<R> {
    fn read_header(&mut self) -> Result<Header, CodecError> {
        let limit_bytes = self.limit_bytes;
        let input = self.input.as_mut().ok_or_else(|| out_of_order("read_header"))?;
        let start = input
            .stream_position()
            .map_err(|e| CodecError::from_engine_io(&e))?;

        let header = {
            let mut probe = new_decoder(&mut *input, limit_bytes);
            probe.set_transformations(Transformations::IDENTITY);
            let reader = probe.read_info().map_err(decoding_error)?;
            let info = reader.info();
            Header {
                width: info.width,
                height: info.height,
                bit_depth: info.bit_depth as u8,
                color: arrangement(info.color_type),
                interlaced: info.interlaced,
                has_transparency: info.trns.is_some(),
            }
        };

        input
            .seek(SeekFrom::Start(start))
            .map_err(|e| CodecError::from_engine_io(&e))?;
        self.header = Some(header);
        Ok(header)
    }

    fn apply(&mut self, directive: Directive) {
        // The png crate folds palette, low-depth gray, tRNS and unpacking into
        // one EXPAND transform; it is a no-op where it has nothing to do.
        self.transformations |= match directive {
            Directive::PaletteToRgb
            | Directive::ExpandGray
            | Directive::TransparencyToAlpha
            | Directive::Pack => Transformations::EXPAND,
            Directive::Strip16 => Transformations::STRIP_16,
        };
    }

    fn update_info(&mut self) -> Result<OutputInfo, CodecError> {
        let header = self.header.ok_or_else(|| out_of_order("update_info"))?;
        let input = self.input.take().ok_or_else(|| out_of_order("update_info"))?;

        let mut decoder = new_decoder(input, self.limit_bytes);
        decoder.set_transformations(self.transformations);
        let reader = decoder.read_info().map_err(decoding_error)?;

        let (color, depth) = reader.output_color_type();
        let info = OutputInfo {
            color: arrangement(color),
            bit_depth: depth as u8,
            rowbytes: reader.output_line_size(header.width),
        };
        self.reader = Some(reader);
        Ok(info)
    }

    fn read_image(&mut self, rows: &mut RowTable<&mut [u8]>) -> Result<(), CodecError> {
        let header = self.header.ok_or_else(|| out_of_order("read_image"))?;
        let reader = self.reader.as_mut().ok_or_else(|| out_of_order("read_image"))?;

        if header.interlaced {
            // Adam7 passes do not map onto rows; let the engine deinterlace
            // into a scratch frame and copy rows out of it.
            let mut frame = vec![0u8; reader.output_buffer_size()];
            reader.next_frame(&mut frame).map_err(decoding_error)?;
            let line = rows.rowbytes();
            if line == 0 || frame.len() != line * rows.height() {
                log::error!(
                    "deinterlaced frame of {} bytes does not fit {} rows of {}",
                    frame.len(),
                    rows.height(),
                    line
                );
                return Err(CodecError::CodecEngineFailure);
            }
            for (row, src) in rows.rows_mut().zip(frame.chunks_exact(line)) {
                row.copy_from_slice(src);
            }
            // `next_frame` stops after the image data; the trailer is still unread
            self.needs_finish = true;
            return Ok(());
        }

        for (y, row) in rows.rows_mut().enumerate() {
            let next = reader.next_row().map_err(decoding_error)?;
            let Some(next) = next else {
                log::debug!("png decoder ran out of rows at {}", y);
                return Err(CodecError::CodecEngineFailure);
            };
            let data = next.data();
            if data.len() != row.len() {
                log::error!(
                    "png decoder produced a {} byte row, expected {}",
                    data.len(),
                    row.len()
                );
                return Err(CodecError::CodecEngineFailure);
            }
            row.copy_from_slice(data);
        }
        self.needs_finish = true;
        Ok(())
    }

    fn read_end(&mut self) -> Result<(), CodecError> {
        let reader = self.reader.as_mut().ok_or_else(|| out_of_order("read_end"))?;
        if self.needs_finish {
            reader.finish().map_err(decoding_error)?;
            self.needs_finish = false;
        }
        Ok(())
    }
}

/// Encoder writing a single non-interlaced image to `W`.
pub struct PngEncodeEngine<W: Write> {
    output: Option<W>,
    writer: Option<png::Writer<W>>,
}

impl<W: Write> PngEncodeEngine<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Some(output),
            writer: None,
        }
    }
}

impl<W: Write> EncodeEngine for PngEncodeEngine<W> {
    fn write_header(&mut self, params: &EncodeParams) -> Result<(), CodecError> {
        let output = self.output.take().ok_or_else(|| out_of_order("write_header"))?;
        if params.bit_depth != 8 {
            log::error!("png encoder asked for bit depth {}", params.bit_depth);
            return Err(CodecError::CodecEngineFailure);
        }

        let mut encoder = png::Encoder::new(output, params.width, params.height);
        encoder.set_color(color_type(params.color));
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        if params.placeholder_palette {
            encoder.set_palette(vec![0u8; 256 * 3]);
        }
        let writer = encoder.write_header().map_err(encoding_error)?;
        self.writer = Some(writer);
        Ok(())
    }

    fn write_image(&mut self, rows: &RowTable<&[u8]>) -> Result<(), CodecError> {
        let writer = self.writer.as_mut().ok_or_else(|| out_of_order("write_image"))?;
        let mut stream = writer.stream_writer().map_err(encoding_error)?;
        for row in rows.rows() {
            stream.write_all(row)?;
        }
        stream.finish().map_err(encoding_error)
    }

    fn write_end(&mut self) -> Result<(), CodecError> {
        let writer = self.writer.take().ok_or_else(|| out_of_order("write_end"))?;
        writer.finish().map_err(encoding_error)
    }
}
