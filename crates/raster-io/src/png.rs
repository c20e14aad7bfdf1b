//! PNG format support.
//!
//! Every PNG variant is normalized to RGBA8 on decode: palettes and
//! transparency chunks are expanded, 16-bit samples are stripped to 8 bits,
//! grayscale is replicated into R, G and B, and missing alpha is opaque.
//! Encoding always writes 8-bit RGBA with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,ignore
//! use raster_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use std::io::Cursor;
use std::path::Path;

use raster_core::PixelBuffer;
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let bytes = std::fs::read(path.as_ref())?;
    decode(&bytes)
}

/// Decodes PNG bytes into an RGBA8 buffer.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let data = &buf[..info.buffer_size()];
    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(IoError::UnsupportedBitDepth("unexpanded palette".into()));
        }
    };

    debug!(width = info.width, height = info.height, color = ?info.color_type, "decoded PNG");
    Ok(PixelBuffer::new(info.width, info.height, rgba)?)
}

/// Writes a buffer to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let bytes = encode(image)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes a buffer as RGBA8 PNG bytes.
pub fn encode(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::default());
        encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

        let mut png_writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer
            .write_image_data(image.pixels())
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer
            .finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
    }
    debug!(width = image.width(), height = image.height(), bytes = out.len(), "encoded PNG");
    Ok(out)
}
