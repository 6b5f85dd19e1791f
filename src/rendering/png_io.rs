use std::io::Cursor;
use std::path::Path;

use jab_palette::{IndexImage, Palette, Raster, Rgb};

use crate::error::ImageIoError;

/// A decoded 8-bit RGB or RGBA image that owns its pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// 3 (RGB) or 4 (RGBA)
    pub channels: usize,
}

impl DecodedImage {
    /// Borrow the pixels as a [`Raster`] for quantization.
    pub fn raster(&self) -> Result<Raster<'_>, ImageIoError> {
        Ok(Raster::new(
            &self.data,
            self.width,
            self.height,
            self.channels,
        )?)
    }
}

/// Read a PNG file from disk. See [`decode_png`].
pub fn read_png(path: &Path) -> Result<DecodedImage, ImageIoError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Decode any PNG into 8-bit RGB or RGBA.
///
/// Indexed images are expanded through their PLTE, 16-bit samples are
/// stripped to 8 bits and grayscale is widened to RGB.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ImageIoError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageIoError::PngDecode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageIoError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(ImageIoError::UnsupportedPng(format!(
            "bit depth {:?} after expansion",
            frame.bit_depth
        )));
    }

    let width = frame.width as usize;
    let height = frame.height as usize;
    let (data, channels) = match frame.color_type {
        png::ColorType::Rgb => (buf, 3),
        png::ColorType::Rgba => (buf, 4),
        png::ColorType::Grayscale => (buf.iter().flat_map(|&v| [v, v, v]).collect(), 3),
        png::ColorType::GrayscaleAlpha => (
            buf.chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
            4,
        ),
        png::ColorType::Indexed => {
            return Err(ImageIoError::UnsupportedPng(
                "indexed image without a palette".to_string(),
            ))
        }
    };

    tracing::debug!(width, height, channels, "Decoded PNG");
    Ok(DecodedImage {
        data,
        width,
        height,
        channels,
    })
}

/// Decode an indexed PNG, keeping its palette indices instead of
/// expanding them to colors.
pub fn decode_indexed_png(bytes: &[u8]) -> Result<IndexImage, ImageIoError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageIoError::PngDecode(e.to_string()))?;

    let plte: Vec<Rgb> = match reader.info().palette.as_deref() {
        Some(plte) => plte
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect(),
        None => {
            return Err(ImageIoError::UnsupportedPng(
                "image has no PLTE chunk".to_string(),
            ))
        }
    };
    let palette = Palette::new(&plte).map_err(jab_palette::CodecError::from)?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageIoError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    if frame.color_type != png::ColorType::Indexed {
        return Err(ImageIoError::UnsupportedPng(format!(
            "expected an indexed image, found {:?}",
            frame.color_type
        )));
    }

    let width = frame.width as usize;
    let height = frame.height as usize;
    let bits = frame.bit_depth as u8;
    let indices = if bits == 8 {
        buf
    } else {
        unpack_nbits(&buf, width, height, bits, frame.line_size)
    };

    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= palette.len()) {
        return Err(ImageIoError::UnsupportedPng(format!(
            "index {bad} is outside the {}-entry palette",
            palette.len()
        )));
    }

    Ok(IndexImage::new(indices, width, height, palette))
}

/// Encode an index image as an indexed PNG.
///
/// The PLTE chunk holds the image palette in index order, so a reader that
/// resolves pixels through PLTE sees exactly the palette colors. The bit
/// depth is the smallest of 1, 2, 4 or 8 that fits the palette.
pub fn encode_indexed_png(image: &IndexImage) -> Result<Vec<u8>, ImageIoError> {
    let palette = image.palette();
    if palette.len() > 256 {
        return Err(ImageIoError::UnsupportedPng(format!(
            "{} palette entries exceed the PLTE limit",
            palette.len()
        )));
    }

    let plte: Vec<u8> = palette.iter().flat_map(Rgb::to_bytes).collect();
    let bits = index_bit_depth(palette.len());
    let (depth, packed) = match bits {
        8 => (png::BitDepth::Eight, image.indices().to_vec()),
        4 => (png::BitDepth::Four, pack_nbits(image.indices(), image.width(), 4)),
        2 => (png::BitDepth::Two, pack_nbits(image.indices(), image.width(), 2)),
        _ => (png::BitDepth::One, pack_nbits(image.indices(), image.width(), 1)),
    };

    encode_png(
        image.width(),
        image.height(),
        png::ColorType::Indexed,
        depth,
        Some(&plte),
        &packed,
    )
}

/// Encode an index image as a truecolor RGB PNG.
pub fn encode_rgb_png(image: &IndexImage) -> Result<Vec<u8>, ImageIoError> {
    encode_png(
        image.width(),
        image.height(),
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        &image.to_rgb(),
    )
}

fn encode_png(
    width: usize,
    height: usize,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, ImageIoError> {
    let width = u32::try_from(width)
        .map_err(|_| ImageIoError::PngEncode(format!("width {width} is too large")))?;
    let height = u32::try_from(height)
        .map_err(|_| ImageIoError::PngEncode(format!("height {height} is too large")))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Default);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageIoError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ImageIoError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Smallest PNG bit depth able to address `colors` palette entries.
fn index_bit_depth(colors: usize) -> u8 {
    match colors {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

/// Inverse of [`pack_nbits`]. `line_size` is the packed row length,
/// which may include padding bits at the end of each row.
fn unpack_nbits(packed: &[u8], width: usize, height: usize, bits: u8, line_size: usize) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    let mut indices = Vec::with_capacity(width * height);

    for row in packed.chunks(line_size.max(1)).take(height) {
        for x in 0..width {
            let byte = row[x / pixels_per_byte];
            let shift = (8 - bits) - (x % pixels_per_byte) as u8 * bits;
            indices.push((byte >> shift) & mask);
        }
    }

    indices
}
