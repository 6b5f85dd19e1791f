//! Test fixtures: synthetic PNG inputs.

use jab_palette::{IndexImage, Palette};
use jabcolor::rendering::encode_rgb_png;

/// Interleaved RGB gradient: red follows x, green follows y, blue mixes both
pub fn gradient_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width.saturating_sub(1).max(1)) as u8);
            data.push((y * 255 / height.saturating_sub(1).max(1)) as u8);
            data.push(((x + y) * 127 / (width + height).max(1)) as u8);
        }
    }
    data
}

/// Encode raw RGB bytes as an 8-bit truecolor PNG
pub fn rgb_png(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write header");
        writer
            .write_image_data(data)
            .expect("Failed to write image data");
    }
    buf
}

/// Encode 8-bit grayscale samples as a PNG
pub fn gray_png(samples: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write header");
        writer
            .write_image_data(samples)
            .expect("Failed to write image data");
    }
    buf
}

/// A PNG of exact palette colors laid out in index order
pub fn palette_swatch_png(palette: &Palette) -> Vec<u8> {
    let indices = (0..palette.len()).map(|i| i as u8).collect();
    let image = IndexImage::new(indices, palette.len(), 1, palette.clone());
    encode_rgb_png(&image).expect("Failed to encode swatch")
}
