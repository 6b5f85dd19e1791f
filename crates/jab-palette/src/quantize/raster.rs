//! Borrowed interleaved pixel buffer.

use crate::color::Rgb;
use crate::error::CodecError;

/// An interleaved 8-bit RGB or RGBA image borrowed from the caller.
///
/// The alpha channel of RGBA input is ignored; quantization only looks at
/// R, G and B.
///
/// # Example
///
/// ```
/// use jab_palette::Raster;
///
/// let data = [255, 0, 0, 255, 0, 0, 255, 255];
/// let raster = Raster::new(&data, 2, 1, 4).unwrap();
/// assert_eq!(raster.pixel(1, 0).b, 255);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
}

impl<'a> Raster<'a> {
    /// Wrap `data` as a `width` x `height` image with `channels` bytes per
    /// pixel.
    ///
    /// # Errors
    ///
    /// - [`CodecError::UnsupportedChannelCount`] unless `channels` is 3 or 4
    /// - [`CodecError::RasterTooLarge`] if `width * height * channels`
    ///   overflows `usize`
    /// - [`CodecError::RasterSizeMismatch`] if `data.len()` is not
    ///   `width * height * channels`
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, CodecError> {
        if channels != 3 && channels != 4 {
            return Err(CodecError::UnsupportedChannelCount(channels));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(CodecError::RasterTooLarge {
                width,
                height,
                channels,
            })?;
        if data.len() != expected {
            return Err(CodecError::RasterSizeMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Shorthand for a 3-channel raster.
    pub fn rgb(data: &'a [u8], width: usize, height: usize) -> Result<Self, CodecError> {
        Self::new(data, width, height, 3)
    }

    /// Shorthand for a 4-channel raster.
    pub fn rgba(data: &'a [u8], width: usize, height: usize) -> Result<Self, CodecError> {
        Self::new(data, width, height, 4)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let offset = (y * self.width + x) * self.channels;
        Rgb::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        )
    }

    /// Iterate over all pixels, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + 'a {
        self.data
            .chunks_exact(self.channels)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Collect all pixels, row-major, dropping alpha.
    pub fn to_rgb_pixels(&self) -> Vec<Rgb> {
        self.pixels().collect()
    }
}
