//! IndexImage struct: palette indices plus the palette they refer to.

use crate::color::Rgb;
use crate::palette::Palette;

/// A quantized image.
///
/// Stores one `u8` palette index per pixel in row-major order, along with
/// the image dimensions and the palette used. The palette is a cheap
/// shared clone, so returning it by value costs nothing.
///
/// # Example
///
/// ```
/// use jab_palette::{IndexImage, Palette};
///
/// // 2x2 checkerboard over black/white
/// let image = IndexImage::new(vec![0, 1, 1, 0], 2, 2, Palette::binary());
///
/// assert_eq!(image.get(1, 0), Some(1));
/// assert_eq!(image.to_rgb().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexImage {
    /// Create an image from palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height` and that every
    /// index is in `0..palette.len()`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        debug_assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Consume the image and return its index buffer.
    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Index at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.indices[y * self.width + x])
        } else {
            None
        }
    }

    /// Palette color at `(x, y)`, or `None` outside the image.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        self.get(x, y).and_then(|i| self.palette.get(i as usize))
    }

    /// Render to RGB bytes in `[R, G, B, R, G, B, ...]` layout.
    ///
    /// Every pixel is exactly one of the palette colors. The buffer has
    /// length `width * height * 3`.
    pub fn to_rgb(&self) -> Vec<u8> {
        let colors = self.palette.colors();
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&colors[idx as usize].to_bytes());
        }
        rgb
    }

    /// Number of pixels using each palette index.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }
}
