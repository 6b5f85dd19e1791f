//! Image-to-palette mapping strategies.
//!
//! Two strategies are available, both implementing [`Dither`]:
//!
//! - [`Direct`]: each pixel independently maps to its nearest palette color
//! - [`FloydSteinberg`]: error diffusion, which preserves average tone when
//!   the palette is too coarse for the image
//!
//! Error diffusion is inherently sequential: every pixel's decision depends
//! on the error left by the pixels before it. Pixels are visited row-major,
//! left to right, top to bottom, and the residuals live in an
//! [`ErrorBuffer`] owned by a single call.

mod floyd_steinberg;
mod kernel;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};

use crate::color::Rgb;
use crate::palette::{DistanceMetric, Palette};

/// Trait for palette mapping algorithms.
pub trait Dither {
    /// Map an image to palette indices.
    ///
    /// # Arguments
    ///
    /// * `image` - Input pixels, row-major
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `palette` - Target palette
    /// * `metric` - Distance used to pick the nearest color
    ///
    /// # Returns
    ///
    /// One palette index per pixel, row-major. Each index is in
    /// `0..palette.len()`.
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        metric: DistanceMetric,
    ) -> Vec<u8>;
}

/// Nearest-color mapping without error diffusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Dither for Direct {
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        metric: DistanceMetric,
    ) -> Vec<u8> {
        debug_assert_eq!(image.len(), width * height);
        palette.classify_all(image, metric)
    }
}

/// Sliding window of per-channel error rows.
///
/// Stores only the rows the kernel can reach. Residuals are signed
/// integers in the 8-bit channel scale.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After classifying a pixel, distribute error with `add_error(x, dy, error)`
///    c. After the row is complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// rows[0] is the current row, rows[1] the next, etc.
    rows: Vec<Vec<[i32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer.
    ///
    /// `row_depth` is the kernel's `max_dy + 1`.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0; 3]; width]).collect(),
            width,
        }
    }

    /// Accumulated error for a pixel in the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [i32; 3] {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [i32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Advance to the next row.
    ///
    /// The current row is discarded, the others shift forward, and a
    /// zeroed row is appended.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0; 3]);
        }
    }
}

/// Error diffusion loop parameterized by kernel.
///
/// For each pixel the accumulated error is added to the source color and
/// the sum is clamped to `0..=255`. The clamped color is classified, and
/// `working - chosen` is spread to the kernel's neighbors. Shares that
/// would land outside the image are dropped; the remaining shares are not
/// renormalized.
pub(crate) fn dither_with_kernel(
    image: &[Rgb],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
    metric: DistanceMetric,
) -> Vec<u8> {
    debug_assert_eq!(image.len(), width * height);

    let mut output = vec![0u8; width * height];
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);
    let divisor = kernel.divisor as i32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let source = image[idx];
            let acc = error_buf.get_accumulated(x);

            let working = [
                (source.r as i32 + acc[0]).clamp(0, 255),
                (source.g as i32 + acc[1]).clamp(0, 255),
                (source.b as i32 + acc[2]).clamp(0, 255),
            ];
            let sample = Rgb::new(working[0] as u8, working[1] as u8, working[2] as u8);

            let nearest = palette.classify(sample, metric);
            output[idx] = nearest as u8;

            let chosen = palette.colors()[nearest];
            let error = [
                working[0] - chosen.r as i32,
                working[1] - chosen.g as i32,
                working[2] - chosen.b as i32,
            ];
            if error == [0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                if nx < 0 || nx as usize >= width || y + dy as usize >= height {
                    continue;
                }
                let w = weight as i32;
                error_buf.add_error(
                    nx as usize,
                    dy as usize,
                    [
                        error[0] * w / divisor,
                        error[1] * w / divisor,
                        error[2] * w / divisor,
                    ],
                );
            }
        }

        error_buf.advance_row();
    }

    output
}
