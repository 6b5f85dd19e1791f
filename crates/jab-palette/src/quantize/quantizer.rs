//! Quantizer builder and the binary threshold path.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dither::{Direct, Dither, FloydSteinberg};
use crate::mode::ColorMode;
use crate::output::IndexImage;
use crate::palette::{DistanceMetric, Palette};

use super::raster::Raster;

/// When to apply error diffusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DitherPolicy {
    /// Direct mapping for palettes of 8 colors or fewer, Floyd-Steinberg
    /// for larger ones.
    #[default]
    Auto,
    /// Always map each pixel to its nearest color.
    Never,
    /// Always use Floyd-Steinberg.
    Always,
}

impl DitherPolicy {
    /// Whether a palette of `colors` entries is dithered under this policy.
    pub fn applies_to(self, colors: usize) -> bool {
        match self {
            DitherPolicy::Auto => colors > 8,
            DitherPolicy::Never => false,
            DitherPolicy::Always => true,
        }
    }
}

/// Image-to-palette quantizer.
///
/// - Constructor requires a mode or a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self`, so one quantizer can be
///   reused, and shared across threads, for any number of images
///
/// # Example
///
/// ```
/// use jab_palette::{ColorMode, DitherPolicy, Quantizer, Raster};
///
/// let pixels = [0, 250, 250, 250, 0, 250];
/// let raster = Raster::rgb(&pixels, 2, 1).unwrap();
///
/// let quantizer = Quantizer::new(ColorMode::Colors4).dither(DitherPolicy::Never);
/// let image = quantizer.quantize(&raster);
///
/// // Cyan and magenta in the default 4-color palette
/// assert_eq!(image.indices(), &[1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    palette: Palette,
    policy: DitherPolicy,
    metric: DistanceMetric,
}

impl Quantizer {
    /// Quantizer for the canonical palette of `mode`.
    pub fn new(mode: ColorMode) -> Self {
        Self::with_palette(Palette::for_mode(mode))
    }

    /// Quantizer for an explicit palette, e.g. one reconstructed from
    /// symbol metadata.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that the palette has at most 256 entries, since
    /// indices are stored as `u8`.
    pub fn with_palette(palette: Palette) -> Self {
        debug_assert!(palette.len() <= 256);
        Self {
            palette,
            policy: DitherPolicy::default(),
            metric: DistanceMetric::default(),
        }
    }

    /// Set the dithering policy.
    #[inline]
    pub fn dither(mut self, policy: DitherPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the distance metric used for nearest-color search.
    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// The palette this quantizer maps to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether error diffusion runs for this quantizer's palette.
    #[inline]
    pub fn uses_dithering(&self) -> bool {
        self.policy.applies_to(self.palette.len())
    }

    /// Map every pixel of `raster` to a palette index.
    ///
    /// Identical inputs always produce identical output.
    pub fn quantize(&self, raster: &Raster<'_>) -> IndexImage {
        let pixels = raster.to_rgb_pixels();
        let (width, height) = (raster.width(), raster.height());

        let dithered = self.uses_dithering();
        debug!(
            width,
            height,
            colors = self.palette.len(),
            dithered,
            metric = ?self.metric,
            "quantizing raster"
        );

        let indices = if dithered {
            FloydSteinberg.dither(&pixels, width, height, &self.palette, self.metric)
        } else {
            Direct.dither(&pixels, width, height, &self.palette, self.metric)
        };

        IndexImage::new(indices, width, height, self.palette.clone())
    }
}

/// Luma at or above which a pixel is white in [`binarize`].
pub const BINARY_THRESHOLD: u8 = 128;

/// Two-color quantization by luma threshold.
///
/// A pixel is white (index 1 of [`Palette::binary`]) when its rounded
/// Rec. 601 luma `0.299 R + 0.587 G + 0.114 B` is at least
/// [`BINARY_THRESHOLD`], and black (index 0) otherwise.
///
/// # Example
///
/// ```
/// use jab_palette::{binarize, Raster};
///
/// let pixels = [0, 0, 0, 255, 255, 255];
/// let image = binarize(&Raster::rgb(&pixels, 2, 1).unwrap());
/// assert_eq!(image.indices(), &[0, 1]);
/// ```
pub fn binarize(raster: &Raster<'_>) -> IndexImage {
    let indices = raster
        .pixels()
        .map(|px| u8::from(px.luma() >= BINARY_THRESHOLD))
        .collect();
    IndexImage::new(
        indices,
        raster.width(),
        raster.height(),
        Palette::binary(),
    )
}
