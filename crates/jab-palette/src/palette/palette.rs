//! Palette struct and nearest-color classification.
//!
//! This module provides the core `Palette` type: an immutable, ordered list
//! of distinct colors where the index of each entry is the bit pattern a
//! module of that color carries.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::PaletteError;
use crate::color::Rgb;

/// Distance metric for palette color matching.
///
/// Both metrics are used in practice: plain Euclidean distance for raw
/// module classification, and a luma-weighted variant where
/// contrast-driven matching is preferred. The metric is always chosen by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean distance in RGB space: `sqrt(dR² + dG² + dB²)`.
    #[default]
    Euclidean,

    /// Luma-weighted distance: `sqrt(0.299 dR² + 0.587 dG² + 0.114 dB²)`.
    LumaWeighted,
}

impl DistanceMetric {
    /// Distance between two colors under this metric.
    ///
    /// # Example
    ///
    /// ```
    /// use jab_palette::{DistanceMetric, Rgb};
    ///
    /// let d = DistanceMetric::Euclidean.distance(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0));
    /// assert_eq!(d, 5.0);
    /// ```
    pub fn distance(self, a: Rgb, b: Rgb) -> f64 {
        match self {
            DistanceMetric::Euclidean => (self.score(a, b) as f64).sqrt(),
            DistanceMetric::LumaWeighted => (self.score(a, b) as f64 / 1000.0).sqrt(),
        }
    }

    /// Monotone integer form of [`distance`](Self::distance) used for
    /// comparisons.
    ///
    /// Euclidean returns the squared distance; luma-weighted returns the
    /// squared distance scaled by 1000 so the weights stay integral. Exact
    /// integer comparison keeps ties reproducible across platforms.
    #[inline]
    pub(crate) fn score(self, a: Rgb, b: Rgb) -> u64 {
        let dr = (a.r as i64 - b.r as i64).pow(2) as u64;
        let dg = (a.g as i64 - b.g as i64).pow(2) as u64;
        let db = (a.b as i64 - b.b as i64).pow(2) as u64;
        match self {
            DistanceMetric::Euclidean => dr + dg + db,
            DistanceMetric::LumaWeighted => 299 * dr + 587 * dg + 114 * db,
        }
    }
}

/// An immutable, ordered color palette.
///
/// Entries are distinct and indexed from 0; the index is the value a module
/// of that color encodes. Cloning is cheap (the color list is shared), so
/// palettes can be handed to any number of threads.
///
/// Canonical palettes for the seven JAB Code modes come from
/// [`Palette::for_mode`]; arbitrary palettes (e.g. decoded from symbol
/// metadata) are built with [`Palette::new`].
///
/// # Example
///
/// ```
/// use jab_palette::{DistanceMetric, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.classify(Rgb::new(200, 210, 190), DistanceMetric::Euclidean), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Arc<[Rgb]>,
}

impl Palette {
    /// Largest palette whose indices fit in a `u8`.
    pub const MAX_COLORS: usize = 256;

    /// Create a palette from an ordered color list.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if there are more than
    ///   [`Palette::MAX_COLORS`] entries
    /// - [`PaletteError::DuplicateColor`] if a color appears twice (the
    ///   index reported is the second occurrence)
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > Self::MAX_COLORS {
            return Err(PaletteError::TooManyColors(colors.len()));
        }

        let mut seen = HashSet::with_capacity(colors.len());
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self {
            colors: colors.into(),
        })
    }

    /// Create a palette from `[R, G, B]` byte triples.
    pub fn from_bytes(colors: &[[u8; 3]]) -> Result<Self, PaletteError> {
        let colors: Vec<Rgb> = colors.iter().copied().map(Rgb::from_bytes).collect();
        Self::new(&colors)
    }

    /// Create a palette from hex color strings such as `"#00FFFF"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any hex string is invalid,
    /// plus the validation errors of [`Palette::new`].
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let colors = colors
            .iter()
            .map(|s| s.parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// The two-entry black/white palette used by binary thresholding.
    pub fn binary() -> Self {
        Self {
            colors: Arc::from([Rgb::BLACK, Rgb::WHITE]),
        }
    }

    /// Wrap colors that are already known to be valid (generated tables).
    pub(crate) fn from_trusted(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty());
        debug_assert_eq!(
            colors.iter().collect::<HashSet<_>>().len(),
            colors.len(),
            "generated palette contains duplicate colors"
        );
        Self {
            colors: colors.into(),
        }
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette is empty.
    ///
    /// Note: This always returns `false` since empty palettes are rejected
    /// at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// All colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Iterate over the colors in index order.
    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    /// Index of an exact (byte-identical) entry, if present.
    pub fn position(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Whether `color` is an exact entry of this palette.
    pub fn contains(&self, color: Rgb) -> bool {
        self.position(color).is_some()
    }

    /// Nearest palette index to `sample` under `metric`.
    ///
    /// Linear scan over the palette. When several entries are equally
    /// close, the lowest index wins, so repeated classification of the
    /// same sample always returns the same index.
    #[inline]
    pub fn classify(&self, sample: Rgb, metric: DistanceMetric) -> usize {
        let mut best_idx = 0;
        let mut best_score = u64::MAX;

        for (i, &color) in self.colors.iter().enumerate() {
            let score = metric.score(sample, color);
            if score < best_score {
                best_score = score;
                best_idx = i;
                if score == 0 {
                    break;
                }
            }
        }

        best_idx
    }

    /// Nearest palette index and its distance.
    pub fn find_nearest(&self, sample: Rgb, metric: DistanceMetric) -> (usize, f64) {
        let idx = self.classify(sample, metric);
        (idx, metric.distance(sample, self.colors[idx]))
    }

    /// Classify every sample in order.
    pub fn classify_all(&self, samples: &[Rgb], metric: DistanceMetric) -> Vec<u8> {
        debug_assert!(self.len() <= 256);
        samples
            .iter()
            .map(|&s| self.classify(s, metric) as u8)
            .collect()
    }

    /// Classify raw integer channels, rejecting values outside `0..=255`.
    ///
    /// Decoders that sample modules with wider arithmetic (averaging,
    /// white-balance correction) use this at the boundary.
    pub fn classify_channels(
        &self,
        r: i32,
        g: i32,
        b: i32,
        metric: DistanceMetric,
    ) -> Result<usize, PaletteError> {
        let sample = Rgb::try_from_channels(r, g, b)?;
        Ok(self.classify(sample, metric))
    }
}

/// Nearest palette index to `sample` under `metric`.
///
/// Free-function form of [`Palette::classify`] for decoder call sites.
#[inline]
pub fn classify(sample: Rgb, palette: &Palette, metric: DistanceMetric) -> usize {
    palette.classify(sample, metric)
}

impl<'a> IntoIterator for &'a Palette {
    type Item = Rgb;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Rgb>>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgbk_palette() -> Palette {
        Palette::new(&[
            Rgb::new(0, 0, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_index_width_limits_palette_size() {
        let distinct = |n: u32| -> Vec<Rgb> {
            (0..n)
                .map(|i| Rgb::new((i % 256) as u8, (i / 256) as u8, 7))
                .collect()
        };
        assert_eq!(Palette::new(&distinct(256)).unwrap().len(), 256);
        assert_eq!(
            Palette::new(&distinct(257)),
            Err(PaletteError::TooManyColors(257))
        );
        assert_eq!(
            Palette::new(&distinct(300)),
            Err(PaletteError::TooManyColors(300))
        );
    }

    #[test]
    fn test_duplicate_reports_second_index() {
        let result = Palette::new(&[Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]);
        assert_eq!(result, Err(PaletteError::DuplicateColor { index: 2 }));
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&["#000", "#FFFFFF"]).unwrap();
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);

        assert!(matches!(
            Palette::from_hex(&["#000", "nope"]),
            Err(PaletteError::ParseColor(_))
        ));
    }

    #[test]
    fn test_exact_matches() {
        let palette = rgbk_palette();
        for (i, color) in palette.iter().enumerate() {
            assert_eq!(palette.classify(color, DistanceMetric::Euclidean), i);
            assert_eq!(palette.classify(color, DistanceMetric::LumaWeighted), i);
        }
    }

    #[test]
    fn test_approximate_matches() {
        let palette = rgbk_palette();
        let m = DistanceMetric::Euclidean;
        assert_eq!(palette.classify(Rgb::new(200, 0, 0), m), 1);
        assert_eq!(palette.classify(Rgb::new(0, 200, 0), m), 2);
        assert_eq!(palette.classify(Rgb::new(0, 0, 200), m), 3);
        assert_eq!(palette.classify(Rgb::new(60, 60, 60), m), 0);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        // Equidistant from red and green: 127^2 + 128^2 either way
        let tie = Rgb::new(128, 128, 0);
        let red_first = Palette::new(&[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]).unwrap();
        assert_eq!(red_first.classify(tie, DistanceMetric::Euclidean), 0);

        // Same colors, reversed order: index 0 still wins (now green)
        let green_first = Palette::new(&[Rgb::new(0, 255, 0), Rgb::new(255, 0, 0)]).unwrap();
        assert_eq!(green_first.classify(tie, DistanceMetric::Euclidean), 0);
    }

    #[test]
    fn test_gray_threshold_between_black_and_white() {
        let palette = Palette::binary();
        assert_eq!(palette.classify(Rgb::new(127, 127, 127), DistanceMetric::Euclidean), 0);
        assert_eq!(palette.classify(Rgb::new(128, 128, 128), DistanceMetric::Euclidean), 1);
    }

    #[test]
    fn test_metrics_can_disagree() {
        // Candidate 0 differs only in blue, candidate 1 only in green.
        let palette = Palette::new(&[Rgb::new(100, 100, 0), Rgb::new(100, 40, 100)]).unwrap();
        let sample = Rgb::new(100, 100, 100);

        // Euclidean: 100^2 = 10000 vs 60^2 = 3600 -> index 1
        assert_eq!(palette.classify(sample, DistanceMetric::Euclidean), 1);
        // Luma: 0.114 * 10000 = 1140 vs 0.587 * 3600 = 2113 -> index 0
        assert_eq!(palette.classify(sample, DistanceMetric::LumaWeighted), 0);
    }

    #[test]
    fn test_distance_values() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(13, 24, 30);
        assert!((DistanceMetric::Euclidean.distance(a, b) - 5.0).abs() < 1e-12);

        let expected = (0.299 * 9.0 + 0.587 * 16.0_f64).sqrt();
        assert!((DistanceMetric::LumaWeighted.distance(a, b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_find_nearest_reports_distance() {
        let palette = rgbk_palette();
        let (idx, dist) = palette.find_nearest(Rgb::new(252, 4, 0), DistanceMetric::Euclidean);
        assert_eq!(idx, 1);
        assert!((dist - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_classify_channels_rejects_out_of_range() {
        let palette = rgbk_palette();
        assert_eq!(
            palette.classify_channels(0, 250, 0, DistanceMetric::Euclidean),
            Ok(2)
        );
        assert_eq!(
            palette.classify_channels(0, 300, 0, DistanceMetric::Euclidean),
            Err(PaletteError::OutOfRangeChannel {
                channel: "green",
                value: 300
            })
        );
    }

    #[test]
    fn test_position_and_contains() {
        let palette = rgbk_palette();
        assert_eq!(palette.position(Rgb::new(0, 255, 0)), Some(2));
        assert_eq!(palette.position(Rgb::WHITE), None);
        assert!(palette.contains(Rgb::BLACK));
    }

    #[test]
    fn test_classify_all_preserves_order() {
        let palette = rgbk_palette();
        let samples = [Rgb::new(0, 0, 250), Rgb::new(5, 5, 5), Rgb::new(240, 10, 10)];
        assert_eq!(
            palette.classify_all(&samples, DistanceMetric::Euclidean),
            vec![3, 0, 1]
        );
    }

    #[test]
    fn test_clone_shares_storage() {
        let palette = rgbk_palette();
        let clone = palette.clone();
        assert!(std::ptr::eq(palette.colors().as_ptr(), clone.colors().as_ptr()));
    }

    #[test]
    fn test_free_function_matches_method() {
        let palette = rgbk_palette();
        let sample = Rgb::new(30, 200, 40);
        assert_eq!(
            classify(sample, &palette, DistanceMetric::LumaWeighted),
            palette.classify(sample, DistanceMetric::LumaWeighted)
        );
    }
}
