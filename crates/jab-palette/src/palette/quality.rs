//! Palette quality metrics.
//!
//! Offline checks that guard palette generation against regressions: how
//! close the two nearest colors are, how widely the colors spread across
//! the channel range, and whether raw channel values are in range and
//! close to the canonical palette.
//!
//! The functions take plain color slices rather than [`Palette`] so they
//! can also judge candidate color lists that a `Palette` would reject
//! (repeated entries, for instance).

use serde::Serialize;

use super::generator::{generate, generate_with_profile};
use super::palette::{DistanceMetric, Palette};
use crate::color::Rgb;
use crate::mode::{ColorMode, FourColorProfile};

/// Smallest Euclidean distance between any two entries.
///
/// Returns `f64::MAX` for fewer than two colors and `0.0` when a color is
/// repeated.
pub fn min_color_separation(colors: &[Rgb]) -> f64 {
    if colors.len() < 2 {
        return f64::MAX;
    }

    let mut min_score = u64::MAX;
    for (i, &a) in colors.iter().enumerate() {
        for &b in &colors[i + 1..] {
            min_score = min_score.min(DistanceMetric::Euclidean.score(a, b));
        }
    }
    (min_score as f64).sqrt()
}

/// Spread of the colors: the sum over R, G and B of the population
/// standard deviation of that channel.
///
/// `0.0` for fewer than two colors or a single repeated color.
pub fn color_variation(colors: &[Rgb]) -> f64 {
    if colors.len() < 2 {
        return 0.0;
    }

    let n = colors.len() as f64;
    let channels: [fn(&Rgb) -> u8; 3] = [|c| c.r, |c| c.g, |c| c.b];

    channels
        .iter()
        .map(|channel| {
            let mean = colors.iter().map(|c| channel(c) as f64).sum::<f64>() / n;
            let variance = colors
                .iter()
                .map(|c| {
                    let d = channel(c) as f64 - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            variance.sqrt()
        })
        .sum()
}

/// Check that every raw channel value lies in `0..=255`.
///
/// This is a range check only and holds for any palette, custom ones
/// included. The range has no slack: `tolerance` is not applied to it.
/// Use [`matches_canonical`] or [`within_tolerance`] to compare against
/// reference colors.
///
/// # Example
///
/// ```
/// use jab_palette::validate_palette_accuracy;
///
/// let custom = [[12, 200, 40], [0, 0, 0], [255, 255, 255]];
/// assert!(validate_palette_accuracy(&custom, 5));
/// assert!(!validate_palette_accuracy(&[[0, 256, 0], [0, 0, 0]], 5));
/// ```
pub fn validate_palette_accuracy(colors: &[[i32; 3]], _tolerance: i32) -> bool {
    colors
        .iter()
        .flatten()
        .all(|channel| (0..=255).contains(channel))
}

/// Check a measured palette against the canonical palette of the mode
/// with the same color count.
///
/// The mode is chosen from `colors.len()`. Each entry must be within
/// `max_error` per channel of the canonical color at the same index, and
/// a 4-entry list may match either [`FourColorProfile`]. Lists whose
/// length is not a mode's color count never match.
///
/// # Example
///
/// ```
/// use jab_palette::matches_canonical;
///
/// let measured = [[2, 0, 0], [0, 250, 255], [255, 3, 253], [251, 255, 0]];
/// assert!(matches_canonical(&measured, 5));
/// assert!(!matches_canonical(&measured, 1));
/// ```
pub fn matches_canonical(colors: &[[i32; 3]], max_error: i32) -> bool {
    match ColorMode::from_color_count(colors.len() as u32) {
        Ok(ColorMode::Colors4) => [FourColorProfile::Cmyk, FourColorProfile::Primaries]
            .into_iter()
            .any(|profile| {
                let reference = generate_with_profile(ColorMode::Colors4, profile);
                within_tolerance(colors, &reference, max_error)
            }),
        Ok(mode) => within_tolerance(colors, &generate(mode), max_error),
        Err(_) => false,
    }
}

/// Whether `colors` matches `reference` entry by entry within `max_error`
/// per channel. Lists of different length never match.
pub fn within_tolerance(colors: &[[i32; 3]], reference: &Palette, max_error: i32) -> bool {
    colors.len() == reference.len()
        && colors.iter().zip(reference.iter()).all(|(measured, expected)| {
            measured
                .iter()
                .zip(expected.to_bytes())
                .all(|(&m, e)| (m - e as i32).abs() <= max_error)
        })
}

/// Summary of the quality metrics for one palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Number of colors
    pub colors: usize,
    /// Smallest pairwise Euclidean distance
    pub min_separation: f64,
    /// Sum of per-channel standard deviations
    pub variation: f64,
    /// Channels in range and, for a mode-sized palette, every entry
    /// within [`QualityReport::DEFAULT_MAX_ERROR`] of the canonical color
    pub accurate: bool,
}

impl QualityReport {
    /// Default per-channel tolerance used by [`QualityReport::for_palette`].
    pub const DEFAULT_MAX_ERROR: i32 = 5;

    /// Compute all metrics for `palette`.
    pub fn for_palette(palette: &Palette) -> Self {
        let raw: Vec<[i32; 3]> = palette
            .iter()
            .map(|c| [c.r as i32, c.g as i32, c.b as i32])
            .collect();

        Self {
            colors: palette.len(),
            min_separation: min_color_separation(palette.colors()),
            variation: color_variation(palette.colors()),
            accurate: validate_palette_accuracy(&raw, Self::DEFAULT_MAX_ERROR)
                && (ColorMode::from_color_count(raw.len() as u32).is_err()
                    || matches_canonical(&raw, Self::DEFAULT_MAX_ERROR)),
        }
    }

    /// Whether the palette has no coinciding colors and passes the
    /// accuracy check.
    pub fn passes(&self) -> bool {
        self.min_separation > 0.0 && self.accurate
    }
}
