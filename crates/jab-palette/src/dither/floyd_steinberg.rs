//! Floyd-Steinberg error diffusion.

use crate::color::Rgb;
use crate::palette::{DistanceMetric, Palette};

use super::{dither_with_kernel, Dither, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// Distributes 100% of the quantization error to 4 neighboring pixels:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// Scanning is always left to right; there is no serpentine mode, so the
/// output for a given image is fixed.
///
/// # Example
///
/// ```
/// use jab_palette::dither::{Dither, FloydSteinberg};
/// use jab_palette::{DistanceMetric, Palette, Rgb};
///
/// let gray = vec![Rgb::new(128, 128, 128); 4];
/// let indices = FloydSteinberg.dither(&gray, 2, 2, &Palette::binary(), DistanceMetric::Euclidean);
/// assert_eq!(indices, vec![1, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        metric: DistanceMetric,
    ) -> Vec<u8> {
        dither_with_kernel(image, width, height, palette, &FLOYD_STEINBERG, metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Rgb = Rgb::new(128, 128, 128);

    fn run(image: &[Rgb], width: usize, height: usize) -> Vec<u8> {
        FloydSteinberg.dither(
            image,
            width,
            height,
            &Palette::binary(),
            DistanceMetric::Euclidean,
        )
    }

    #[test]
    fn test_right_neighbor_receives_seven_sixteenths() {
        // 128 -> white, error -127, right share -127 * 7 / 16 = -55 (truncated),
        // so the second pixel sees 73 and goes black.
        assert_eq!(run(&[GRAY, GRAY], 2, 1), vec![1, 0]);
    }

    #[test]
    fn test_two_by_two_gray_checkerboard() {
        assert_eq!(run(&[GRAY; 4], 2, 2), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_single_column_drops_side_shares() {
        // Only the 5/16 share below survives: 128 - 39 = 89 -> black
        assert_eq!(run(&[GRAY, GRAY], 1, 2), vec![1, 0]);
    }

    #[test]
    fn test_exact_colors_produce_no_error() {
        let image = [Rgb::BLACK, Rgb::WHITE, Rgb::WHITE, Rgb::BLACK];
        assert_eq!(run(&image, 2, 2), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_mean_tone_is_preserved() {
        // A wide strip of mid-gray should come out roughly half white
        let width = 64;
        let image = vec![GRAY; width * 4];
        let out = run(&image, width, 4);
        let white = out.iter().filter(|&&i| i == 1).count();
        let ratio = white as f64 / out.len() as f64;
        assert!((0.4..=0.6).contains(&ratio), "white ratio {ratio}");
    }

    #[test]
    fn test_working_color_is_clamped() {
        // 127 -> black with error +127; the right share of 55 pushes the
        // second pixel to 305, clamped to 255. White then matches exactly,
        // so nothing reaches the third pixel, which stays black. Without
        // the clamp it would receive 50 * 7 / 16 = 21 and turn white.
        let image = [
            Rgb::new(127, 127, 127),
            Rgb::new(250, 250, 250),
            Rgb::new(120, 120, 120),
        ];
        assert_eq!(run(&image, 3, 1), vec![0, 1, 0]);
    }

    #[test]
    fn test_near_white_stays_white() {
        let image = vec![Rgb::new(250, 250, 250); 9];
        assert_eq!(run(&image, 3, 3), vec![1; 9]);
    }

    #[test]
    fn test_deterministic() {
        let image: Vec<Rgb> = (0..48)
            .map(|i| Rgb::new((i * 5) as u8, (255 - i * 3) as u8, (i * 7 % 256) as u8))
            .collect();
        let palette = crate::palette::generate(crate::ColorMode::Colors16);
        let a = FloydSteinberg.dither(&image, 8, 6, &palette, DistanceMetric::LumaWeighted);
        let b = FloydSteinberg.dither(&image, 8, 6, &palette, DistanceMetric::LumaWeighted);
        assert_eq!(a, b);
        assert!(a.iter().all(|&i| (i as usize) < palette.len()));
    }
}
