//! Nc (color mode) metadata.

use crate::color::Rgb;
use crate::mode::ColorMode;
use crate::palette::{DistanceMetric, Palette, PaletteError};

/// Which copy of the Nc value is being written or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NcPart {
    /// Fixed 3-color palette, see [`nc_part1_palette`].
    PartI,
    /// The symbol's own palette.
    PartII,
}

const PART1_COLORS: [Rgb; 3] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 0),
];

/// The fixed palette Part I is written in: black, cyan, yellow.
pub fn nc_part1_palette() -> Palette {
    Palette::from_trusted(PART1_COLORS.to_vec())
}

/// The bits of `Nc`, most significant first, as palette indices (0 or 1).
///
/// # Example
///
/// ```
/// use jab_palette::{encode_nc, ColorMode};
///
/// // Nc = 5 = 0b101
/// assert_eq!(encode_nc(ColorMode::Colors64), [1, 0, 1]);
/// ```
pub fn encode_nc(mode: ColorMode) -> [u8; 3] {
    let nc = mode.nc();
    [(nc >> 2) & 1, (nc >> 1) & 1, nc & 1]
}

/// Read the mode back from three Nc bit indices.
///
/// # Errors
///
/// - [`PaletteError::InvalidNcIndices`] unless there are exactly three
///   entries, each 0 or 1
/// - [`PaletteError::UnsupportedNc`] for the reserved value `Nc = 0`
pub fn decode_nc(indices: &[u8]) -> Result<ColorMode, PaletteError> {
    let &[b2, b1, b0] = indices else {
        return Err(PaletteError::InvalidNcIndices("expected exactly 3 entries"));
    };
    if [b2, b1, b0].iter().any(|&bit| bit > 1) {
        return Err(PaletteError::InvalidNcIndices("entries must be 0 or 1"));
    }
    ColorMode::from_nc((b2 << 2) | (b1 << 1) | b0)
}

/// The three module colors that encode `mode`'s Nc in the given part.
pub fn nc_colors(mode: ColorMode, part: NcPart) -> [Rgb; 3] {
    let bits = encode_nc(mode);
    match part {
        NcPart::PartI => bits.map(|b| PART1_COLORS[b as usize]),
        NcPart::PartII => {
            let palette = Palette::for_mode(mode);
            bits.map(|b| palette.colors()[b as usize])
        }
    }
}

/// Decode Part I from three sampled module colors.
///
/// Each sample is classified against [`nc_part1_palette`]. A sample that
/// lands on yellow is not a valid bit and is rejected by [`decode_nc`].
pub fn decode_nc_samples(
    samples: &[Rgb; 3],
    metric: DistanceMetric,
) -> Result<ColorMode, PaletteError> {
    let palette = nc_part1_palette();
    let indices = palette.classify_all(samples, metric);
    decode_nc(&indices)
}
