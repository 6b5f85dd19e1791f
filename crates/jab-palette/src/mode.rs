//! Color mode registry.
//!
//! A JAB Code symbol uses one of seven palette sizes. The mode is
//! transmitted in the symbol metadata as `Nc`, where the color count is
//! `2^(Nc + 1)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::PaletteError;

/// One of the seven supported palette sizes.
///
/// Constructed from a color count with [`ColorMode::from_color_count`] or
/// from the metadata value with [`ColorMode::from_nc`]. Any other count is
/// rejected, so a `ColorMode` always names a valid power of two in
/// `4..=256`.
///
/// # Example
///
/// ```
/// use jab_palette::ColorMode;
///
/// let mode = ColorMode::from_color_count(64).unwrap();
/// assert_eq!(mode.nc(), 5);
/// assert_eq!(mode.bits_per_module(), 6);
/// assert!(!mode.requires_interpolation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ColorMode {
    /// 4 colors, Nc = 1
    Colors4,
    /// 8 colors (RGB cube vertices), Nc = 2
    Colors8,
    /// 16 colors, Nc = 3
    Colors16,
    /// 32 colors, Nc = 4
    Colors32,
    /// 64 colors, Nc = 5
    Colors64,
    /// 128 colors (R interpolated from the embedded palette), Nc = 6
    Colors128,
    /// 256 colors (R and G interpolated from the embedded palette), Nc = 7
    Colors256,
}

impl ColorMode {
    /// All modes in ascending color count order.
    pub const ALL: [ColorMode; 7] = [
        ColorMode::Colors4,
        ColorMode::Colors8,
        ColorMode::Colors16,
        ColorMode::Colors32,
        ColorMode::Colors64,
        ColorMode::Colors128,
        ColorMode::Colors256,
    ];

    /// Look up the mode for a color count.
    ///
    /// # Errors
    ///
    /// [`PaletteError::UnsupportedColorCount`] for anything other than
    /// 4, 8, 16, 32, 64, 128 or 256.
    pub fn from_color_count(count: u32) -> Result<Self, PaletteError> {
        match count {
            4 => Ok(ColorMode::Colors4),
            8 => Ok(ColorMode::Colors8),
            16 => Ok(ColorMode::Colors16),
            32 => Ok(ColorMode::Colors32),
            64 => Ok(ColorMode::Colors64),
            128 => Ok(ColorMode::Colors128),
            256 => Ok(ColorMode::Colors256),
            other => Err(PaletteError::UnsupportedColorCount(other)),
        }
    }

    /// Look up the mode for an `Nc` metadata value (1..=7).
    ///
    /// `Nc = 0` is reserved by the symbology and rejected.
    pub fn from_nc(nc: u8) -> Result<Self, PaletteError> {
        match nc {
            1..=7 => Ok(Self::ALL[nc as usize - 1]),
            other => Err(PaletteError::UnsupportedNc(other)),
        }
    }

    /// Number of palette colors.
    #[inline]
    pub const fn color_count(self) -> usize {
        1 << self.bits_per_module()
    }

    /// Bits encoded by one module, `log2(color_count)`.
    #[inline]
    pub const fn bits_per_module(self) -> u32 {
        self.nc() as u32 + 1
    }

    /// Metadata mode value, `bits_per_module - 1`.
    #[inline]
    pub const fn nc(self) -> u8 {
        match self {
            ColorMode::Colors4 => 1,
            ColorMode::Colors8 => 2,
            ColorMode::Colors16 => 3,
            ColorMode::Colors32 => 4,
            ColorMode::Colors64 => 5,
            ColorMode::Colors128 => 6,
            ColorMode::Colors256 => 7,
        }
    }

    /// Whether the full palette is reconstructed from a 64-color embedded
    /// subset (modes with 128 or more colors).
    #[inline]
    pub const fn requires_interpolation(self) -> bool {
        self.color_count() >= 128
    }

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            ColorMode::Colors4 => "4 colors (CMY primaries and black)",
            ColorMode::Colors8 => "8 colors (RGB cube vertices)",
            ColorMode::Colors16 => "16 colors (4R x 2G x 2B)",
            ColorMode::Colors32 => "32 colors (4R x 4G x 2B)",
            ColorMode::Colors64 => "64 colors (4R x 4G x 4B)",
            ColorMode::Colors128 => "128 colors (8R x 4G x 4B, R interpolated)",
            ColorMode::Colors256 => "256 colors (8R x 8G x 4B, R and G interpolated)",
        }
    }
}

impl TryFrom<u32> for ColorMode {
    type Error = PaletteError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::from_color_count(count)
    }
}

impl From<ColorMode> for u32 {
    fn from(mode: ColorMode) -> Self {
        mode.color_count() as u32
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color_count())
    }
}

impl FromStr for ColorMode {
    type Err = PaletteError;

    /// Parse a decimal color count, e.g. `"16"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: u32 = s
            .trim()
            .parse()
            .map_err(|_| PaletteError::InvalidColorCount(s.trim().to_string()))?;
        Self::from_color_count(count)
    }
}

/// Color assignment used for the 4-color mode.
///
/// The ISO ordering is [`FourColorProfile::Cmyk`]. Some legacy encoders used
/// a black/white/red/green set instead; decoding their symbols requires
/// [`FourColorProfile::Primaries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FourColorProfile {
    /// Black, cyan, magenta, yellow.
    #[default]
    Cmyk,
    /// Black, white, red, green.
    Primaries,
}
