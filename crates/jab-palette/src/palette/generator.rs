//! Canonical palette generation.
//!
//! Every mode's palette is described by a [`PaletteScheme`]: a fixed color
//! table (4 and 8 colors), a channel-value grid (16, 32 and 64 colors), or
//! an embedded grid that is interpolated to the full palette (128 and 256
//! colors). Grids are always enumerated red-outer, green-middle,
//! blue-inner, so the index of a color is a pure function of its channel
//! levels.
//!
//! Generated palettes are built once per process and shared through
//! [`OnceLock`]s.

use std::sync::OnceLock;

use tracing::debug;

use super::error::PaletteError;
use super::interpolate::{interpolate, ChannelSet};
use super::palette::Palette;
use crate::color::Rgb;
use crate::mode::{ColorMode, FourColorProfile};

/// Uniform quarter steps across the channel range.
const LEVELS_4: &[u8] = &[0, 85, 170, 255];

/// Two-level channel.
const LEVELS_2: &[u8] = &[0, 255];

/// Quarter steps used by the embedded palettes of the interpolated modes.
/// Interpolation places these at positions 0, 2, 5 and 7 of the eight
/// full levels.
const LEVELS_EMBEDDED: &[u8] = &[0, 73, 182, 255];

const CMYK_4: &[Rgb] = &[
    Rgb::new(0, 0, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 255, 0),
];

const PRIMARIES_4: &[Rgb] = &[
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
];

/// The eight RGB cube vertices, in the order the symbology assigns them.
const VERTICES_8: &[Rgb] = &[
    Rgb::new(0, 0, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 255, 255),
];

/// How a mode's palette is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteScheme {
    /// A literal color table.
    FixedTable(&'static [Rgb]),

    /// The cartesian product of per-channel levels.
    ChannelGrid {
        red: &'static [u8],
        green: &'static [u8],
        blue: &'static [u8],
    },

    /// A 4x4x4 embedded grid whose `channels` are expanded to eight levels.
    EmbeddedInterpolated {
        red: &'static [u8],
        green: &'static [u8],
        blue: &'static [u8],
        channels: ChannelSet,
    },
}

impl PaletteScheme {
    /// The scheme for `mode`. `profile` only affects the 4-color mode.
    pub fn for_mode(mode: ColorMode, profile: FourColorProfile) -> Self {
        match mode {
            ColorMode::Colors4 => match profile {
                FourColorProfile::Cmyk => PaletteScheme::FixedTable(CMYK_4),
                FourColorProfile::Primaries => PaletteScheme::FixedTable(PRIMARIES_4),
            },
            ColorMode::Colors8 => PaletteScheme::FixedTable(VERTICES_8),
            ColorMode::Colors16 => PaletteScheme::ChannelGrid {
                red: LEVELS_4,
                green: LEVELS_2,
                blue: LEVELS_2,
            },
            ColorMode::Colors32 => PaletteScheme::ChannelGrid {
                red: LEVELS_4,
                green: LEVELS_4,
                blue: LEVELS_2,
            },
            ColorMode::Colors64 => PaletteScheme::ChannelGrid {
                red: LEVELS_4,
                green: LEVELS_4,
                blue: LEVELS_4,
            },
            ColorMode::Colors128 => PaletteScheme::EmbeddedInterpolated {
                red: LEVELS_EMBEDDED,
                green: LEVELS_4,
                blue: LEVELS_4,
                channels: ChannelSet::R,
            },
            ColorMode::Colors256 => PaletteScheme::EmbeddedInterpolated {
                red: LEVELS_EMBEDDED,
                green: LEVELS_EMBEDDED,
                blue: LEVELS_4,
                channels: ChannelSet::RG,
            },
        }
    }

    /// The palette carried in symbol metadata: the full palette for fixed
    /// tables and grids, the 64-entry subset for interpolated schemes.
    pub fn embedded(&self) -> Palette {
        match *self {
            PaletteScheme::FixedTable(colors) => Palette::from_trusted(colors.to_vec()),
            PaletteScheme::ChannelGrid { red, green, blue }
            | PaletteScheme::EmbeddedInterpolated {
                red, green, blue, ..
            } => Palette::from_trusted(grid(red, green, blue)),
        }
    }

    /// The complete palette.
    ///
    /// # Panics
    ///
    /// If an interpolated scheme loses one of its embedded colors. The
    /// level tables are constants, so this only happens if they are edited
    /// into an inconsistent state.
    pub fn full(&self) -> Palette {
        match *self {
            PaletteScheme::EmbeddedInterpolated { channels, .. } => {
                let embedded = self.embedded();
                match interpolate(&embedded, channels) {
                    Ok(full) => full,
                    Err(e) => panic!("canonical palette failed to interpolate: {e}"),
                }
            }
            _ => self.embedded(),
        }
    }
}

/// Cartesian product of channel levels, red-outer, green-middle, blue-inner.
fn grid(red: &[u8], green: &[u8], blue: &[u8]) -> Vec<Rgb> {
    let mut colors = Vec::with_capacity(red.len() * green.len() * blue.len());
    for &r in red {
        for &g in green {
            for &b in blue {
                colors.push(Rgb::new(r, g, b));
            }
        }
    }
    colors
}

static FULL: [OnceLock<Palette>; 7] = [const { OnceLock::new() }; 7];
static EMBEDDED: [OnceLock<Palette>; 7] = [const { OnceLock::new() }; 7];
static PRIMARIES: OnceLock<Palette> = OnceLock::new();

#[inline]
fn slot(mode: ColorMode) -> usize {
    mode.nc() as usize - 1
}

/// The canonical palette for `mode`, using the default 4-color profile.
///
/// # Example
///
/// ```
/// use jab_palette::{generate, ColorMode, Rgb};
///
/// let palette = generate(ColorMode::Colors8);
/// assert_eq!(palette.get(1), Some(Rgb::new(0, 0, 255)));
/// ```
pub fn generate(mode: ColorMode) -> Palette {
    FULL[slot(mode)]
        .get_or_init(|| {
            let palette = PaletteScheme::for_mode(mode, FourColorProfile::default()).full();
            debug!(colors = palette.len(), %mode, "generated canonical palette");
            palette
        })
        .clone()
}

/// The canonical palette for `mode` with an explicit 4-color profile.
pub fn generate_with_profile(mode: ColorMode, profile: FourColorProfile) -> Palette {
    match (mode, profile) {
        (ColorMode::Colors4, FourColorProfile::Primaries) => PRIMARIES
            .get_or_init(|| PaletteScheme::for_mode(mode, profile).full())
            .clone(),
        _ => generate(mode),
    }
}

/// The palette a symbol of `mode` carries in its metadata.
///
/// For 128 and 256 colors this is the 64-entry embedded grid; for every
/// other mode it equals [`generate`].
pub fn generate_embedded(mode: ColorMode) -> Palette {
    if !mode.requires_interpolation() {
        return generate(mode);
    }
    EMBEDDED[slot(mode)]
        .get_or_init(|| PaletteScheme::for_mode(mode, FourColorProfile::default()).embedded())
        .clone()
}

/// Evenly subdivide the RGB cube into `n` colors.
///
/// The cube side is the smallest integer `s` with `s^3 >= n`; channel
/// values step by `255 / (s - 1)` and colors are enumerated red-outer,
/// green-middle, blue-inner until `n` are produced.
///
/// # Errors
///
/// [`PaletteError::CubeTooSmall`] if `n < 2`.
pub fn subdivide_cube(n: usize) -> Result<Palette, PaletteError> {
    if n < 2 {
        return Err(PaletteError::CubeTooSmall(n));
    }

    let mut side = 2usize;
    while side * side * side < n {
        side += 1;
    }
    let step = 255 / (side - 1);

    let colors: Vec<Rgb> = (0..side)
        .flat_map(|r| (0..side).flat_map(move |g| (0..side).map(move |b| (r, g, b))))
        .take(n)
        .map(|(r, g, b)| Rgb::new((r * step) as u8, (g * step) as u8, (b * step) as u8))
        .collect();

    Palette::new(&colors)
}

impl Palette {
    /// The canonical palette for `mode`. Same as [`generate`].
    #[inline]
    pub fn for_mode(mode: ColorMode) -> Self {
        generate(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex(palette: &Palette) -> Vec<String> {
        palette.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_four_color_profiles() {
        assert_eq!(
            hex(&generate(ColorMode::Colors4)),
            vec!["#000000", "#00FFFF", "#FF00FF", "#FFFF00"]
        );
        assert_eq!(
            hex(&generate_with_profile(
                ColorMode::Colors4,
                FourColorProfile::Primaries
            )),
            vec!["#000000", "#FFFFFF", "#FF0000", "#00FF00"]
        );
    }

    #[test]
    fn test_profile_only_affects_four_colors() {
        assert_eq!(
            generate_with_profile(ColorMode::Colors16, FourColorProfile::Primaries),
            generate(ColorMode::Colors16)
        );
    }

    #[test]
    fn test_sixteen_color_grid() {
        let palette = generate(ColorMode::Colors16);
        assert_eq!(palette.get(0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(palette.get(1), Some(Rgb::new(0, 0, 255)));
        assert_eq!(palette.get(2), Some(Rgb::new(0, 255, 0)));
        assert_eq!(palette.get(4), Some(Rgb::new(85, 0, 0)));
        assert_eq!(palette.get(15), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_thirty_two_color_grid() {
        let palette = generate(ColorMode::Colors32);
        assert_eq!(palette.get(2), Some(Rgb::new(0, 85, 0)));
        assert_eq!(palette.get(8), Some(Rgb::new(85, 0, 0)));
        assert_eq!(palette.get(31), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_sixty_four_color_grid() {
        let palette = generate(ColorMode::Colors64);
        assert_eq!(palette.get(1), Some(Rgb::new(0, 0, 85)));
        assert_eq!(palette.get(21), Some(Rgb::new(85, 85, 85)));
        assert_eq!(palette.get(63), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_embedded_grids() {
        let e128 = generate_embedded(ColorMode::Colors128);
        assert_eq!(e128.len(), 64);
        assert_eq!(e128.get(16), Some(Rgb::new(73, 0, 0)));
        assert_eq!(e128.get(1), Some(Rgb::new(0, 0, 85)));

        let e256 = generate_embedded(ColorMode::Colors256);
        assert_eq!(e256.len(), 64);
        assert_eq!(e256.get(4), Some(Rgb::new(0, 73, 0)));
        assert_eq!(e256.get(63), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_embedded_is_full_for_small_modes() {
        for mode in ColorMode::ALL.into_iter().filter(|m| !m.requires_interpolation()) {
            assert_eq!(generate_embedded(mode), generate(mode));
        }
    }

    #[test]
    fn test_interpolated_red_levels() {
        let palette = generate(ColorMode::Colors128);
        let reds: Vec<u8> = (0..8).map(|i| palette.colors()[i * 16].r).collect();
        assert_eq!(reds, vec![0, 36, 73, 109, 145, 182, 218, 255]);
    }

    #[test]
    fn test_interpolated_green_levels() {
        let palette = generate(ColorMode::Colors256);
        let greens: Vec<u8> = (0..8).map(|i| palette.colors()[i * 4].g).collect();
        assert_eq!(greens, vec![0, 36, 73, 109, 145, 182, 218, 255]);
        let blues: Vec<u8> = (0..4).map(|i| palette.colors()[i].b).collect();
        assert_eq!(blues, vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_generate_is_shared() {
        let a = generate(ColorMode::Colors256);
        let b = Palette::for_mode(ColorMode::Colors256);
        assert!(std::ptr::eq(a.colors().as_ptr(), b.colors().as_ptr()));
    }

    #[test]
    fn test_scheme_shapes() {
        assert!(matches!(
            PaletteScheme::for_mode(ColorMode::Colors8, FourColorProfile::Cmyk),
            PaletteScheme::FixedTable(_)
        ));
        assert!(matches!(
            PaletteScheme::for_mode(ColorMode::Colors32, FourColorProfile::Cmyk),
            PaletteScheme::ChannelGrid { .. }
        ));
        assert!(matches!(
            PaletteScheme::for_mode(ColorMode::Colors256, FourColorProfile::Cmyk),
            PaletteScheme::EmbeddedInterpolated {
                channels: ChannelSet::RG,
                ..
            }
        ));
    }

    #[test]
    fn test_subdivide_cube_small() {
        let palette = subdivide_cube(2).unwrap();
        assert_eq!(hex(&palette), vec!["#000000", "#0000FF"]);

        let palette = subdivide_cube(9).unwrap();
        // side 3, step 127
        assert_eq!(palette.len(), 9);
        assert_eq!(palette.get(1), Some(Rgb::new(0, 0, 127)));
        assert_eq!(palette.get(2), Some(Rgb::new(0, 0, 254)));
        assert_eq!(palette.get(8), Some(Rgb::new(0, 254, 254)));
    }

    #[test]
    fn test_subdivide_cube_exact_cubes() {
        // 27 = 3^3 and 64 = 4^3 must not round up a side
        let palette = subdivide_cube(27).unwrap();
        assert_eq!(palette.get(26), Some(Rgb::new(254, 254, 254)));

        let palette = subdivide_cube(64).unwrap();
        assert_eq!(palette, generate(ColorMode::Colors64));
    }

    #[test]
    fn test_subdivide_cube_rejects_tiny() {
        assert_eq!(subdivide_cube(0), Err(PaletteError::CubeTooSmall(0)));
        assert_eq!(subdivide_cube(1), Err(PaletteError::CubeTooSmall(1)));
    }
}
