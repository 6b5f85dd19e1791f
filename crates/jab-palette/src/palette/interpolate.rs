//! Embedded palette interpolation for the 128- and 256-color modes.
//!
//! A symbol can only carry 64 palette colors in its metadata. For the two
//! largest modes the full palette is rebuilt from that 4x4x4 subset by
//! expanding one channel (128 colors) or two channels (256 colors) from 4
//! to 8 levels.
//!
//! The expansion law anchors each embedded level at position
//! `round(i * (target - 1) / (levels - 1))` and fills the positions between
//! two anchors by linear subdivision rounded down. For the embedded levels
//! `{0, 73, 182, 255}` this gives exactly
//! `{0, 36, 73, 109, 145, 182, 218, 255}`, and the embedded levels always
//! come through unchanged.

use tracing::debug;

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::Rgb;
use crate::mode::ColorMode;

/// Levels per channel in an embedded palette.
pub const EMBEDDED_LEVELS: usize = 4;

/// Levels per interpolated channel in the full palette.
pub const INTERPOLATED_LEVELS: usize = 8;

/// Number of entries in an embedded palette.
pub const EMBEDDED_PALETTE_SIZE: usize = EMBEDDED_LEVELS * EMBEDDED_LEVELS * EMBEDDED_LEVELS;

/// Which channels are expanded to [`INTERPOLATED_LEVELS`] levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSet {
    /// Red only (128-color mode)
    R,
    /// Red and green (256-color mode)
    RG,
}

impl ChannelSet {
    /// The channel set a mode interpolates, or `None` for modes whose
    /// palette is carried in full.
    pub fn for_mode(mode: ColorMode) -> Option<Self> {
        match mode {
            ColorMode::Colors128 => Some(ChannelSet::R),
            ColorMode::Colors256 => Some(ChannelSet::RG),
            _ => None,
        }
    }

    #[inline]
    fn green(self) -> bool {
        self == ChannelSet::RG
    }
}

/// Position of embedded level `i` within the expanded level list.
#[inline]
fn anchor_position(i: usize, levels: usize, target: usize) -> usize {
    // round(i * (target - 1) / (levels - 1)) in integers
    (2 * i * (target - 1) + (levels - 1)) / (2 * (levels - 1))
}

/// Expand a sorted list of channel levels to `target` levels.
///
/// The embedded levels keep their values and sit at their anchor positions;
/// the levels in between are filled by integer linear subdivision.
///
/// # Errors
///
/// [`PaletteError::InvalidEmbeddedPalette`] if fewer than two levels are
/// given or `target` is smaller than the number of levels.
///
/// # Example
///
/// ```
/// use jab_palette::interpolate_levels;
///
/// let levels = interpolate_levels(&[0, 73, 182, 255], 8).unwrap();
/// assert_eq!(levels, vec![0, 36, 73, 109, 145, 182, 218, 255]);
/// ```
pub fn interpolate_levels(embedded: &[u8], target: usize) -> Result<Vec<u8>, PaletteError> {
    let levels = embedded.len();
    if levels < 2 || target < levels {
        return Err(PaletteError::InvalidEmbeddedPalette {
            reason: format!("cannot expand {levels} levels to {target}"),
        });
    }

    let mut out = vec![0u8; target];
    for pair in 0..levels - 1 {
        let start = anchor_position(pair, levels, target);
        let end = anchor_position(pair + 1, levels, target);
        let lo = embedded[pair] as i32;
        let hi = embedded[pair + 1] as i32;
        let span = (end - start) as i32;

        for pos in start..end {
            let offset = (pos - start) as i32;
            out[pos] = (lo + (hi - lo) * offset / span) as u8;
        }
    }
    out[target - 1] = embedded[levels - 1];

    Ok(out)
}

/// Per-channel levels of a 4x4x4 embedded grid in R-G-B order.
struct GridLevels {
    red: [u8; EMBEDDED_LEVELS],
    green: [u8; EMBEDDED_LEVELS],
    blue: [u8; EMBEDDED_LEVELS],
}

impl GridLevels {
    /// Read the channel levels off an embedded palette and check that every
    /// entry sits on the grid they describe.
    fn extract(embedded: &Palette) -> Result<Self, PaletteError> {
        if embedded.len() != EMBEDDED_PALETTE_SIZE {
            return Err(PaletteError::InvalidEmbeddedPalette {
                reason: format!(
                    "expected {EMBEDDED_PALETTE_SIZE} colors, got {}",
                    embedded.len()
                ),
            });
        }

        let colors = embedded.colors();
        let n = EMBEDDED_LEVELS;
        let mut grid = GridLevels {
            red: [0; EMBEDDED_LEVELS],
            green: [0; EMBEDDED_LEVELS],
            blue: [0; EMBEDDED_LEVELS],
        };
        for i in 0..n {
            grid.red[i] = colors[i * n * n].r;
            grid.green[i] = colors[i * n].g;
            grid.blue[i] = colors[i].b;
        }

        for (idx, &color) in colors.iter().enumerate() {
            let expected = Rgb::new(
                grid.red[idx / (n * n)],
                grid.green[(idx / n) % n],
                grid.blue[idx % n],
            );
            if color != expected {
                return Err(PaletteError::InvalidEmbeddedPalette {
                    reason: format!("entry {idx} is {color}, expected {expected}"),
                });
            }
        }

        Ok(grid)
    }
}

/// Rebuild a full palette from a 64-entry embedded palette.
///
/// The embedded palette must be a 4x4x4 grid enumerated red-outer,
/// green-middle, blue-inner. The channels in `channels` are expanded to
/// eight levels with [`interpolate_levels`] and the full grid is enumerated
/// in the same order.
///
/// # Errors
///
/// - [`PaletteError::InvalidEmbeddedPalette`] if the input is not a 4x4x4
///   grid
/// - [`PaletteError::EmbeddedPaletteMismatch`] if an embedded color does not
///   appear unchanged in the result
pub fn interpolate(embedded: &Palette, channels: ChannelSet) -> Result<Palette, PaletteError> {
    let grid = GridLevels::extract(embedded)?;

    // Red is expanded in both interpolated modes
    let red = interpolate_levels(&grid.red, INTERPOLATED_LEVELS)?;
    let green = if channels.green() {
        interpolate_levels(&grid.green, INTERPOLATED_LEVELS)?
    } else {
        grid.green.to_vec()
    };

    let mut full = Vec::with_capacity(red.len() * green.len() * grid.blue.len());
    for &r in &red {
        for &g in &green {
            for &b in &grid.blue {
                full.push(Rgb::new(r, g, b));
            }
        }
    }

    let full = Palette::new(&full)?;
    verify_subset(embedded, &full)?;

    debug!(
        embedded = embedded.len(),
        full = full.len(),
        ?channels,
        "interpolated embedded palette"
    );
    Ok(full)
}

/// Check that every embedded color appears unchanged in `full`.
pub fn verify_subset(embedded: &Palette, full: &Palette) -> Result<(), PaletteError> {
    for (index, color) in embedded.iter().enumerate() {
        if !full.contains(color) {
            return Err(PaletteError::EmbeddedPaletteMismatch { index, color });
        }
    }
    Ok(())
}

/// Index in the full palette of the color at `embedded_index` in the
/// embedded palette.
///
/// For modes of 64 colors or fewer the embedded palette is the full
/// palette, so the index maps to itself. Returns `None` when the index is
/// out of range for the mode's embedded palette.
///
/// # Example
///
/// ```
/// use jab_palette::{embedded_to_full_index, ColorMode};
///
/// // Embedded entry 16 is the first color with R = 73, which lands at
/// // red level 2 of 8 in the 128-color palette.
/// assert_eq!(embedded_to_full_index(ColorMode::Colors128, 16), Some(32));
/// ```
pub fn embedded_to_full_index(mode: ColorMode, embedded_index: usize) -> Option<usize> {
    let Some(channels) = ChannelSet::for_mode(mode) else {
        return (embedded_index < mode.color_count()).then_some(embedded_index);
    };
    if embedded_index >= EMBEDDED_PALETTE_SIZE {
        return None;
    }

    let n = EMBEDDED_LEVELS;
    let ri = embedded_index / (n * n);
    let gi = (embedded_index / n) % n;
    let bi = embedded_index % n;

    let expand = |i| anchor_position(i, EMBEDDED_LEVELS, INTERPOLATED_LEVELS);
    let (r_pos, g_pos, g_len) = if channels.green() {
        (expand(ri), expand(gi), INTERPOLATED_LEVELS)
    } else {
        (expand(ri), gi, EMBEDDED_LEVELS)
    };

    Some((r_pos * g_len + g_pos) * EMBEDDED_LEVELS + bi)
}
