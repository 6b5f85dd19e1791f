//! Palette bytes in symbol metadata.

use tracing::debug;

use crate::color::Rgb;
use crate::mode::ColorMode;
use crate::palette::{generate_embedded, interpolate, ChannelSet, Palette, PaletteError};

/// Serialize the palette a symbol of `mode` carries, as RGB triples.
///
/// This is the full palette for modes up to 64 colors and the 64-color
/// embedded grid for 128 and 256 colors, so the result is at most 192
/// bytes.
pub fn encode_embedded_palette(mode: ColorMode) -> Vec<u8> {
    encode_palette(&generate_embedded(mode))
}

/// Serialize any palette as RGB triples in index order.
pub fn encode_palette(palette: &Palette) -> Vec<u8> {
    palette.iter().flat_map(Rgb::to_bytes).collect()
}

/// Parse RGB triples back into a palette.
///
/// # Errors
///
/// - [`PaletteError::InvalidPaletteBytes`] if the length is not a positive
///   multiple of 3
/// - [`PaletteError::DuplicateColor`] if two triples are equal
pub fn decode_palette_bytes(bytes: &[u8]) -> Result<Palette, PaletteError> {
    if bytes.is_empty() || bytes.len() % 3 != 0 {
        return Err(PaletteError::InvalidPaletteBytes {
            len: bytes.len(),
            reason: "expected a non-empty multiple of 3",
        });
    }
    let colors: Vec<Rgb> = bytes
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    Palette::new(&colors)
}

/// Rebuild the full palette of a `mode` symbol from its metadata bytes.
///
/// For 128 and 256 colors the bytes must hold the 64-color embedded grid,
/// which is interpolated. For the other modes they must hold exactly
/// `color_count` colors, which are used as-is (a printed symbol's palette
/// may deviate from the canonical one).
///
/// # Example
///
/// ```
/// use jab_palette::{encode_embedded_palette, generate, reconstruct_palette, ColorMode};
///
/// let bytes = encode_embedded_palette(ColorMode::Colors256);
/// assert_eq!(bytes.len(), 192);
///
/// let palette = reconstruct_palette(&bytes, ColorMode::Colors256).unwrap();
/// assert_eq!(palette, generate(ColorMode::Colors256));
/// ```
pub fn reconstruct_palette(bytes: &[u8], mode: ColorMode) -> Result<Palette, PaletteError> {
    let decoded = decode_palette_bytes(bytes)?;

    let palette = match ChannelSet::for_mode(mode) {
        Some(channels) => interpolate(&decoded, channels)?,
        None if decoded.len() == mode.color_count() => decoded,
        None => {
            return Err(PaletteError::InvalidPaletteBytes {
                len: bytes.len(),
                reason: "color count does not match the mode",
            })
        }
    };

    debug!(%mode, colors = palette.len(), "reconstructed palette from metadata");
    Ok(palette)
}
