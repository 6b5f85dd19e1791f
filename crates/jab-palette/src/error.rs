//! Unified error type for the public API.
//!
//! [`CodecError`] wraps every error the crate can produce into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the public API.
///
/// # Example
///
/// ```
/// use jab_palette::{CodecError, Palette};
///
/// fn custom_palette() -> Result<Palette, CodecError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # assert!(custom_palette().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Mode lookup or palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Pixel buffer length does not match the stated dimensions
    #[error("raster buffer has {actual} bytes, expected {expected} ({width}x{height}x{channels})")]
    RasterSizeMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// Stated dimensions overflow the addressable buffer size
    #[error("raster dimensions {width}x{height}x{channels} overflow the address space")]
    RasterTooLarge {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Pixel layout other than RGB or RGBA
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannelCount(usize),

    /// Invalid hex color string
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}
