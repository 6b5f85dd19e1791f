//! Error types for palette operations
//!
//! This module provides error types for color parsing, mode lookup and
//! palette validation.

use std::num::ParseIntError;

use thiserror::Error;

use crate::color::Rgb;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
    /// Character other than 0-9, a-f or A-F, including a sign
    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
}

/// Error type for mode lookup and palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// Requested color count is not one of 4, 8, 16, 32, 64, 128, 256
    #[error("unsupported color count {0} (expected 4, 8, 16, 32, 64, 128 or 256)")]
    UnsupportedColorCount(u32),

    /// Color count text is not a decimal number
    #[error("invalid color count '{0}' (expected 4, 8, 16, 32, 64, 128 or 256)")]
    InvalidColorCount(String),

    /// Nc value outside 1..=7
    #[error("unsupported Nc value {0} (expected 1..=7)")]
    UnsupportedNc(u8),

    /// A channel value outside 0..=255
    #[error("{channel} channel value {value} is outside 0..=255")]
    OutOfRangeChannel {
        /// Channel name ("red", "green" or "blue")
        channel: &'static str,
        /// The rejected value
        value: i32,
    },

    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// More colors than an 8-bit palette index can address
    #[error("palette has {0} colors (at most 256 fit an 8-bit index)")]
    TooManyColors(usize),

    /// Duplicate color found at the specified index
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },

    /// Embedded palette does not have the 4x4x4 grid layout
    #[error("embedded palette is not a 4x4x4 channel grid: {reason}")]
    InvalidEmbeddedPalette {
        /// What was wrong with the layout
        reason: String,
    },

    /// Interpolated palette lost one of the embedded colors
    #[error("embedded color {color} (index {index}) is missing from the interpolated palette")]
    EmbeddedPaletteMismatch {
        /// Embedded palette index of the missing color
        index: usize,
        /// The missing color
        color: Rgb,
    },

    /// Cube subdivision needs at least two colors
    #[error("cannot subdivide the RGB cube into {0} colors (need at least 2)")]
    CubeTooSmall(usize),

    /// Serialized palette has a length that does not fit the expected layout
    #[error("invalid palette byte length {len}: {reason}")]
    InvalidPaletteBytes {
        /// Number of bytes supplied
        len: usize,
        /// What was expected
        reason: &'static str,
    },

    /// Nc metadata indices are malformed
    #[error("invalid Nc metadata indices: {0}")]
    InvalidNcIndices(&'static str),

    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
